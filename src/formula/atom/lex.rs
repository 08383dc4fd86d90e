use std::iter::FusedIterator;

use crate::formula::error::AtomError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// `\` followed by letters
    CtlWord(String),
    /// `\` followed by one non-letter
    CtlSym(char),
    Power,
    Indice,
    BraceOpen,
    BraceClose,
    BracketOpen,
    BracketClose,
    /// Any other character, including letters and digits
    Char(char),
}

/// Token with the byte offset where it starts
#[derive(Debug, Clone, PartialEq)]
pub struct Token(pub usize, pub TokenKind);

pub fn tokenize(src: &str) -> Tokenizer<'_> {
    Tokenizer { src, pos: 0 }
}

/// Splits math-mode LaTeX into tokens, skipping whitespace and comments.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token, AtomError>;

    fn next(&mut self) -> Option<Result<Token, AtomError>> {
        self.skip_blank();
        let pos = self.pos;
        let c = self.bump()?;
        let kind = match c {
            '\\' => match self.ctl_seq(pos) {
                Ok(kind) => kind,
                Err(err) => return Some(Err(err)),
            },
            '^' => TokenKind::Power,
            '_' => TokenKind::Indice,
            '{' => TokenKind::BraceOpen,
            '}' => TokenKind::BraceClose,
            '[' => TokenKind::BracketOpen,
            ']' => TokenKind::BracketClose,
            _ => TokenKind::Char(c),
        };
        Some(Ok(Token(pos, kind)))
    }
}

impl FusedIterator for Tokenizer<'_> {}

impl<'a> Tokenizer<'a> {
    /// Next token without consuming it
    pub fn peek(&self) -> Option<Result<Token, AtomError>> {
        self.clone().next()
    }

    /// Consume the next token if it has exactly this kind
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        match self.peek() {
            Some(Ok(Token(_, ref k))) if k == kind => {
                self.next();
                true
            },
            _ => false,
        }
    }

    /// Read a `{...}` group verbatim, without tokenizing its content.
    ///
    /// Returns `None` without consuming anything when the next character is
    /// not an opening brace.
    pub fn raw_group(&mut self) -> Result<Option<&'a str>, AtomError> {
        self.skip_blank();
        let start = self.pos;
        if !self.rest().starts_with('{') {
            return Ok(None);
        }
        self.pos += 1;
        let mut depth = 1usize;
        while let Some(c) = self.bump() {
            match c {
                '\\' => {
                    self.bump();
                },
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(Some(&self.src[start + 1..self.pos - 1]));
                    }
                },
                _ => {},
            }
        }
        Err(AtomError::UnbalancedBrace(start))
    }

    /// Skip everything up to and including `\end{name}`, returning the
    /// skipped content.
    pub fn environment_body(&mut self, name: &str) -> Result<&'a str, AtomError> {
        let needle = format!("\\end{{{name}}}");
        let rest = self.rest();
        match memchr::memmem::find(rest.as_bytes(), needle.as_bytes()) {
            Some(at) => {
                let body = &rest[..at];
                self.pos += at + needle.len();
                Ok(body)
            },
            None => Err(AtomError::UnexpectedEnd(self.src.len())),
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.rest().chars().next()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn first(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_blank(&mut self) {
        while let Some(c) = self.first() {
            if c.is_whitespace() {
                self.bump();
            } else if c == '%' {
                // comment runs to the end of the line
                match memchr::memchr(b'\n', self.rest().as_bytes()) {
                    Some(at) => self.pos += at + 1,
                    None => self.pos = self.src.len(),
                }
            } else {
                break;
            }
        }
    }

    fn ctl_seq(&mut self, pos: usize) -> Result<TokenKind, AtomError> {
        let Some(c) = self.bump() else {
            return Err(AtomError::UnexpectedEnd(pos));
        };
        if c.is_ascii_alphabetic() {
            let mut word = String::new();
            word.push(c);
            while let Some(c) = self.first() {
                if c.is_ascii_alphabetic() {
                    self.bump();
                    word.push(c);
                } else {
                    break;
                }
            }
            Ok(TokenKind::CtlWord(word))
        } else {
            Ok(TokenKind::CtlSym(c))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_kinds(expr: &str) -> Vec<TokenKind> {
        tokenize(expr).map(|t| t.unwrap().1).collect()
    }

    #[test]
    fn test_ctl_seq() {
        let toks = token_kinds("\\alpha\\beta2 \\, x");
        assert_eq!(
            toks,
            vec![
                TokenKind::CtlWord("alpha".to_string()),
                TokenKind::CtlWord("beta".to_string()),
                TokenKind::Char('2'),
                TokenKind::CtlSym(','),
                TokenKind::Char('x'),
            ]
        );
    }

    #[test]
    fn test_scripts_and_braces() {
        let toks = token_kinds("x_{0}^2");
        assert_eq!(
            toks,
            vec![
                TokenKind::Char('x'),
                TokenKind::Indice,
                TokenKind::BraceOpen,
                TokenKind::Char('0'),
                TokenKind::BraceClose,
                TokenKind::Power,
                TokenKind::Char('2'),
            ]
        );
    }

    #[test]
    fn test_comment_skipped() {
        let toks = token_kinds("a % trailing note\n+b");
        assert_eq!(
            toks,
            vec![TokenKind::Char('a'), TokenKind::Char('+'), TokenKind::Char('b')]
        );
    }

    #[test]
    fn test_trailing_backslash() {
        let result: Result<Vec<_>, _> = tokenize("x\\").collect();
        assert_eq!(result, Err(AtomError::UnexpectedEnd(1)));
    }

    #[test]
    fn test_raw_group() {
        let mut tokens = tokenize(" {a {b} c}d");
        assert_eq!(tokens.raw_group().unwrap(), Some("a {b} c"));
        assert_eq!(tokens.next().unwrap().unwrap().1, TokenKind::Char('d'));

        let mut tokens = tokenize("{open");
        assert_eq!(tokens.raw_group(), Err(AtomError::UnbalancedBrace(0)));

        let mut tokens = tokenize("x");
        assert_eq!(tokens.raw_group().unwrap(), None);
        assert_eq!(tokens.next().unwrap().unwrap().1, TokenKind::Char('x'));
    }

    #[test]
    fn test_environment_body() {
        let mut tokens = tokenize("a & b \\\\ c & d\\end{matrix}+1");
        assert_eq!(tokens.environment_body("matrix").unwrap(), "a & b \\\\ c & d");
        assert_eq!(tokens.next().unwrap().unwrap().1, TokenKind::Char('+'));
    }
}
