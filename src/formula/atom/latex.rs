// LaTeX to atom adapter
//
// Builds the atom sequence an editor would hand to the parser from math-mode
// LaTeX source. Scripts attach to the preceding atom when it can carry them;
// otherwise they produce a stand-alone `SupSub` carrier.

use phf::phf_set;

use super::lex::{self, Token, TokenKind, Tokenizer};
use super::{Atom, AtomKind};
use crate::formula::ast::FontVariant;
use crate::formula::delimiters::{is_closing_glyph, is_symmetric, normalize_fence, right_of};
use crate::formula::error::AtomError;

static BIN_COMMANDS: phf::Set<&'static str> = phf_set! {
    "cdot", "times", "div", "pm", "mp", "ast", "star", "circ", "bullet",
    "setminus", "cup", "cap", "wedge", "land", "vee", "lor", "bmod", "mod", "oplus", "otimes",
};

static REL_COMMANDS: phf::Set<&'static str> = phf_set! {
    "le", "leq", "ge", "geq", "ne", "neq", "lt", "gt", "approx", "equiv", "sim", "simeq",
    "cong", "propto", "in", "notin", "ni", "subset", "subseteq", "supset", "supseteq",
    "to", "rightarrow", "leftarrow", "Rightarrow", "Leftarrow", "implies", "iff",
    "Leftrightarrow", "mapsto", "parallel", "perp", "mid",
};

/// Commands typeset as upright operator names
static OP_COMMANDS: phf::Set<&'static str> = phf_set! {
    "sin", "cos", "tan", "cot", "sec", "csc", "arcsin", "arccos", "arctan",
    "sinh", "cosh", "tanh", "coth", "log", "ln", "lg", "exp",
    "det", "dim", "ker", "deg", "arg", "gcd", "hom", "Pr",
    "max", "min", "sup", "inf", "lim", "limsup", "liminf",
    "sum", "prod", "coprod", "int", "iint", "iiint", "oint", "bigcup", "bigcap",
};

static ACCENT_COMMANDS: phf::Set<&'static str> = phf_set! {
    "hat", "widehat", "bar", "overline", "underline", "vec", "overrightarrow",
    "overleftarrow", "dot", "ddot", "tilde", "widetilde", "check", "breve",
    "acute", "grave", "mathring", "overbrace", "underbrace",
};

static ENCLOSE_COMMANDS: phf::Set<&'static str> = phf_set! {
    "cancel", "bcancel", "xcancel", "sout",
};

static SPACE_COMMANDS: phf::Set<&'static str> = phf_set! {
    "quad", "qquad", "thinspace", "medspace", "thickspace", "enspace", "negthinspace",
};

/// Style switches with no effect on meaning
static IGNORED_COMMANDS: phf::Set<&'static str> = phf_set! {
    "limits", "nolimits", "displaystyle", "textstyle", "scriptstyle",
    "scriptscriptstyle", "relax",
};

static TEXT_COMMANDS: phf::Set<&'static str> = phf_set! {
    "text", "textrm", "textit", "textbf", "textsf", "texttt", "mbox", "textnormal",
};

/// Convert math-mode LaTeX into an atom sequence.
///
/// # Example
///
/// ```ignore
/// let atoms = atoms_from_latex("\\frac{1}{2}x")?;
/// assert_eq!(atoms.len(), 2);
/// ```
pub fn atoms_from_latex(src: &str) -> Result<Vec<Atom>, AtomError> {
    let mut builder = AtomBuilder {
        tokens: lex::tokenize(src),
        left_depth: 0,
        src_len: src.len(),
    };
    builder.list(Stop::End)
}

/// What ends the atom list being read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    End,
    /// `}` matching the brace opened at this offset
    Brace(usize),
    /// `]` closing a radical index
    Bracket,
    /// `\right`
    Right,
}

struct AtomBuilder<'a> {
    tokens: Tokenizer<'a>,
    left_depth: usize,
    src_len: usize,
}

impl<'a> AtomBuilder<'a> {
    fn list(&mut self, stop: Stop) -> Result<Vec<Atom>, AtomError> {
        let mut atoms = Vec::new();
        loop {
            let Some(token) = self.tokens.next() else {
                return match stop {
                    Stop::End => Ok(atoms),
                    Stop::Brace(pos) => Err(AtomError::UnbalancedBrace(pos)),
                    Stop::Bracket | Stop::Right => Err(AtomError::UnexpectedEnd(self.src_len)),
                };
            };
            let Token(pos, kind) = token?;
            match kind {
                TokenKind::BraceClose => {
                    if matches!(stop, Stop::Brace(_)) {
                        return Ok(atoms);
                    }
                    return Err(AtomError::UnexpectedClosingBrace(pos));
                },
                TokenKind::BracketClose if stop == Stop::Bracket => return Ok(atoms),
                TokenKind::CtlWord(ref word) if word == "right" => {
                    if stop == Stop::Right {
                        return Ok(atoms);
                    }
                    return Err(AtomError::UnmatchedRight("right".to_string()));
                },
                TokenKind::Power => {
                    let script = self.script(pos)?;
                    attach_script(&mut atoms, script, true);
                },
                TokenKind::Indice => {
                    let script = self.script(pos)?;
                    attach_script(&mut atoms, script, false);
                },
                other => self.token(pos, other, &mut atoms)?,
            }
        }
    }

    /// Append the atoms produced by one token
    fn token(&mut self, pos: usize, kind: TokenKind, atoms: &mut Vec<Atom>) -> Result<(), AtomError> {
        match kind {
            TokenKind::BraceOpen => {
                let body = self.list(Stop::Brace(pos))?;
                atoms.push(Atom::group(body));
            },
            TokenKind::BracketOpen => atoms.push(Atom::open("[")),
            TokenKind::BracketClose => atoms.push(Atom::close("]")),
            TokenKind::CtlWord(word) => self.command(pos, &word, atoms)?,
            TokenKind::CtlSym(c) => atoms.push(control_symbol(c)),
            TokenKind::Char(c) => atoms.push(char_atom(c)),
            TokenKind::BraceClose => return Err(AtomError::UnexpectedClosingBrace(pos)),
            TokenKind::Power | TokenKind::Indice => return Err(AtomError::UnexpectedEnd(pos)),
        }
        Ok(())
    }

    /// Argument of `^` or `_`
    fn script(&mut self, pos: usize) -> Result<Vec<Atom>, AtomError> {
        match self.tokens.next() {
            Some(token) => {
                let Token(at, kind) = token?;
                self.single(at, kind)
            },
            None => Err(AtomError::UnexpectedEnd(pos)),
        }
    }

    /// Mandatory argument of a command
    fn argument(&mut self, command: &str, pos: usize) -> Result<Vec<Atom>, AtomError> {
        let missing = || AtomError::MissingArgument {
            command: command.to_string(),
            pos,
        };
        let Some(token) = self.tokens.next() else {
            return Err(missing());
        };
        let Token(at, kind) = token?;
        self.single(at, kind).map_err(|e| match e {
            AtomError::UnexpectedEnd(_) => missing(),
            other => other,
        })
    }

    /// A braced group or a single token
    fn single(&mut self, pos: usize, kind: TokenKind) -> Result<Vec<Atom>, AtomError> {
        match kind {
            TokenKind::BraceOpen => self.list(Stop::Brace(pos)),
            TokenKind::BraceClose | TokenKind::Power | TokenKind::Indice => Err(AtomError::UnexpectedEnd(pos)),
            other => {
                let mut atoms = Vec::with_capacity(1);
                self.token(pos, other, &mut atoms)?;
                Ok(atoms)
            },
        }
    }

    /// Verbatim `{...}` argument of a text-like command
    fn raw_argument(&mut self, command: &str, pos: usize) -> Result<&'a str, AtomError> {
        self.tokens.raw_group()?.ok_or_else(|| AtomError::MissingArgument {
            command: command.to_string(),
            pos,
        })
    }

    /// Fence following `\left`, `\right`, `\middle` or `\big`
    fn delimiter(&mut self, command: &str, pos: usize) -> Result<&'static str, AtomError> {
        let missing = || AtomError::MissingDelimiter {
            command: command.to_string(),
            pos,
        };
        let token = match self.tokens.next() {
            Some(token) => token?,
            None => return Err(missing()),
        };
        let glyph = match token.1 {
            TokenKind::Char(c) => {
                let mut buf = [0u8; 4];
                normalize_fence(c.encode_utf8(&mut buf))
            },
            TokenKind::CtlSym(c) => normalize_fence(&format!("\\{c}")),
            TokenKind::CtlWord(word) => normalize_fence(&format!("\\{word}")),
            TokenKind::BracketOpen => Some("["),
            TokenKind::BracketClose => Some("]"),
            _ => None,
        };
        glyph.ok_or_else(missing)
    }

    fn command(&mut self, pos: usize, word: &str, atoms: &mut Vec<Atom>) -> Result<(), AtomError> {
        match word {
            "frac" | "dfrac" | "tfrac" | "cfrac" => {
                let numerator = self.argument(word, pos)?;
                let denominator = self.argument(word, pos)?;
                atoms.push(Atom::frac(numerator, denominator));
            },
            "binom" | "dbinom" | "tbinom" => {
                let mut atom = Atom::frac(self.argument(word, pos)?, self.argument(word, pos)?);
                atom.value = "\\binom".to_string();
                atom.has_bar = false;
                atom.left = Some("(".to_string());
                atom.right = Some(")".to_string());
                atoms.push(atom);
            },
            "sqrt" => {
                let index = if self.tokens.eat(&TokenKind::BracketOpen) {
                    Some(self.list(Stop::Bracket)?)
                } else {
                    None
                };
                let radicand = self.argument(word, pos)?;
                atoms.push(Atom::surd(radicand, index));
            },
            "left" => {
                let left = self.delimiter(word, pos)?;
                self.left_depth += 1;
                let body = self.list(Stop::Right);
                self.left_depth -= 1;
                let body = body?;
                let right = self.delimiter("right", pos)?;
                atoms.push(Atom::left_right(left, body, right));
            },
            "middle" => {
                if self.left_depth == 0 {
                    return Err(AtomError::UnmatchedRight("middle".to_string()));
                }
                let glyph = self.delimiter(word, pos)?;
                atoms.push(Atom::new(AtomKind::Middle, glyph));
            },
            "big" | "Big" | "bigg" | "Bigg" | "bigl" | "Bigl" | "biggl" | "Biggl" | "bigr"
            | "Bigr" | "biggr" | "Biggr" | "bigm" | "Bigm" | "biggm" | "Biggm" => {
                let glyph = self.delimiter(word, pos)?;
                atoms.push(Atom::new(AtomKind::SizedDelim, glyph));
            },
            "operatorname" => {
                let name = self.raw_argument(word, pos)?;
                let mut atom = Atom::op(name.trim());
                atom.variant = Some(FontVariant::Normal);
                atoms.push(atom);
            },
            "begin" => {
                let name = self.raw_argument(word, pos)?.trim();
                self.tokens.environment_body(name)?;
                atoms.push(Atom::new(AtomKind::Array, name));
            },
            "colorbox" => {
                self.raw_argument(word, pos)?;
                let body = self.argument(word, pos)?;
                atoms.push(Atom::new(AtomKind::Box, "\\colorbox").with_body(body));
            },
            "boxed" | "fbox" => {
                let body = self.argument(word, pos)?;
                atoms.push(Atom::new(AtomKind::Box, format!("\\{word}")).with_body(body));
            },
            "hspace" => {
                self.raw_argument(word, pos)?;
                atoms.push(Atom::space("\\hspace"));
            },
            "placeholder" => {
                self.tokens.raw_group()?;
                atoms.push(Atom::new(AtomKind::Placeholder, ""));
            },
            "not" => {
                // only the common negated relations are recognized
                if self.tokens.eat(&TokenKind::Char('=')) {
                    atoms.push(Atom::rel("\\ne"));
                } else if self.tokens.eat(&TokenKind::CtlWord("in".to_string())) {
                    atoms.push(Atom::rel("\\notin"));
                }
            },
            _ if TEXT_COMMANDS.contains(word) => {
                let text = self.raw_argument(word, pos)?;
                atoms.push(Atom::text(text));
            },
            _ if ACCENT_COMMANDS.contains(word) => {
                let body = self.argument(word, pos)?;
                atoms.push(Atom::new(AtomKind::Accent, format!("\\{word}")).with_body(body));
            },
            _ if ENCLOSE_COMMANDS.contains(word) => {
                let body = self.argument(word, pos)?;
                atoms.push(Atom::new(AtomKind::Enclose, format!("\\{word}")).with_body(body));
            },
            _ if IGNORED_COMMANDS.contains(word) => {},
            _ if SPACE_COMMANDS.contains(word) => atoms.push(Atom::space(format!("\\{word}"))),
            _ => {
                if let Some(variant) = FontVariant::from_command(word) {
                    let body = self.argument(word, pos)?;
                    atoms.push(Atom::font(variant, body));
                } else {
                    atoms.push(command_atom(word));
                }
            },
        }
        Ok(())
    }
}

/// Atom for a command that takes no argument
fn command_atom(word: &str) -> Atom {
    let raw = format!("\\{word}");
    if OP_COMMANDS.contains(word) {
        return Atom::op(raw);
    }
    if BIN_COMMANDS.contains(word) {
        return Atom::bin(raw);
    }
    if REL_COMMANDS.contains(word) {
        return Atom::rel(raw);
    }
    match normalize_fence(&raw) {
        Some(glyph) if !glyph.is_empty() => fence_atom(glyph, word.starts_with('l'), word.starts_with('r')),
        _ => Atom::ord(raw),
    }
}

/// Fence atom for a canonical glyph; symmetric bars are sided only when the
/// spelling says so (`\lvert`, `\rvert`)
fn fence_atom(glyph: &str, left: bool, right: bool) -> Atom {
    if is_symmetric(glyph) {
        if left {
            Atom::open(glyph)
        } else if right {
            Atom::close(glyph)
        } else {
            Atom::ord(glyph)
        }
    } else if right_of(glyph).is_some() {
        Atom::open(glyph)
    } else if is_closing_glyph(glyph) {
        Atom::close(glyph)
    } else {
        Atom::ord(glyph)
    }
}

fn control_symbol(c: char) -> Atom {
    match c {
        ',' | ';' | ':' | '!' | ' ' | '>' => Atom::space(format!("\\{c}")),
        '{' => Atom::open("{"),
        '}' => Atom::close("}"),
        '|' => Atom::ord("‖"),
        '%' => Atom::ord("\\%"),
        '#' | '&' | '$' | '_' => Atom::ord(c.to_string()),
        _ => Atom::new(AtomKind::Unknown, format!("\\{c}")),
    }
}

fn char_atom(c: char) -> Atom {
    let value = c.to_string();
    match c {
        '+' | '-' | '*' | '/' | '−' | '×' | '÷' | '·' | '⋅' | '±' | '∓' | '∪' | '∩' | '∖' | '∧'
        | '∨' => Atom::bin(value),
        '=' | '<' | '>' | ':' | '≤' | '≥' | '≠' | '≈' | '≡' | '∼' | '∈' | '∉' | '⊂' | '⊆' | '⊃'
        | '⊇' | '→' | '⇒' | '⇔' => Atom::rel(value),
        ',' | ';' => Atom::punct(value),
        '(' | '⌊' | '⌈' | '⟨' => Atom::open(value),
        ')' | '⌋' | '⌉' | '⟩' => Atom::close(value),
        '~' => Atom::space(value),
        '&' | '#' | '$' => Atom::new(AtomKind::Unknown, value),
        _ => Atom::ord(value),
    }
}

/// Whether scripts written after this atom belong to it
fn carries_scripts(atom: &Atom) -> bool {
    match atom.kind {
        AtomKind::Ord => atom.value != "|" && atom.value != "‖",
        AtomKind::Op
        | AtomKind::Font
        | AtomKind::Text
        | AtomKind::Group
        | AtomKind::Genfrac
        | AtomKind::Surd
        | AtomKind::LeftRight
        | AtomKind::Placeholder
        | AtomKind::SupSub
        | AtomKind::Accent
        | AtomKind::Enclose
        | AtomKind::Box
        | AtomKind::Array => true,
        _ => false,
    }
}

fn attach_script(atoms: &mut Vec<Atom>, script: Vec<Atom>, superscript: bool) {
    if let Some(last) = atoms.last_mut().filter(|a| carries_scripts(a)) {
        let slot = if superscript {
            &mut last.superscript
        } else {
            &mut last.subscript
        };
        if slot.is_none() {
            *slot = Some(script);
            return;
        }
    }
    let carrier = if superscript {
        Atom::sup_sub(Some(script), None)
    } else {
        Atom::sup_sub(None, Some(script))
    };
    atoms.push(carrier);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(atoms: &[Atom]) -> Vec<&str> {
        atoms.iter().map(|a| a.value.as_str()).collect()
    }

    #[test]
    fn test_digits_and_letters() {
        let atoms = atoms_from_latex("12x").unwrap();
        assert_eq!(values(&atoms), vec!["1", "2", "x"]);
        assert!(atoms.iter().all(|a| a.kind == AtomKind::Ord));
    }

    #[test]
    fn test_operators() {
        let atoms = atoms_from_latex("a+b\\cdot c\\le d").unwrap();
        let kinds: Vec<_> = atoms.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AtomKind::Ord,
                AtomKind::Bin,
                AtomKind::Ord,
                AtomKind::Bin,
                AtomKind::Ord,
                AtomKind::Rel,
                AtomKind::Ord,
            ]
        );
        assert_eq!(atoms[3].value, "\\cdot");
    }

    #[test]
    fn test_scripts_attach_to_previous() {
        let atoms = atoms_from_latex("x^2_{i}").unwrap();
        assert_eq!(atoms.len(), 1);
        assert_eq!(values(atoms[0].superscript.as_ref().unwrap()), vec!["2"]);
        assert_eq!(values(atoms[0].subscript.as_ref().unwrap()), vec!["i"]);
    }

    #[test]
    fn test_script_after_close_is_carrier() {
        let atoms = atoms_from_latex("(x)^2").unwrap();
        assert_eq!(atoms.len(), 4);
        assert_eq!(atoms[2].kind, AtomKind::Close);
        assert_eq!(atoms[3].kind, AtomKind::SupSub);
        assert!(atoms[3].superscript.is_some());
    }

    #[test]
    fn test_fraction_and_radical() {
        let atoms = atoms_from_latex("\\frac12\\sqrt[3]{x}").unwrap();
        assert_eq!(atoms[0].kind, AtomKind::Genfrac);
        assert!(atoms[0].has_bar);
        assert_eq!(values(atoms[0].numerator.as_ref().unwrap()), vec!["1"]);
        assert_eq!(values(atoms[0].denominator.as_ref().unwrap()), vec!["2"]);
        assert_eq!(atoms[1].kind, AtomKind::Surd);
        assert_eq!(values(atoms[1].index.as_ref().unwrap()), vec!["3"]);
        assert_eq!(values(atoms[1].body.as_ref().unwrap()), vec!["x"]);
    }

    #[test]
    fn test_binom() {
        let atoms = atoms_from_latex("\\binom{n}{k}").unwrap();
        assert_eq!(atoms[0].kind, AtomKind::Genfrac);
        assert!(!atoms[0].has_bar);
        assert_eq!(atoms[0].left.as_deref(), Some("("));
    }

    #[test]
    fn test_left_right() {
        let atoms = atoms_from_latex("\\left\\lfloor x\\middle| y\\right.").unwrap();
        assert_eq!(atoms.len(), 1);
        let atom = &atoms[0];
        assert_eq!(atom.kind, AtomKind::LeftRight);
        assert_eq!(atom.left.as_deref(), Some("⌊"));
        assert_eq!(atom.right.as_deref(), Some(""));
        let body = atom.body.as_ref().unwrap();
        assert_eq!(body[1].kind, AtomKind::Middle);
        assert_eq!(body[1].value, "|");
    }

    #[test]
    fn test_fence_commands() {
        let atoms = atoms_from_latex("\\lvert x\\rvert \\lceil y\\rceil").unwrap();
        assert_eq!(atoms[0].kind, AtomKind::Open);
        assert_eq!(atoms[0].value, "|");
        assert_eq!(atoms[2].kind, AtomKind::Close);
        assert_eq!(atoms[3].value, "⌈");
        assert_eq!(atoms[5].kind, AtomKind::Close);
    }

    #[test]
    fn test_font_text_and_operatorname() {
        let atoms = atoms_from_latex("\\mathbf{v}\\text{if } x\\operatorname{tr}").unwrap();
        assert_eq!(atoms[0].kind, AtomKind::Font);
        assert_eq!(atoms[0].variant, Some(FontVariant::Bold));
        assert_eq!(atoms[1].kind, AtomKind::Text);
        assert_eq!(atoms[1].value, "if ");
        assert_eq!(atoms[3].kind, AtomKind::Op);
        assert_eq!(atoms[3].value, "tr");
    }

    #[test]
    fn test_braced_comma_and_thin_space() {
        let atoms = atoms_from_latex("1{,}000\\,000").unwrap();
        assert!(atoms[1].is_braced_comma());
        assert_eq!(atoms[5].kind, AtomKind::Space);
    }

    #[test]
    fn test_errors() {
        assert_eq!(atoms_from_latex("{x"), Err(AtomError::UnbalancedBrace(0)));
        assert_eq!(atoms_from_latex("x}"), Err(AtomError::UnexpectedClosingBrace(1)));
        assert_eq!(
            atoms_from_latex("\\frac{1}"),
            Err(AtomError::MissingArgument {
                command: "frac".to_string(),
                pos: 0
            })
        );
        assert_eq!(
            atoms_from_latex("x\\right)"),
            Err(AtomError::UnmatchedRight("right".to_string()))
        );
        assert!(matches!(
            atoms_from_latex("\\left x"),
            Err(AtomError::MissingDelimiter { .. })
        ));
    }

    #[test]
    fn test_unclassifiable_commands() {
        let atoms = atoms_from_latex("\\hat{x}\\begin{matrix}a&b\\end{matrix}").unwrap();
        assert_eq!(atoms[0].kind, AtomKind::Accent);
        assert_eq!(atoms[1].kind, AtomKind::Array);
        assert_eq!(atoms[1].value, "matrix");
    }
}
