// Delimiter tables
//
// Fences are stored in canonical glyph form (`(`, `|`, `‖`, `⌊`, ...). The
// empty string stands for a missing side (`\left.`).

use phf::phf_map;

/// Raw fence spellings to their canonical glyph
static FENCE_GLYPHS: phf::Map<&'static str, &'static str> = phf_map! {
    "(" => "(",
    ")" => ")",
    "[" => "[",
    "]" => "]",
    "\\lbrack" => "[",
    "\\rbrack" => "]",
    "\\{" => "{",
    "\\}" => "}",
    "\\lbrace" => "{",
    "\\rbrace" => "}",
    "|" => "|",
    "\\vert" => "|",
    "\\lvert" => "|",
    "\\rvert" => "|",
    "\\|" => "‖",
    "\\Vert" => "‖",
    "\\lVert" => "‖",
    "\\rVert" => "‖",
    "‖" => "‖",
    "\\lfloor" => "⌊",
    "\\rfloor" => "⌋",
    "⌊" => "⌊",
    "⌋" => "⌋",
    "\\lceil" => "⌈",
    "\\rceil" => "⌉",
    "⌈" => "⌈",
    "⌉" => "⌉",
    "\\langle" => "⟨",
    "\\rangle" => "⟩",
    "⟨" => "⟨",
    "⟩" => "⟩",
    "<" => "⟨",
    ">" => "⟩",
    "\\ulcorner" => "┌",
    "\\urcorner" => "┐",
    "\\llcorner" => "└",
    "\\lrcorner" => "┘",
    "/" => "/",
    "\\backslash" => "\\",
    "." => "",
};

/// Opening glyph to the closing glyph it requires
static CLOSING_FENCES: phf::Map<&'static str, &'static str> = phf_map! {
    "(" => ")",
    "[" => "]",
    "{" => "}",
    "|" => "|",
    "‖" => "‖",
    "⌊" => "⌋",
    "⌈" => "⌉",
    "⟨" => "⟩",
    "┌" => "┐",
    "└" => "┘",
};

/// Matched `open + close` pairs that denote a function
static FENCE_FUNCTIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "||" => "abs",
    "‖‖" => "norm",
    "⌊⌋" => "floor",
    "⌈⌉" => "ceil",
    "┌┐" => "ucorner",
    "└┘" => "lcorner",
};

/// Trailing symbols that apply a function to what precedes them
static POSTFIX_FUNCTIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "!" => "factorial",
    "'" => "prime",
    "\\prime" => "prime",
    "′" => "prime",
    "''" => "prime2",
    "\\doubleprime" => "prime2",
    "″" => "prime2",
    "°" => "degree",
    "\\degree" => "degree",
    "%" => "percent",
    "\\%" => "percent",
    "\\dagger" => "dagger",
    "†" => "dagger",
    "\\ddagger" => "dagger2",
    "‡" => "dagger2",
};

/// Position of a digraph relative to its operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Prefix,
    Postfix,
}

/// Two-atom sequence with a fixed combined meaning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Digraph {
    pub name: &'static str,
    pub placement: Placement,
}

/// Keyed by the concatenated raw text of both atoms
static DIGRAPHS: phf::Map<&'static str, Digraph> = phf_map! {
    "∇×" => Digraph { name: "curl", placement: Placement::Prefix },
    "∇\\times" => Digraph { name: "curl", placement: Placement::Prefix },
    "\\nabla×" => Digraph { name: "curl", placement: Placement::Prefix },
    "\\nabla\\times" => Digraph { name: "curl", placement: Placement::Prefix },
    "∇·" => Digraph { name: "div", placement: Placement::Prefix },
    "∇⋅" => Digraph { name: "div", placement: Placement::Prefix },
    "∇\\cdot" => Digraph { name: "div", placement: Placement::Prefix },
    "\\nabla·" => Digraph { name: "div", placement: Placement::Prefix },
    "\\nabla⋅" => Digraph { name: "div", placement: Placement::Prefix },
    "\\nabla\\cdot" => Digraph { name: "div", placement: Placement::Prefix },
    "!!" => Digraph { name: "factorial2", placement: Placement::Postfix },
    "''" => Digraph { name: "prime2", placement: Placement::Postfix },
};

/// LaTeX spelling of canonical glyphs that are not plain characters
static FENCE_LATEX: phf::Map<&'static str, &'static str> = phf_map! {
    "{" => "\\{",
    "}" => "\\}",
    "‖" => "\\|",
    "⌊" => "\\lfloor",
    "⌋" => "\\rfloor",
    "⌈" => "\\lceil",
    "⌉" => "\\rceil",
    "⟨" => "\\langle",
    "⟩" => "\\rangle",
    "┌" => "\\ulcorner",
    "┐" => "\\urcorner",
    "└" => "\\llcorner",
    "┘" => "\\lrcorner",
    "\\" => "\\backslash",
    "" => ".",
};

/// Function selected by a matched fence pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenceFunction {
    /// Named function such as `abs`
    Named(&'static str),
    /// No mapping; carries `open + close`
    Plain(String),
}

/// Canonical glyph for a raw fence spelling
#[inline]
pub fn normalize_fence(raw: &str) -> Option<&'static str> {
    FENCE_GLYPHS.get(raw).copied()
}

/// Closing glyph required by an opening glyph
#[inline]
pub fn right_of(open: &str) -> Option<&'static str> {
    CLOSING_FENCES.get(open).copied()
}

/// Whether the glyph opens and closes with the same character
#[inline]
pub fn is_symmetric(glyph: &str) -> bool {
    right_of(glyph) == Some(glyph)
}

/// Whether the glyph can only close a fence
pub fn is_closing_glyph(glyph: &str) -> bool {
    !glyph.is_empty() && right_of(glyph).is_none() && CLOSING_FENCES.values().any(|c| *c == glyph)
}

pub fn fence_function(open: &str, close: &str) -> FenceFunction {
    let mut key = String::with_capacity(open.len() + close.len());
    key.push_str(open);
    key.push_str(close);
    match FENCE_FUNCTIONS.get(key.as_str()) {
        Some(name) => FenceFunction::Named(name),
        None => FenceFunction::Plain(key),
    }
}

#[inline]
pub fn postfix_function(raw: &str) -> Option<&'static str> {
    POSTFIX_FUNCTIONS.get(raw).copied()
}

pub fn digraph(first: &str, second: &str) -> Option<Digraph> {
    let mut key = String::with_capacity(first.len() + second.len());
    key.push_str(first);
    key.push_str(second);
    DIGRAPHS.get(key.as_str()).copied()
}

/// LaTeX spelling of a canonical glyph for use after `\left`/`\right`
pub fn fence_latex(glyph: &str) -> &str {
    FENCE_LATEX.get(glyph).copied().unwrap_or(glyph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_fence() {
        assert_eq!(normalize_fence("\\lvert"), Some("|"));
        assert_eq!(normalize_fence("\\lfloor"), Some("⌊"));
        assert_eq!(normalize_fence("\\{"), Some("{"));
        assert_eq!(normalize_fence("."), Some(""));
        assert_eq!(normalize_fence("x"), None);
    }

    #[test]
    fn test_right_of() {
        assert_eq!(right_of("("), Some(")"));
        assert_eq!(right_of("⌈"), Some("⌉"));
        assert_eq!(right_of(")"), None);
        assert!(is_symmetric("|"));
        assert!(!is_symmetric("("));
        assert!(is_closing_glyph("⌋"));
        assert!(!is_closing_glyph("|"));
    }

    #[test]
    fn test_fence_function() {
        assert_eq!(fence_function("|", "|"), FenceFunction::Named("abs"));
        assert_eq!(fence_function("⌊", "⌋"), FenceFunction::Named("floor"));
        assert_eq!(fence_function("(", ")"), FenceFunction::Plain("()".to_string()));
        assert_eq!(fence_function("(", ""), FenceFunction::Plain("(".to_string()));
    }

    #[test]
    fn test_postfix_and_digraph() {
        assert_eq!(postfix_function("!"), Some("factorial"));
        assert_eq!(postfix_function("\\prime"), Some("prime"));
        assert_eq!(postfix_function("x"), None);

        let curl = digraph("\\nabla", "\\times").unwrap();
        assert_eq!(curl.name, "curl");
        assert_eq!(curl.placement, Placement::Prefix);
        assert_eq!(digraph("!", "!").map(|d| d.name), Some("factorial2"));
        assert_eq!(digraph("\\nabla", "x"), None);
    }

    #[test]
    fn test_fence_latex() {
        assert_eq!(fence_latex("("), "(");
        assert_eq!(fence_latex("⌊"), "\\lfloor");
        assert_eq!(fence_latex(""), ".");
    }
}
