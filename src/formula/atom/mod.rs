// Atom model - laid-out math primitives consumed by the parser
//
// Atoms are the visual units of a rendered formula: symbols, operators,
// fences, fractions, radicals and script carriers. The parser only reads
// them; the LaTeX adapter in `latex.rs` builds them from source text.

mod latex;
mod lex;

pub use latex::atoms_from_latex;

use crate::formula::ast::FontVariant;

/// Visual classification of an atom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomKind {
    /// Identifier, ordinary symbol or digit
    Ord,
    /// Binary operator such as `+` or `\cdot`
    Bin,
    /// Relation such as `=` or `\le`
    Rel,
    /// Punctuation such as `,`
    Punct,
    /// Large operator or named function
    Op,
    /// Opening fence
    Open,
    /// Closing fence
    Close,
    /// Fence with an explicit size (`\big(`)
    SizedDelim,
    /// `\left ... \right` pair with its body
    LeftRight,
    /// `\middle` separator inside a `\left ... \right` body
    Middle,
    /// Generalized fraction (`\frac`, `\binom`)
    Genfrac,
    /// Radical with optional index
    Surd,
    /// Styled run (`\mathbf{...}`)
    Font,
    /// Literal text run
    Text,
    /// Invisible brace group
    Group,
    /// Script carrier with no base of its own
    SupSub,
    /// Horizontal spacing
    Space,
    /// Empty slot
    Placeholder,
    Accent,
    Array,
    Enclose,
    Box,
    Unknown,
}

/// A laid-out math primitive.
///
/// Children that an atom kind does not use stay `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub kind: AtomKind,
    /// Raw textual form (`x`, `7`, `\alpha`, `(`)
    pub value: String,
    pub body: Option<Vec<Atom>>,
    pub superscript: Option<Vec<Atom>>,
    pub subscript: Option<Vec<Atom>>,
    pub numerator: Option<Vec<Atom>>,
    pub denominator: Option<Vec<Atom>>,
    /// Radical index
    pub index: Option<Vec<Atom>>,
    /// Opening fence of a `LeftRight` or a fenced `Genfrac`; empty for `\left.`
    pub left: Option<String>,
    /// Closing fence of a `LeftRight` or a fenced `Genfrac`; empty for `\right.`
    pub right: Option<String>,
    /// Fraction bar present (`\frac` yes, `\binom` no)
    pub has_bar: bool,
    pub variant: Option<FontVariant>,
}

impl Atom {
    pub fn new(kind: AtomKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            body: None,
            superscript: None,
            subscript: None,
            numerator: None,
            denominator: None,
            index: None,
            left: None,
            right: None,
            has_bar: false,
            variant: None,
        }
    }

    pub fn ord(value: impl Into<String>) -> Self {
        Self::new(AtomKind::Ord, value)
    }

    pub fn bin(value: impl Into<String>) -> Self {
        Self::new(AtomKind::Bin, value)
    }

    pub fn rel(value: impl Into<String>) -> Self {
        Self::new(AtomKind::Rel, value)
    }

    pub fn punct(value: impl Into<String>) -> Self {
        Self::new(AtomKind::Punct, value)
    }

    pub fn op(value: impl Into<String>) -> Self {
        Self::new(AtomKind::Op, value)
    }

    pub fn open(value: impl Into<String>) -> Self {
        Self::new(AtomKind::Open, value)
    }

    pub fn close(value: impl Into<String>) -> Self {
        Self::new(AtomKind::Close, value)
    }

    pub fn space(value: impl Into<String>) -> Self {
        Self::new(AtomKind::Space, value)
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(AtomKind::Text, value)
    }

    /// Invisible brace group around `body`
    pub fn group(body: Vec<Atom>) -> Self {
        Self::new(AtomKind::Group, "").with_body(body)
    }

    /// Fraction with a bar
    pub fn frac(numerator: Vec<Atom>, denominator: Vec<Atom>) -> Self {
        let mut atom = Self::new(AtomKind::Genfrac, "\\frac");
        atom.numerator = Some(numerator);
        atom.denominator = Some(denominator);
        atom.has_bar = true;
        atom
    }

    /// Radical with an optional index
    pub fn surd(radicand: Vec<Atom>, index: Option<Vec<Atom>>) -> Self {
        let mut atom = Self::new(AtomKind::Surd, "\\sqrt").with_body(radicand);
        atom.index = index;
        atom
    }

    /// `\left ... \right` pair; an empty side is a missing fence
    pub fn left_right(left: impl Into<String>, body: Vec<Atom>, right: impl Into<String>) -> Self {
        let mut atom = Self::new(AtomKind::LeftRight, "").with_body(body);
        atom.left = Some(left.into());
        atom.right = Some(right.into());
        atom
    }

    /// Styled run
    pub fn font(variant: FontVariant, body: Vec<Atom>) -> Self {
        let mut atom = Self::new(AtomKind::Font, variant.latex_command()).with_body(body);
        atom.variant = Some(variant);
        atom
    }

    /// Stand-alone script carrier
    pub fn sup_sub(superscript: Option<Vec<Atom>>, subscript: Option<Vec<Atom>>) -> Self {
        let mut atom = Self::new(AtomKind::SupSub, "");
        atom.superscript = superscript;
        atom.subscript = subscript;
        atom
    }

    pub fn with_body(mut self, body: Vec<Atom>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_superscript(mut self, sup: Vec<Atom>) -> Self {
        self.superscript = Some(sup);
        self
    }

    pub fn with_subscript(mut self, sub: Vec<Atom>) -> Self {
        self.subscript = Some(sub);
        self
    }

    pub fn has_scripts(&self) -> bool {
        self.superscript.is_some() || self.subscript.is_some()
    }

    /// Whether the atom is a single decimal digit
    pub fn is_digit(&self) -> bool {
        self.kind == AtomKind::Ord && self.value.len() == 1 && self.value.as_bytes()[0].is_ascii_digit()
    }

    /// Whether the atom is an ordinary atom with exactly this text
    pub fn is_ord(&self, value: &str) -> bool {
        self.kind == AtomKind::Ord && self.value == value
    }

    /// Whether this is a brace group holding exactly a comma (`{,}`)
    pub fn is_braced_comma(&self) -> bool {
        self.kind == AtomKind::Group
            && !self.has_scripts()
            && matches!(self.body.as_deref(), Some([inner]) if inner.value == "," && !inner.has_scripts())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_detection() {
        assert!(Atom::ord("7").is_digit());
        assert!(!Atom::ord("x").is_digit());
        assert!(!Atom::ord("12").is_digit());
        assert!(!Atom::bin("7").is_digit());
    }

    #[test]
    fn test_braced_comma() {
        assert!(Atom::group(vec![Atom::punct(",")]).is_braced_comma());
        assert!(!Atom::group(vec![Atom::punct(","), Atom::ord("1")]).is_braced_comma());
        assert!(!Atom::punct(",").is_braced_comma());
    }

    #[test]
    fn test_font_atom_records_variant() {
        let atom = Atom::font(FontVariant::Bold, vec![Atom::ord("v")]);
        assert_eq!(atom.kind, AtomKind::Font);
        assert_eq!(atom.value, "\\mathbf");
        assert_eq!(atom.variant, Some(FontVariant::Bold));
    }
}
