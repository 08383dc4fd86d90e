use serde::{Deserialize, Serialize};

/// Numeric payload of a number literal.
///
/// Rational literals keep the exact text `"p/q"` so that fractions typed as
/// fractions never pass through floating point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Number {
    Float(f64),
    Rational(String),
}

/// Largest magnitude at which every integer is exactly representable
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Number {
    /// Build a rational literal, moving the sign onto the numerator
    pub fn rational(numer: i64, denom: i64) -> Self {
        let (numer, denom) = if denom < 0 {
            (-numer, -denom)
        } else {
            (numer, denom)
        };
        let mut text = String::with_capacity(24);
        let mut buf = itoa::Buffer::new();
        text.push_str(buf.format(numer));
        text.push('/');
        text.push_str(buf.format(denom));
        Number::Rational(text)
    }

    /// Integer value of a float literal, if it is integral and exact
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Number::Float(v) if v.is_finite() && v.fract() == 0.0 && v.abs() <= MAX_EXACT_INTEGER => {
                Some(*v as i64)
            },
            _ => None,
        }
    }

    /// Numerator and denominator of a rational literal
    pub fn rational_parts(&self) -> Option<(i64, i64)> {
        match self {
            Number::Rational(text) => parse_rational(text),
            Number::Float(_) => None,
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Number::Float(v) => v.is_sign_negative() && *v != 0.0,
            Number::Rational(text) => text.starts_with('-'),
        }
    }

    /// Flip the sign, keeping rationals exact
    pub fn negate(self) -> Self {
        match self {
            Number::Float(v) => Number::Float(-v),
            Number::Rational(text) => match text.strip_prefix('-') {
                Some(rest) => Number::Rational(rest.to_string()),
                None => Number::Rational(format!("-{text}")),
            },
        }
    }
}

/// Split `"p/q"` into its integer parts.
pub fn parse_rational(text: &str) -> Option<(i64, i64)> {
    let (numer, denom) = text.split_once('/')?;
    let numer = numer.trim().parse::<i64>().ok()?;
    let denom = denom.trim().parse::<i64>().ok()?;
    Some((numer, denom))
}

/// Delimiters surrounding a group, an application argument or a complex number.
///
/// Sides hold canonical fence glyphs; an empty string marks a missing side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fence {
    pub open: String,
    pub close: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub middle: String,
}

impl Fence {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
            middle: String::new(),
        }
    }

    pub fn parens() -> Self {
        Self::new("(", ")")
    }

    pub fn with_middle(mut self, middle: impl Into<String>) -> Self {
        self.middle = middle.into();
        self
    }

    pub fn is_parens(&self) -> bool {
        self.open == "(" && self.close == ")"
    }
}

/// Font variant of a styled symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontVariant {
    Normal,
    Bold,
    Italic,
    BoldItalic,
    SansSerif,
    Monospace,
    Script,
    Fraktur,
    DoubleStruck,
}

impl FontVariant {
    /// Variant selected by a font command such as `mathbf`
    pub fn from_command(command: &str) -> Option<Self> {
        match command {
            "mathrm" | "operatorname" | "rm" | "mathup" => Some(FontVariant::Normal),
            "mathbf" | "bf" => Some(FontVariant::Bold),
            "mathit" | "it" => Some(FontVariant::Italic),
            "boldsymbol" | "bm" => Some(FontVariant::BoldItalic),
            "mathsf" | "sf" => Some(FontVariant::SansSerif),
            "mathtt" | "tt" => Some(FontVariant::Monospace),
            "mathcal" | "mathscr" | "cal" => Some(FontVariant::Script),
            "mathfrak" | "frak" => Some(FontVariant::Fraktur),
            "mathbb" | "Bbb" => Some(FontVariant::DoubleStruck),
            _ => None,
        }
    }

    /// LaTeX command wrapping a symbol in this variant
    pub fn latex_command(self) -> &'static str {
        match self {
            FontVariant::Normal => "\\mathrm",
            FontVariant::Bold => "\\mathbf",
            FontVariant::Italic => "\\mathit",
            FontVariant::BoldItalic => "\\boldsymbol",
            FontVariant::SansSerif => "\\mathsf",
            FontVariant::Monospace => "\\mathtt",
            FontVariant::Script => "\\mathcal",
            FontVariant::Fraktur => "\\mathfrak",
            FontVariant::DoubleStruck => "\\mathbb",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rational_sign_normalized() {
        assert_eq!(Number::rational(1, -3), Number::Rational("-1/3".to_string()));
        assert_eq!(Number::rational(-2, -4), Number::Rational("2/4".to_string()));
    }

    #[test]
    fn test_as_integer() {
        assert_eq!(Number::Float(42.0).as_integer(), Some(42));
        assert_eq!(Number::Float(-7.0).as_integer(), Some(-7));
        assert_eq!(Number::Float(0.5).as_integer(), None);
        assert_eq!(Number::Float(f64::INFINITY).as_integer(), None);
        assert_eq!(Number::Rational("1/2".to_string()).as_integer(), None);
    }

    #[test]
    fn test_negate_rational() {
        let n = Number::Rational("3/4".to_string()).negate();
        assert_eq!(n, Number::Rational("-3/4".to_string()));
        assert!(n.is_negative());
        assert_eq!(n.negate(), Number::Rational("3/4".to_string()));
    }

    #[test]
    fn test_font_variant_round_trip() {
        let variant = FontVariant::from_command("mathbf").unwrap();
        assert_eq!(variant, FontVariant::Bold);
        assert_eq!(variant.latex_command(), "\\mathbf");
        assert_eq!(FontVariant::from_command("frac"), None);
    }
}
