// Serialization options

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::formula::error::OptionsError;

/// When numbers switch to scientific notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScientificNotation {
    /// Only for decimal exponents of 21 and above or -7 and below
    #[default]
    Auto,
    /// Always, with the exponent a multiple of three
    Engineering,
    /// Always
    On,
}

impl ScientificNotation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Engineering => "engineering",
            Self::On => "on",
        }
    }
}

impl FromStr for ScientificNotation {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "engineering" => Ok(Self::Engineering),
            "on" | "scientific" => Ok(Self::On),
            _ => Err(OptionsError::UnknownNotation(s.to_string())),
        }
    }
}

impl fmt::Display for ScientificNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric and operator formatting policy of the serializer.
///
/// Every field has a default, so a YAML document only needs to name the
/// fields it changes:
///
/// ```yaml
/// precision: 6
/// group_separator: "\\,"
/// scientific_notation: engineering
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatexOptions {
    /// Maximum number of significant digits
    pub precision: usize,
    pub decimal_marker: String,
    /// Separator between digit groups of three; empty disables grouping
    pub group_separator: String,
    /// Explicit product between operands
    pub product: String,
    /// Product between a mantissa and its power of ten
    pub exponent_product: String,
    /// Replaces `{exponent_product}10^{n}` when set (`e`, `\mathrm{E}`)
    pub exponent_marker: String,
    pub scientific_notation: ScientificNotation,
    /// Opens a repeating digit cycle; empty disables cycle detection
    pub begin_repeating_digits: String,
    pub end_repeating_digits: String,
    /// Appended to a fraction cut short by the precision
    pub truncation_marker: String,
}

impl Default for LatexOptions {
    fn default() -> Self {
        Self {
            precision: 15,
            decimal_marker: ".".to_string(),
            group_separator: String::new(),
            product: "\\cdot".to_string(),
            exponent_product: "\\cdot".to_string(),
            exponent_marker: String::new(),
            scientific_notation: ScientificNotation::Auto,
            begin_repeating_digits: "\\overline{".to_string(),
            end_repeating_digits: "}".to_string(),
            truncation_marker: "\\ldots".to_string(),
        }
    }
}

impl LatexOptions {
    /// Load options from YAML, keeping defaults for missing fields
    pub fn from_yaml(yaml: &str) -> Result<Self, OptionsError> {
        let options: Self = serde_saphyr::from_str(yaml).map_err(|e| OptionsError::Yaml(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.precision == 0 {
            return Err(OptionsError::ZeroPrecision);
        }
        Ok(())
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_group_separator(mut self, separator: impl Into<String>) -> Self {
        self.group_separator = separator.into();
        self
    }

    pub fn with_decimal_marker(mut self, marker: impl Into<String>) -> Self {
        self.decimal_marker = marker.into();
        self
    }

    pub fn with_scientific_notation(mut self, notation: ScientificNotation) -> Self {
        self.scientific_notation = notation;
        self
    }

    pub fn with_exponent_marker(mut self, marker: impl Into<String>) -> Self {
        self.exponent_marker = marker.into();
        self
    }

    /// Enable or disable repeating-digit overlines
    pub fn with_repeating_digits(mut self, begin: impl Into<String>, end: impl Into<String>) -> Self {
        self.begin_repeating_digits = begin.into();
        self.end_repeating_digits = end.into();
        self
    }

    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = product.into();
        self
    }

    /// Export as YAML, the inverse of [`LatexOptions::from_yaml`]
    pub fn to_yaml(&self) -> Result<String, OptionsError> {
        serde_saphyr::to_string(self).map_err(|e| OptionsError::Yaml(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LatexOptions::default();
        assert_eq!(options.precision, 15);
        assert_eq!(options.decimal_marker, ".");
        assert!(options.group_separator.is_empty());
        assert_eq!(options.scientific_notation, ScientificNotation::Auto);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_notation_from_str() {
        assert_eq!("auto".parse::<ScientificNotation>().unwrap(), ScientificNotation::Auto);
        assert_eq!(" Engineering ".parse::<ScientificNotation>().unwrap(), ScientificNotation::Engineering);
        assert_eq!("on".parse::<ScientificNotation>().unwrap(), ScientificNotation::On);
        assert!(matches!(
            "sometimes".parse::<ScientificNotation>(),
            Err(OptionsError::UnknownNotation(_))
        ));
        assert_eq!(ScientificNotation::Engineering.to_string(), "engineering");
    }

    #[test]
    fn test_from_yaml_keeps_defaults() {
        let options = LatexOptions::from_yaml("precision: 6\nscientific_notation: engineering\n").unwrap();
        assert_eq!(options.precision, 6);
        assert_eq!(options.scientific_notation, ScientificNotation::Engineering);
        assert_eq!(options.product, "\\cdot");
    }

    #[test]
    fn test_from_yaml_rejects_zero_precision() {
        assert!(matches!(
            LatexOptions::from_yaml("precision: 0\n"),
            Err(OptionsError::ZeroPrecision)
        ));
        assert!(matches!(
            LatexOptions::from_yaml("scientific_notation: sometimes\n"),
            Err(OptionsError::Yaml(_))
        ));
    }

    #[test]
    fn test_yaml_round_trip() {
        let options = LatexOptions::default().with_group_separator("\\,").with_precision(8);
        let yaml = options.to_yaml().unwrap();
        assert_eq!(LatexOptions::from_yaml(&yaml).unwrap(), options);
    }
}
