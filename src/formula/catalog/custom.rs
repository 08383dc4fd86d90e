use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use super::{Catalog, StandardCatalog};
use crate::formula::error::OptionsError;

/// Caller definitions layered over the standard catalog.
///
/// Every lookup consults the custom entries first and falls back to the
/// built-in tables. A catalog can be assembled with the builder methods or
/// loaded from a YAML document:
///
/// ```yaml
/// aliases:
///   "\\Tr": tr
/// functions: [tr]
/// templates:
///   tr: "\\operatorname{Tr}%"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomCatalog {
    /// Raw spelling to canonical name
    aliases: HashMap<String, String>,
    functions: HashSet<String>,
    large_operators: HashSet<String>,
    operators: HashMap<String, u16>,
    templates: HashMap<String, String>,
    symbols: HashMap<String, String>,
    #[serde(skip)]
    base: StandardCatalog,
}

impl CustomCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load definitions from a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self, OptionsError> {
        serde_saphyr::from_str(yaml).map_err(|e| OptionsError::Yaml(e.to_string()))
    }

    pub fn with_alias(mut self, raw: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.aliases.insert(raw.into(), canonical.into());
        self
    }

    pub fn with_function(mut self, name: impl Into<String>) -> Self {
        self.functions.insert(name.into());
        self
    }

    /// Register a function whose scripts become limits
    pub fn with_large_operator(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.functions.insert(name.clone());
        self.large_operators.insert(name);
        self
    }

    pub fn with_operator(mut self, name: impl Into<String>, precedence: u16) -> Self {
        self.operators.insert(name.into(), precedence);
        self
    }

    pub fn with_template(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(name.into(), template.into());
        self
    }

    pub fn with_symbol(mut self, name: impl Into<String>, latex: impl Into<String>) -> Self {
        self.symbols.insert(name.into(), latex.into());
        self
    }
}

impl Catalog for CustomCatalog {
    fn canonical_name<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        match self.aliases.get(raw) {
            Some(name) => Cow::Owned(name.clone()),
            None => self.base.canonical_name(raw),
        }
    }

    fn precedence_of(&self, name: &str) -> Option<u16> {
        self.operators
            .get(name)
            .copied()
            .or_else(|| self.base.precedence_of(name))
    }

    fn is_known_function(&self, name: &str) -> bool {
        self.functions.contains(name) || self.base.is_known_function(name)
    }

    fn is_large_operator(&self, name: &str) -> bool {
        self.large_operators.contains(name) || self.base.is_large_operator(name)
    }

    fn has_optional_parens(&self, name: &str) -> bool {
        self.base.has_optional_parens(name)
    }

    fn inverse_of(&self, name: &str) -> Option<&str> {
        self.base.inverse_of(name)
    }

    fn latex_template_for(&self, name: &str) -> Option<&str> {
        match self.templates.get(name) {
            Some(template) => Some(template.as_str()),
            None => self.base.latex_template_for(name),
        }
    }

    fn latex_for_symbol(&self, name: &str) -> Option<&str> {
        match self.symbols.get(name) {
            Some(latex) => Some(latex.as_str()),
            None => self.base.latex_for_symbol(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_entries_take_priority() {
        let catalog = CustomCatalog::new()
            .with_alias("\\Tr", "tr")
            .with_function("tr")
            .with_operator("circ", 390)
            .with_symbol("alpha", "a");
        assert_eq!(catalog.canonical_name("\\Tr"), "tr");
        assert!(catalog.is_known_function("tr"));
        assert_eq!(catalog.precedence_of("circ"), Some(390));
        assert_eq!(catalog.latex_for_symbol("alpha"), Some("a"));
    }

    #[test]
    fn test_falls_back_to_standard() {
        let catalog = CustomCatalog::new().with_function("tr");
        assert_eq!(catalog.canonical_name("\\cdot"), "*");
        assert!(catalog.is_known_function("sin"));
        assert_eq!(catalog.precedence_of("+"), Some(275));
        assert_eq!(catalog.latex_template_for("abs"), Some("\\left|%\\right|"));
    }

    #[test]
    fn test_from_yaml() {
        let yaml = "functions: [tr]\ntemplates:\n  tr: \"\\\\operatorname{Tr}%\"\noperators:\n  circ: 390\n";
        let catalog = CustomCatalog::from_yaml(yaml).unwrap();
        assert!(catalog.is_known_function("tr"));
        assert_eq!(catalog.latex_template_for("tr"), Some("\\operatorname{Tr}%"));
        assert_eq!(catalog.precedence_of("circ"), Some(390));
    }

    #[test]
    fn test_from_yaml_rejects_bad_shape() {
        let result = CustomCatalog::from_yaml("functions: 12");
        assert!(matches!(result, Err(OptionsError::Yaml(_))));
    }
}
