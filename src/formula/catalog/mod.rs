// Operator and function catalog
//
// The catalog answers every naming question the parser and the serializer
// ask: the canonical name of a raw token, the precedence of an infix
// operator, whether a name is a function, and how a name is spelled in
// LaTeX. `StandardCatalog` ships the built-in tables; `CustomCatalog`
// layers caller definitions over them.

mod custom;
mod tables;

use std::borrow::Cow;

pub use custom::CustomCatalog;

/// Naming, precedence and template lookups.
pub trait Catalog {
    /// Normalize a raw token (`\cdot`, `≤`, `\alpha`) to its canonical name
    fn canonical_name<'a>(&self, raw: &'a str) -> Cow<'a, str>;

    /// Precedence of an infix operator, `None` when the name is not one
    fn precedence_of(&self, name: &str) -> Option<u16>;

    fn is_known_function(&self, name: &str) -> bool;

    /// Whether the function takes its scripts as lower and upper limits
    fn is_large_operator(&self, name: &str) -> bool;

    /// Whether the function may drop parentheses around a simple argument
    fn has_optional_parens(&self, name: &str) -> bool;

    /// Name of the inverse function written as `name^{-1}`
    fn inverse_of(&self, name: &str) -> Option<&str>;

    fn latex_template_for(&self, name: &str) -> Option<&str>;

    fn latex_for_symbol(&self, name: &str) -> Option<&str>;
}

/// Built-in catalog backed by compile-time tables
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCatalog;

impl Catalog for StandardCatalog {
    fn canonical_name<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        if let Some(name) = tables::CANONICAL_NAMES.get(raw) {
            return Cow::Borrowed(*name);
        }
        match raw.strip_prefix('\\') {
            Some(word) if !word.is_empty() && word.bytes().all(|b| b.is_ascii_alphabetic()) => {
                Cow::Borrowed(word)
            },
            _ => Cow::Borrowed(raw),
        }
    }

    fn precedence_of(&self, name: &str) -> Option<u16> {
        tables::PRECEDENCE.get(name).copied()
    }

    fn is_known_function(&self, name: &str) -> bool {
        tables::FUNCTIONS.contains(name)
    }

    fn is_large_operator(&self, name: &str) -> bool {
        tables::LARGE_OPERATORS.contains(name)
    }

    fn has_optional_parens(&self, name: &str) -> bool {
        tables::OPTIONAL_PARENS.contains(name)
    }

    fn inverse_of(&self, name: &str) -> Option<&str> {
        tables::INVERSE_FUNCTIONS.get(name).copied()
    }

    fn latex_template_for(&self, name: &str) -> Option<&str> {
        tables::TEMPLATES.get(name).copied()
    }

    fn latex_for_symbol(&self, name: &str) -> Option<&str> {
        tables::SYMBOLS.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names() {
        let catalog = StandardCatalog;
        assert_eq!(catalog.canonical_name("\\cdot"), "*");
        assert_eq!(catalog.canonical_name("×"), "*");
        assert_eq!(catalog.canonical_name("\\div"), "/");
        assert_eq!(catalog.canonical_name("\\leq"), "le");
        assert_eq!(catalog.canonical_name("≠"), "ne");
        assert_eq!(catalog.canonical_name("\\alpha"), "alpha");
        assert_eq!(catalog.canonical_name("α"), "alpha");
        assert_eq!(catalog.canonical_name("\\infty"), "infinity");
        assert_eq!(catalog.canonical_name("\\sin"), "sin");
        assert_eq!(catalog.canonical_name("x"), "x");
        assert_eq!(catalog.canonical_name("\\%"), "\\%");
    }

    #[test]
    fn test_precedence_table() {
        let catalog = StandardCatalog;
        assert_eq!(catalog.precedence_of(","), Some(10));
        assert_eq!(catalog.precedence_of("="), Some(260));
        assert_eq!(catalog.precedence_of("+"), Some(275));
        assert_eq!(catalog.precedence_of("*"), Some(390));
        assert_eq!(catalog.precedence_of("setminus"), Some(650));
        assert_eq!(catalog.precedence_of("x"), None);
        assert!(catalog.precedence_of("*") > catalog.precedence_of("+"));
        assert!(catalog.precedence_of("+") > catalog.precedence_of("le"));
    }

    #[test]
    fn test_function_registry() {
        let catalog = StandardCatalog;
        assert!(catalog.is_known_function("sin"));
        assert!(catalog.is_known_function("sum"));
        assert!(!catalog.is_known_function("f"));
        assert!(catalog.is_large_operator("sum"));
        assert!(!catalog.is_large_operator("sin"));
        assert!(catalog.has_optional_parens("ln"));
        assert!(!catalog.has_optional_parens("max"));
        assert_eq!(catalog.inverse_of("sin"), Some("arcsin"));
        assert_eq!(catalog.inverse_of("tanh"), Some("artanh"));
        assert_eq!(catalog.inverse_of("log"), None);
    }

    #[test]
    fn test_latex_lookups() {
        let catalog = StandardCatalog;
        assert_eq!(catalog.latex_for_symbol("alpha"), Some("\\alpha"));
        assert_eq!(catalog.latex_for_symbol("infinity"), Some("\\infty"));
        assert_eq!(catalog.latex_for_symbol("arsinh"), None);
        assert_eq!(catalog.latex_template_for("binom"), Some("\\binom{%0}{%1}"));
        assert_eq!(catalog.latex_template_for("sin"), None);
    }
}
