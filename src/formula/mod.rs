// Formula Module - Math Atoms to Semantic Trees and Back
//
// This module turns the laid-out atoms of a rendered formula into a semantic
// expression tree and serializes such trees back to LaTeX:
//
// - **atom**: visual primitives, plus an adapter that reads them from LaTeX
// - **parse**: primary and precedence-climbing parsers producing `ast::Node`
// - **latex**: serializer and numeric formatter driven by `LatexOptions`
// - **catalog** / **delimiters**: naming, precedence and fence tables
//
// # Example
//
// ```ignore
// use longan::formula::{latex_to_ast, to_latex, LatexOptions};
//
// let node = latex_to_ast("2+3\\cdot 4")?.unwrap();
// assert_eq!(to_latex(&node, &LatexOptions::default()), "2+3\\cdot4");
// ```

/// Semantic expression tree
pub mod ast;
/// Atom model and the LaTeX-to-atom adapter
pub mod atom;
/// Operator, function and symbol catalog
pub mod catalog;
/// Fence, postfix and digraph tables
pub mod delimiters;
pub mod error;
/// LaTeX serialization and numeric formatting
pub mod latex;
/// Atom sequence parser
pub mod parse;

pub use ast::{Fence, FontVariant, Node, NodeKind, Number};
pub use atom::{Atom, AtomKind, atoms_from_latex};
pub use catalog::{Catalog, CustomCatalog, StandardCatalog};
pub use error::{AtomError, FormulaError, OptionsError, Result};
pub use latex::{
    LatexOptions, LatexSerializer, ScientificNotation, format_decimal_str, format_number, to_latex,
    to_latex_with,
};
pub use parse::{parse_atoms, parse_atoms_with};

/// Parse LaTeX source into an expression tree.
///
/// Returns `Ok(None)` for input without content. Structural LaTeX errors
/// (unbalanced braces, stray `\right`) are reported; anything the parser
/// cannot classify becomes an error node instead.
///
/// # Example
/// ```ignore
/// let node = latex_to_ast("\\frac{1}{3}")?;
/// assert_eq!(node, Some(Node::rational(1, 3)));
/// ```
pub fn latex_to_ast(src: &str) -> Result<Option<Node>> {
    let atoms = atoms_from_latex(src)?;
    Ok(parse_atoms(&atoms))
}

/// Parse LaTeX source with a caller-supplied catalog
pub fn latex_to_ast_with(src: &str, catalog: &dyn Catalog) -> Result<Option<Node>> {
    let atoms = atoms_from_latex(src)?;
    Ok(parse_atoms_with(&atoms, catalog))
}

/// Parse LaTeX source and serialize the tree again
///
/// Options come from YAML, so a caller can keep them in a config file.
pub fn normalize_latex(src: &str, options_yaml: Option<&str>) -> Result<String> {
    let options = match options_yaml {
        Some(yaml) => LatexOptions::from_yaml(yaml)?,
        None => LatexOptions::default(),
    };
    Ok(latex_to_ast(src)?
        .map(|node| to_latex(&node, &options))
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_latex_to_ast() {
        assert_eq!(latex_to_ast("1/3").unwrap(), Some(Node::rational(1, 3)));
        assert_eq!(latex_to_ast("").unwrap(), None);
        assert!(matches!(latex_to_ast("{x"), Err(FormulaError::Atom(_))));
    }

    #[test]
    fn test_custom_catalog_entry_point() {
        let catalog = CustomCatalog::new().with_alias("\\Tr", "tr").with_function("tr");
        let node = latex_to_ast_with("\\Tr A", &catalog).unwrap();
        assert_eq!(node, Some(Node::apply("tr", Node::symbol("A"))));
    }

    #[test]
    fn test_normalize_latex() {
        assert_eq!(normalize_latex("2+3*4", None).unwrap(), "2+3\\cdot4");
        assert_eq!(
            normalize_latex("2\\cdot 3", Some("product: \"\\\\times\"\n")).unwrap(),
            "2\\times3"
        );
        assert!(matches!(
            normalize_latex("x", Some("precision: 0\n")),
            Err(FormulaError::Options(OptionsError::ZeroPrecision))
        ));
    }

    #[test]
    fn test_precedence_survives_round_trip() {
        let node = latex_to_ast("2+3*4").unwrap().unwrap();
        assert_eq!(
            node,
            Node::binary(
                "+",
                Node::number(2.0),
                Node::binary("*", Node::number(3.0), Node::number(4.0))
            )
        );
        assert_eq!(to_latex(&node, &LatexOptions::default()), "2+3\\cdot4");
    }

    #[test]
    fn test_formatted_floats_read_back() {
        let options = LatexOptions::default();
        for value in [1.0 / 3.0, 1.0 / 7.0, 1.0 / 6.0, 0.5, 12.25] {
            let latex = to_latex(&Node::number(value), &options);
            assert_eq!(latex_to_ast(&latex).unwrap(), Some(Node::number(value)), "{latex}");
        }
        let latex = to_latex(&Node::number(std::f64::consts::PI), &options);
        assert_eq!(latex, "3.14159265358979\\ldots");
        assert_eq!(latex_to_ast(&latex).unwrap(), Some(Node::number(3.14159265358979)));
        assert_eq!(normalize_latex(&latex, None).unwrap(), "3.14159265358979");
    }

    fn leaf() -> impl Strategy<Value = Node> {
        prop_oneof![
            (0u32..1000).prop_map(|n| Node::number(f64::from(n))),
            (1u32..1000, 1u32..13).prop_map(|(n, d)| Node::number(f64::from(n) / f64::from(d))),
            (0.0f64..1e6).prop_map(Node::number),
            prop::sample::select(vec!["a", "b", "c", "x", "y", "z", "f", "n"]).prop_map(Node::symbol),
        ]
    }

    fn expression() -> impl Strategy<Value = Node> {
        leaf().prop_recursive(4, 24, 2, |inner| {
            (
                prop::sample::select(vec!["+", "-", "*", "="]),
                inner.clone(),
                inner,
            )
                .prop_map(|(op, lhs, rhs)| Node::binary(op, lhs, rhs))
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        // every integer an f64 holds exactly prints in full
        #[test]
        fn prop_integer_round_trip(n in -(1i64 << 53)..=(1i64 << 53)) {
            let node = Node::number(n as f64);
            let latex = to_latex(&node, &LatexOptions::default());
            prop_assert_eq!(latex_to_ast(&latex).unwrap(), Some(node));
        }

        // Right-nested operators of equal precedence reassociate on the first
        // pass; after that, parsing and serializing is a fixed point.
        #[test]
        fn prop_serialization_is_idempotent(node in expression()) {
            let options = LatexOptions::default();
            let first = to_latex(&node, &options);
            let normalized = normalize_latex(&first, None).unwrap();
            prop_assert!(!normalized.is_empty());
            prop_assert_eq!(normalize_latex(&normalized, None).unwrap(), normalized);
        }
    }
}
