//! Longan - Math atoms to semantic expression trees and back to LaTeX
//!
//! This library reads the laid-out atoms of a rendered formula (symbols,
//! operators, fractions, radicals, fences, scripts) and builds a semantic
//! expression tree that captures what the formula means. Trees serialize
//! back to LaTeX under a configurable numeric formatting policy.
//!
//! # Features
//!
//! - **Precedence parsing**: operator-precedence climbing with implicit
//!   multiplication, inverse-function detection and named fence pairs
//! - **Exact rationals**: literal fractions stay exact through the round trip
//! - **Numeric formatting**: digit grouping, decimal markers, scientific and
//!   engineering notation, repeating-digit overlines
//! - **Extensible catalog**: callers add functions, operators, templates and
//!   symbols, in code or from YAML
//! - **Fault tolerant**: unknown tokens become error nodes instead of failures
//!
//! # Example - LaTeX to tree and back
//!
//! ```no_run
//! use longan::formula::{latex_to_ast, to_latex, LatexOptions, Node};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let node = latex_to_ast("\\frac{1}{3}+2x")?.unwrap_or_else(|| Node::number(0.0));
//! let latex = to_latex(&node, &LatexOptions::default());
//! println!("{latex}");
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Formatting options from YAML
//!
//! ```no_run
//! use longan::formula::{format_number, LatexOptions, Number};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = LatexOptions::from_yaml("group_separator: \"\\\\,\"\nprecision: 6\n")?;
//! let text = format_number(&Number::Float(1234567.0), &options);
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

/// Formula parsing and LaTeX serialization
///
/// Atoms come from a renderer or from the LaTeX adapter in `formula::atom`;
/// the parser in `formula::parse` builds `formula::ast` trees, and
/// `formula::latex` turns them back into LaTeX text.
pub mod formula;

// Re-export commonly used types for convenience
pub use formula::{
    Atom, AtomKind, Catalog, CustomCatalog, FormulaError, LatexOptions, LatexSerializer, Node, NodeKind,
    Number, ScientificNotation, StandardCatalog, latex_to_ast, parse_atoms, to_latex,
};
