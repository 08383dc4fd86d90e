// Expression tree to LaTeX serialization
//
// `serializer` walks the tree and decides parenthesization, implicit
// products and function spelling. `number` renders numeric literals under
// the caller's `LatexOptions`; `template` fills catalog templates.

mod number;
mod options;
mod serializer;
mod template;
mod utils;


pub use number::{format_decimal_str, format_number, write_number};
pub use options::{LatexOptions, ScientificNotation};
pub use serializer::LatexSerializer;
pub use template::fill_template;

use crate::formula::ast::Node;
use crate::formula::catalog::{Catalog, StandardCatalog};

/// Serialize a node with the standard catalog
pub fn to_latex(node: &Node, options: &LatexOptions) -> String {
    to_latex_with(node, options, &StandardCatalog)
}

/// Serialize a node with a caller-supplied catalog
pub fn to_latex_with(node: &Node, options: &LatexOptions, catalog: &dyn Catalog) -> String {
    let mut serializer = LatexSerializer::new(options, catalog);
    serializer.serialize(node);
    serializer.into_string()
}
