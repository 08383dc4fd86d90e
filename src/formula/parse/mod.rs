// Atom sequence to expression tree
//
// `primary` builds terms (literals, symbols, fractions, fences, function
// applications) and `expr` combines them by operator precedence. Parsing is
// total: anything that cannot be classified becomes an error node in place.

mod cursor;
mod expr;
mod fence;
mod number;
mod primary;


pub use cursor::Cursor;
pub use expr::parse_expression;
pub use primary::parse_primary;

use crate::formula::atom::Atom;
use crate::formula::ast::Node;
use crate::formula::catalog::{Catalog, StandardCatalog};

/// Parse an atom sequence with the standard catalog.
///
/// Returns `None` for an empty sequence (or one holding only spacing).
pub fn parse_atoms(atoms: &[Atom]) -> Option<Node> {
    parse_atoms_with(atoms, &StandardCatalog)
}

/// Parse an atom sequence with a caller-supplied catalog
pub fn parse_atoms_with(atoms: &[Atom], catalog: &dyn Catalog) -> Option<Node> {
    expr::parse_sequence(atoms, catalog)
}
