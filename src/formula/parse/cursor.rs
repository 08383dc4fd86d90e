use std::borrow::Cow;

use crate::formula::atom::{Atom, AtomKind};
use crate::formula::ast::Node;
use crate::formula::catalog::Catalog;
use crate::formula::delimiters::right_of;

/// Parse position over one atom sequence.
///
/// The cursor is owned by a single parse call and threaded by exclusive
/// reference through the primary and expression parsers. `index` only moves
/// forward; lookahead reads ahead without moving it.
pub struct Cursor<'a> {
    pub atoms: &'a [Atom],
    pub index: usize,
    /// Operators binding looser than this end the current expression
    pub min_precedence: u16,
    /// Node produced by the last parse step
    pub result: Option<Node>,
    pub catalog: &'a dyn Catalog,
}

impl<'a> Cursor<'a> {
    pub fn new(atoms: &'a [Atom], catalog: &'a dyn Catalog) -> Self {
        Self {
            atoms,
            index: 0,
            min_precedence: 0,
            result: None,
            catalog,
        }
    }

    /// Move past spacing atoms
    pub fn skip_space(&mut self) {
        while self
            .atoms
            .get(self.index)
            .is_some_and(|a| a.kind == AtomKind::Space)
        {
            self.index += 1;
        }
    }

    pub fn at_end(&mut self) -> bool {
        self.skip_space();
        self.index >= self.atoms.len()
    }

    /// Current atom, skipping spacing
    pub fn peek(&mut self) -> Option<&'a Atom> {
        self.skip_space();
        self.atoms.get(self.index)
    }

    /// First non-space atom after the current one
    pub fn peek_next(&self) -> Option<&'a Atom> {
        self.atoms[self.index.min(self.atoms.len())..]
            .iter()
            .filter(|a| a.kind != AtomKind::Space)
            .nth(1)
    }

    /// Atom at an absolute position, spacing included
    #[inline]
    pub fn raw(&self, index: usize) -> Option<&'a Atom> {
        self.atoms.get(index)
    }

    /// Consume the current atom
    pub fn advance(&mut self) -> Option<&'a Atom> {
        let atom = self.peek()?;
        self.index += 1;
        Some(atom)
    }

    pub fn canonical(&self, atom: &'a Atom) -> Cow<'a, str> {
        self.catalog.canonical_name(&atom.value)
    }

    /// Operator name and precedence of an atom, if it acts as an infix operator
    pub fn operator_of(&self, atom: &'a Atom) -> Option<(Cow<'a, str>, u16)> {
        match atom.kind {
            AtomKind::Bin | AtomKind::Rel | AtomKind::Punct => {
                let name = self.canonical(atom);
                let precedence = self.catalog.precedence_of(&name)?;
                Some((name, precedence))
            },
            AtomKind::Middle => {
                let precedence = self.catalog.precedence_of("middle")?;
                Some((Cow::Borrowed("middle"), precedence))
            },
            _ => None,
        }
    }

    /// Infix operator at the current position
    pub fn operator(&mut self) -> Option<(Cow<'a, str>, u16)> {
        let atom = self.peek()?;
        self.operator_of(atom)
    }

    /// Whether an atom can begin a primary expression
    pub fn starts_primary(&self, atom: &'a Atom) -> bool {
        match atom.kind {
            AtomKind::Ord
            | AtomKind::Op
            | AtomKind::Font
            | AtomKind::Text
            | AtomKind::Group
            | AtomKind::Genfrac
            | AtomKind::Surd
            | AtomKind::LeftRight
            | AtomKind::Open
            | AtomKind::Placeholder
            | AtomKind::Accent
            | AtomKind::Array
            | AtomKind::Enclose
            | AtomKind::Box
            | AtomKind::Unknown => true,
            AtomKind::SizedDelim => right_of(&atom.value).is_some(),
            AtomKind::Bin | AtomKind::Rel | AtomKind::Punct => self.operator_of(atom).is_none(),
            AtomKind::Close | AtomKind::Middle | AtomKind::Space | AtomKind::SupSub => false,
        }
    }
}
