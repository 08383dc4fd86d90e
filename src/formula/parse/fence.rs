// Fenced groups
//
// An opening fence is matched against its closing glyph at the same nesting
// level. Symmetric bars open a nested group when they directly follow an
// opener or an operator, and close one otherwise. An opener without a
// matching closer forms a group running to the end of the sequence with an
// empty closing side.

use smallvec::SmallVec;

use super::cursor::Cursor;
use super::expr::parse_sequence;
use crate::formula::atom::{Atom, AtomKind};
use crate::formula::ast::{Fence, Node, NodeKind};
use crate::formula::delimiters::{fence_function, is_symmetric, right_of, FenceFunction};

/// Content of a fence pair before it is classified
#[derive(Debug)]
pub struct Fenced {
    pub open: String,
    pub close: String,
    pub middle: Option<String>,
    pub inner: Option<Node>,
}

impl Fenced {
    pub fn fence(&self) -> Fence {
        let fence = Fence::new(self.open.as_str(), self.close.as_str());
        match &self.middle {
            Some(middle) => fence.with_middle(middle.as_str()),
            None => fence,
        }
    }

    /// Named function for the pair, if any
    pub fn function(&self) -> Option<&'static str> {
        match fence_function(&self.open, &self.close) {
            FenceFunction::Named(name) => Some(name),
            FenceFunction::Plain(_) => None,
        }
    }

    /// Classify the pair: a named function becomes an application, a plain
    /// pair around a number, symbol or application disappears, anything
    /// else stays a group.
    pub fn into_node(self) -> Node {
        if let Some(name) = self.function() {
            let arg = self
                .inner
                .unwrap_or_else(|| Node::error(None, format!("empty {name}")));
            return Node::apply(name, arg);
        }
        let fence = self.fence();
        match self.inner {
            Some(inner) if is_bare(&inner) && !fence.open.is_empty() && !fence.close.is_empty() && fence.middle.is_empty() => {
                inner
            },
            Some(inner) => Node::group(inner, Some(fence)),
            None => Node::group(Node::error(None, "empty group"), Some(fence)),
        }
    }
}

/// Nodes that need no fence to stand alone
fn is_bare(node: &Node) -> bool {
    matches!(
        node.kind,
        NodeKind::Number(_) | NodeKind::Symbol { .. } | NodeKind::Apply { .. }
    )
}

/// Canonical fence glyph of an atom that can open or close a group
pub fn fence_glyph(atom: &Atom) -> Option<&str> {
    match atom.kind {
        AtomKind::Open | AtomKind::Close | AtomKind::SizedDelim => Some(atom.value.as_str()),
        AtomKind::Ord if atom.value == "|" || atom.value == "‖" => Some(atom.value.as_str()),
        _ => None,
    }
}

/// Whether the atom at the cursor opens a fenced group
pub fn opens_fence(atom: &Atom) -> bool {
    match atom.kind {
        AtomKind::LeftRight => true,
        AtomKind::Close => false,
        _ => fence_glyph(atom).and_then(right_of).is_some(),
    }
}

/// Whether the atom at the cursor opens a parenthesis
pub fn opens_parenthesis(atom: &Atom) -> bool {
    match atom.kind {
        AtomKind::LeftRight => atom.left.as_deref() == Some("("),
        AtomKind::Open | AtomKind::SizedDelim => atom.value == "(",
        _ => false,
    }
}

/// Parse the fenced group at the cursor. Returns `None` when the current
/// atom does not open one.
pub fn parse_fenced(cursor: &mut Cursor<'_>) -> Option<Fenced> {
    let atom = cursor.peek()?;
    if atom.kind == AtomKind::LeftRight {
        cursor.index += 1;
        return Some(left_right(cursor, atom));
    }
    let open = fence_glyph(atom)?;
    let close = right_of(open)?;
    if atom.kind == AtomKind::Close {
        return None;
    }
    let start = cursor.index;
    let (end, close) = match find_closing(cursor.atoms, start, close) {
        Some(end) => {
            cursor.index = end + 1;
            (end, close)
        },
        None => {
            log::warn!("unmatched opening fence `{open}` at atom {start}");
            cursor.index = cursor.atoms.len();
            (cursor.atoms.len(), "")
        },
    };
    let inner = parse_sequence(&cursor.atoms[start + 1..end], cursor.catalog);
    Some(Fenced {
        open: open.to_string(),
        close: close.to_string(),
        middle: None,
        inner,
    })
}

fn left_right(cursor: &Cursor<'_>, atom: &Atom) -> Fenced {
    let body = atom.body.as_deref().unwrap_or_default();
    let middle = body
        .iter()
        .find(|a| a.kind == AtomKind::Middle)
        .map(|a| a.value.clone());
    Fenced {
        open: atom.left.clone().unwrap_or_default(),
        close: atom.right.clone().unwrap_or_default(),
        middle,
        inner: parse_sequence(body, cursor.catalog),
    }
}

/// Index of the atom closing the fence opened at `open_index`
pub fn find_closing(atoms: &[Atom], open_index: usize, close: &str) -> Option<usize> {
    let mut pending: SmallVec<[&str; 8]> = SmallVec::new();
    for (i, atom) in atoms.iter().enumerate().skip(open_index + 1) {
        let Some(glyph) = fence_glyph(atom) else {
            continue;
        };
        let opens = match atom.kind {
            AtomKind::Open => true,
            AtomKind::Close => false,
            _ => right_of(glyph).is_some() && (!is_symmetric(glyph) || bar_opens_at(atoms, open_index, i)),
        };
        if !opens {
            // a closer skips over inner openers left unmatched
            if let Some(depth) = pending.iter().rposition(|p| *p == glyph) {
                pending.truncate(depth);
                continue;
            }
            if glyph == close {
                return Some(i);
            }
        }
        if let Some(expected) = right_of(glyph).filter(|_| opens) {
            pending.push(expected);
        }
    }
    None
}

/// A bar opens when nothing but an opener or an operator precedes it
fn bar_opens_at(atoms: &[Atom], open_index: usize, index: usize) -> bool {
    let previous = atoms[..index]
        .iter()
        .enumerate()
        .rev()
        .find(|(_, a)| a.kind != AtomKind::Space);
    match previous {
        None => true,
        Some((j, _)) if j == open_index => true,
        Some((_, a)) => matches!(
            a.kind,
            AtomKind::Bin | AtomKind::Rel | AtomKind::Punct | AtomKind::Open
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::atom::atoms_from_latex;
    use crate::formula::catalog::StandardCatalog;

    fn closing(latex: &str) -> Option<usize> {
        let atoms = atoms_from_latex(latex).unwrap();
        let close = right_of(fence_glyph(&atoms[0]).unwrap()).unwrap();
        find_closing(&atoms, 0, close)
    }

    #[test]
    fn test_find_closing_nested() {
        assert_eq!(closing("(a(b)c)"), Some(6));
        assert_eq!(closing("(a[b)c)"), Some(4));
        assert_eq!(closing("(ab"), None);
    }

    #[test]
    fn test_find_closing_bars() {
        assert_eq!(closing("|x|"), Some(2));
        assert_eq!(closing("||x||"), Some(4));
        assert_eq!(closing("|a+|b||"), Some(6));
        assert_eq!(closing("|(a|b)|"), Some(6));
    }

    #[test]
    fn test_unmatched_group_runs_to_end() {
        let atoms = atoms_from_latex("(x+1").unwrap();
        let mut cursor = Cursor::new(&atoms, &StandardCatalog);
        let fenced = parse_fenced(&mut cursor).unwrap();
        assert_eq!(cursor.index, atoms.len());
        assert_eq!(fenced.close, "");
        assert!(matches!(fenced.into_node().kind, NodeKind::Group { .. }));
    }

    #[test]
    fn test_plain_pair_around_symbol_is_bare() {
        let atoms = atoms_from_latex("(x)").unwrap();
        let mut cursor = Cursor::new(&atoms, &StandardCatalog);
        let node = parse_fenced(&mut cursor).unwrap().into_node();
        assert_eq!(node, Node::symbol("x"));
    }

    #[test]
    fn test_named_pair() {
        let atoms = atoms_from_latex("\\lfloor x\\rfloor").unwrap();
        let mut cursor = Cursor::new(&atoms, &StandardCatalog);
        let node = parse_fenced(&mut cursor).unwrap().into_node();
        assert_eq!(node, Node::apply("floor", Node::symbol("x")));
    }
}
