// Precedence climbing over infix operators

use super::cursor::Cursor;
use super::primary::parse_primary;
use crate::formula::atom::Atom;
use crate::formula::ast::Node;
use crate::formula::catalog::Catalog;

/// Parse the expression at the cursor, stopping before any operator that
/// binds looser than `cursor.min_precedence`.
pub fn parse_expression(cursor: &mut Cursor<'_>) -> Option<Node> {
    parse_primary(cursor);
    let lhs = cursor.result.take()?;
    Some(climb(cursor, lhs))
}

fn climb(cursor: &mut Cursor<'_>, mut lhs: Node) -> Node {
    while let Some((op, precedence)) = cursor.operator() {
        if precedence < cursor.min_precedence {
            break;
        }
        cursor.index += 1;
        let mut rhs = operand(cursor, &op);
        while let Some((_, next)) = cursor.operator() {
            if next <= precedence {
                break;
            }
            let saved = cursor.min_precedence;
            cursor.min_precedence = next;
            rhs = climb(cursor, rhs);
            cursor.min_precedence = saved;
        }
        lhs = combine(&op, lhs, rhs);
    }
    lhs
}

fn operand(cursor: &mut Cursor<'_>, op: &str) -> Node {
    parse_primary(cursor);
    cursor
        .result
        .take()
        .unwrap_or_else(|| Node::error(None, format!("missing operand after `{op}`")))
}

/// Join two operands; a quotient of integer literals stays exact
pub fn combine(op: &str, lhs: Node, rhs: Node) -> Node {
    if op == "/" {
        if let (Some(p), Some(q)) = (lhs.as_integer(), rhs.as_integer()) {
            if q != 0 {
                return Node::rational(p, q);
            }
        }
    }
    Node::binary(op, lhs, rhs)
}

/// Parse a whole atom sequence.
///
/// Parsing resumes after a position where no expression continues; the
/// pieces are joined as products so that no atom is dropped.
pub fn parse_sequence(atoms: &[Atom], catalog: &dyn Catalog) -> Option<Node> {
    let mut cursor = Cursor::new(atoms, catalog);
    let mut result: Option<Node> = None;
    while !cursor.at_end() {
        let start = cursor.index;
        let node = match parse_expression(&mut cursor) {
            Some(node) if cursor.index > start => node,
            // only empty groups were consumed
            None if cursor.index > start => continue,
            _ => {
                cursor.index = start;
                let stray = cursor.advance().map(|a| a.value.as_str()).unwrap_or_default();
                log::debug!("no expression at atom {start}, skipping `{stray}`");
                Node::error(None, format!("unexpected `{stray}`"))
            },
        };
        if result.is_some() {
            log::debug!("expression resumed at atom {start}");
        }
        result = Some(match result {
            Some(previous) => Node::binary("*", previous, node),
            None => node,
        });
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::ast::NodeKind;

    #[test]
    fn test_combine_rational() {
        let node = combine("/", Node::number(1.0), Node::number(3.0));
        assert_eq!(node, Node::rational(1, 3));
        let node = combine("/", Node::number(-6.0), Node::number(4.0));
        assert_eq!(node, Node::rational(-6, 4));
    }

    #[test]
    fn test_combine_keeps_division_by_zero() {
        let node = combine("/", Node::number(1.0), Node::number(0.0));
        assert_eq!(node.binary_op(), Some("/"));
        let node = combine("/", Node::number(1.5), Node::number(2.0));
        assert!(matches!(node.kind, NodeKind::Binary { .. }));
    }
}
