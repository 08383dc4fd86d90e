// Primary expressions
//
// A term is one primary (literal, symbol, fraction, radical, fenced group or
// function application) followed by its postfix decorations and, where the
// caller allows it, the factors juxtaposed after it.

use super::cursor::Cursor;
use super::expr::parse_sequence;
use super::fence::{opens_fence, opens_parenthesis, parse_fenced, Fenced};
use super::number::{parse_number, starts_number};
use crate::formula::atom::{Atom, AtomKind};
use crate::formula::ast::{Fence, Node, NodeKind, Number};
use crate::formula::delimiters::{digraph, postfix_function, Placement};

/// How far a term extends over juxtaposed factors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Product {
    /// A single primary with its decorations
    Single,
    /// Every following factor (`2xy`)
    Full,
    /// Following factors up to the next function name (`\sin x\cos x`)
    Argument,
}

/// Parse one term at the cursor and store it in `cursor.result`.
///
/// The result is `None` only when nothing but spacing remains.
pub fn parse_primary(cursor: &mut Cursor<'_>) {
    cursor.result = term(cursor, Product::Full);
}

fn term(cursor: &mut Cursor<'_>, product: Product) -> Option<Node> {
    let node = loop {
        let atom = cursor.peek()?;
        if let Some(node) = atom_primary(cursor, atom) {
            break node;
        }
    };
    let node = decorate(cursor, node);
    Some(implicit_product(cursor, node, product))
}

/// Build the primary starting at `atom`. Returns `None` after consuming an
/// atom that contributes nothing, such as an empty brace group.
fn atom_primary<'a>(cursor: &mut Cursor<'a>, atom: &'a Atom) -> Option<Node> {
    if let Some(node) = prefix_digraph(cursor, atom) {
        return Some(node);
    }
    if let Some(node) = signed(cursor, atom) {
        return Some(node);
    }
    if cursor.operator_of(atom).is_some() {
        // left for the expression loop to consume
        return Some(Node::error(None, format!("missing operand before `{}`", atom.value)));
    }
    if starts_number(cursor, atom) {
        return Some(parse_number(cursor));
    }

    match atom.kind {
        AtomKind::Genfrac => {
            cursor.index += 1;
            Some(fraction(cursor, atom))
        },
        AtomKind::Surd => {
            cursor.index += 1;
            Some(radical(cursor, atom))
        },
        _ if opens_fence(atom) => match parse_fenced(cursor) {
            Some(fenced) => Some(fence_scripts(cursor, fenced.into_node(), atom)),
            None => {
                cursor.index += 1;
                None
            },
        },
        AtomKind::Close | AtomKind::SizedDelim => {
            cursor.index += 1;
            log::debug!("stray closing fence `{}` at atom {}", atom.value, cursor.index - 1);
            Some(Node::error(None, format!("unexpected `{}`", atom.value)))
        },
        AtomKind::Group => {
            cursor.index += 1;
            let body = parse_sequence(atom.body.as_deref().unwrap_or_default(), cursor.catalog);
            match body {
                Some(inner) => Some(attach_atom_scripts(cursor, inner, atom)),
                None if atom.has_scripts() => {
                    Some(attach_atom_scripts(cursor, Node::error(None, "missing base"), atom))
                },
                None => None,
            }
        },
        AtomKind::Ord | AtomKind::Op | AtomKind::Font => Some(function_or_identifier(cursor, atom)),
        AtomKind::Text => {
            cursor.index += 1;
            Some(attach_atom_scripts(cursor, Node::text(atom.value.as_str()), atom))
        },
        AtomKind::SupSub => {
            cursor.index += 1;
            Some(attach_atom_scripts(cursor, Node::error(None, "missing base"), atom))
        },
        AtomKind::Accent | AtomKind::Enclose | AtomKind::Box => {
            cursor.index += 1;
            let wrapped = parse_sequence(atom.body.as_deref().unwrap_or_default(), cursor.catalog);
            let node = Node::error(wrapped, format!("unsupported `{}`", atom.value));
            Some(attach_atom_scripts(cursor, node, atom))
        },
        AtomKind::Placeholder => {
            cursor.index += 1;
            Some(attach_atom_scripts(cursor, Node::error(None, "empty placeholder"), atom))
        },
        AtomKind::Array | AtomKind::Unknown | AtomKind::Middle => {
            cursor.index += 1;
            Some(Node::error(None, format!("unsupported `{}`", atom.value)))
        },
        AtomKind::Bin | AtomKind::Rel | AtomKind::Punct => {
            cursor.index += 1;
            let node = Node::symbol(cursor.canonical(atom));
            Some(attach_atom_scripts(cursor, node, atom))
        },
        AtomKind::Open | AtomKind::LeftRight | AtomKind::Space => {
            cursor.index += 1;
            None
        },
    }
}

/// `∇×F`, `∇·F`
fn prefix_digraph<'a>(cursor: &mut Cursor<'a>, atom: &'a Atom) -> Option<Node> {
    if atom.has_scripts() {
        return None;
    }
    let next = cursor.peek_next()?;
    let pair = digraph(&atom.value, &next.value).filter(|d| d.placement == Placement::Prefix)?;
    cursor.index += 1;
    cursor.advance();
    let node = match term(cursor, Product::Single) {
        Some(operand) => Node::apply(pair.name, operand),
        None => Node::apply_n(pair.name, Vec::new()),
    };
    Some(node)
}

/// Leading `+`/`-`. The sign folds into the leftmost literal of the
/// following implicit product; anything else keeps a unary node.
fn signed<'a>(cursor: &mut Cursor<'a>, atom: &'a Atom) -> Option<Node> {
    if atom.kind != AtomKind::Bin || atom.has_scripts() {
        return None;
    }
    let op = cursor.canonical(atom);
    if op != "+" && op != "-" {
        return None;
    }
    cursor.index += 1;
    let Some(mut operand) = term(cursor, Product::Full) else {
        return Some(Node::unary(op, Node::error(None, format!("missing operand after `{}`", atom.value))));
    };
    let folded = match leading_literal(&mut operand) {
        Some(number) => {
            if op == "-" {
                *number = std::mem::replace(number, Number::Float(0.0)).negate();
            }
            true
        },
        None => false,
    };
    Some(if folded { operand } else { Node::unary(op, operand) })
}

fn leading_literal(node: &mut Node) -> Option<&mut Number> {
    if node.has_scripts() {
        return None;
    }
    match &mut node.kind {
        NodeKind::Number(number) => Some(number),
        NodeKind::Binary { op, lhs, .. } if op.as_str() == "*" => leading_literal(lhs),
        _ => None,
    }
}

/// Node for a fraction atom: an exact rational when both parts are
/// integer literals, `binom` for a bar-less fraction.
pub(super) fn fraction(cursor: &Cursor<'_>, atom: &Atom) -> Node {
    let numerator = part(cursor, atom.numerator.as_deref(), "empty numerator");
    let denominator = part(cursor, atom.denominator.as_deref(), "empty denominator");
    let node = if !atom.has_bar {
        Node::apply_n("binom", vec![numerator, denominator])
    } else {
        match (numerator.as_integer(), denominator.as_integer()) {
            (Some(p), Some(q)) if q != 0 => Node::rational(p, q),
            _ => Node::binary("/", numerator, denominator),
        }
    };
    attach_atom_scripts(cursor, node, atom)
}

fn radical(cursor: &Cursor<'_>, atom: &Atom) -> Node {
    let radicand = part(cursor, atom.body.as_deref(), "empty radicand");
    let index = atom
        .index
        .as_deref()
        .and_then(|index| parse_sequence(index, cursor.catalog));
    let node = match index {
        None => Node::apply("sqrt", radicand),
        Some(index) => {
            let exponent = match index.as_integer() {
                Some(n) if n != 0 => Node::rational(1, n),
                _ => Node::binary("/", Node::number(1.0), index),
            };
            Node::apply_n("root", vec![radicand, exponent])
        },
    };
    attach_atom_scripts(cursor, node, atom)
}

fn part(cursor: &Cursor<'_>, atoms: Option<&[Atom]>, missing: &str) -> Node {
    atoms
        .and_then(|atoms| parse_sequence(atoms, cursor.catalog))
        .unwrap_or_else(|| Node::error(None, missing))
}

/// Scripts written on a `\left ... \right` pair belong to the whole group
fn fence_scripts(cursor: &Cursor<'_>, node: Node, opener: &Atom) -> Node {
    if opener.kind == AtomKind::LeftRight {
        attach_atom_scripts(cursor, node, opener)
    } else {
        node
    }
}

fn script(cursor: &Cursor<'_>, atoms: &[Atom]) -> Node {
    parse_sequence(atoms, cursor.catalog).unwrap_or_else(|| Node::error(None, "empty script"))
}

/// Parse the scripts carried by `atom` and attach them to `node`
pub(super) fn attach_atom_scripts(cursor: &Cursor<'_>, node: Node, atom: &Atom) -> Node {
    let sup = atom.superscript.as_deref().map(|s| script(cursor, s));
    let sub = atom.subscript.as_deref().map(|s| script(cursor, s));
    attach_scripts(node, sup, sub)
}

/// A second superscript raises the whole node (`pow`); a second subscript
/// wraps it in an invisible group first.
fn attach_scripts(mut node: Node, sup: Option<Node>, sub: Option<Node>) -> Node {
    if let Some(sub) = sub {
        if node.subscript.is_some() {
            node = Node::group(node, None);
        }
        node.subscript = Some(Box::new(sub));
    }
    if let Some(sup) = sup {
        if node.superscript.is_some() {
            node = Node::apply_n("pow", vec![node, sup]);
        } else {
            node.superscript = Some(Box::new(sup));
        }
    }
    node
}

fn function_or_identifier<'a>(cursor: &mut Cursor<'a>, atom: &'a Atom) -> Node {
    cursor.index += 1;
    if atom.kind == AtomKind::Font {
        return font_run(cursor, atom);
    }

    let mut name = cursor.canonical(atom).into_owned();
    let is_function = atom.kind == AtomKind::Op || cursor.catalog.is_known_function(&name);
    if !is_function || !starts_argument(cursor) {
        let node = NodeKind::Symbol {
            name,
            variant: atom.variant,
        };
        return attach_atom_scripts(cursor, node.into(), atom);
    }

    let mut sup = atom.superscript.as_deref().map(|s| script(cursor, s));
    let sub = atom.subscript.as_deref().map(|s| script(cursor, s));
    if sup.as_ref().is_some_and(is_minus_one) {
        if let Some(inverse) = cursor.catalog.inverse_of(&name) {
            name = inverse.to_string();
            sup = None;
        }
    }

    let (args, fence) = function_arguments(cursor);
    let mut node = Node::apply_n(name.as_str(), args);
    if let Some(fence) = fence {
        node = node.with_fence(fence);
    }
    if cursor.catalog.is_large_operator(&name) {
        node.with_limits(sub, sup)
    } else {
        attach_scripts(node, sup, sub)
    }
}

/// Whether a function argument follows, a signed one included
fn starts_argument(cursor: &mut Cursor<'_>) -> bool {
    let Some(next) = cursor.peek() else {
        return false;
    };
    if cursor.starts_primary(next) {
        return true;
    }
    next.kind == AtomKind::Bin
        && matches!(&*cursor.canonical(next), "+" | "-")
        && cursor.peek_next().is_some_and(|a| cursor.starts_primary(a))
}

/// Argument list of a function; a fenced argument hands its fence to the
/// application and a comma list becomes the argument sequence
fn function_arguments(cursor: &mut Cursor<'_>) -> (Vec<Node>, Option<Fence>) {
    let Some(next) = cursor.peek() else {
        return (Vec::new(), None);
    };
    if opens_fence(next) && !next.has_scripts() {
        if let Some(fenced) = parse_fenced(cursor) {
            return fenced_arguments(fenced);
        }
    }
    match term(cursor, Product::Argument) {
        Some(arg) => (vec![arg], None),
        None => (Vec::new(), None),
    }
}

fn fenced_arguments(fenced: Fenced) -> (Vec<Node>, Option<Fence>) {
    if fenced.function().is_some() {
        return (vec![fenced.into_node()], None);
    }
    let fence = fenced.fence();
    let args = fenced.inner.map(flatten_commas).unwrap_or_default();
    (args, Some(fence))
}

/// Split a comma chain into its elements
pub(super) fn flatten_commas(node: Node) -> Vec<Node> {
    let mut items = Vec::new();
    let mut node = node;
    while !node.has_scripts() {
        match node.kind {
            NodeKind::Binary { op, lhs, rhs } if op == "," => {
                items.push(*rhs);
                node = *lhs;
            },
            kind => {
                node.kind = kind;
                break;
            },
        }
    }
    items.push(node);
    items.reverse();
    items
}

fn is_minus_one(node: &Node) -> bool {
    if node.as_integer() == Some(-1) {
        return true;
    }
    match &node.kind {
        NodeKind::Unary { op, rhs } => op == "-" && rhs.as_integer() == Some(1),
        _ => false,
    }
}

/// Styled run: a run of single letters is one styled identifier, anything
/// else parses its body and drops the style
fn font_run(cursor: &Cursor<'_>, atom: &Atom) -> Node {
    let body = atom.body.as_deref().unwrap_or_default();
    let letters = !body.is_empty()
        && body.iter().all(|a| {
            a.kind == AtomKind::Ord && !a.has_scripts() && a.value.chars().all(|c| c.is_ascii_alphabetic())
        });
    let node = match body {
        [single] if single.kind == AtomKind::Ord && !single.has_scripts() && !single.is_digit() => {
            let name = cursor.catalog.canonical_name(&single.value).into_owned();
            styled(name, atom)
        },
        _ if letters => styled(body.iter().map(|a| a.value.as_str()).collect::<String>(), atom),
        _ => parse_sequence(body, cursor.catalog).unwrap_or_else(|| Node::error(None, "empty style")),
    };
    attach_atom_scripts(cursor, node, atom)
}

fn styled(name: String, atom: &Atom) -> Node {
    match atom.variant {
        Some(variant) => Node::styled_symbol(name, variant),
        None => Node::symbol(name),
    }
}

/// Postfix stage: script carriers, postfix functions and `f(x)`
fn decorate(cursor: &mut Cursor<'_>, mut node: Node) -> Node {
    while let Some(atom) = cursor.peek() {
        match atom.kind {
            AtomKind::SupSub => {
                cursor.index += 1;
                node = attach_atom_scripts(cursor, node, atom);
            },
            AtomKind::Ord => {
                let pair = cursor
                    .peek_next()
                    .filter(|_| !atom.has_scripts())
                    .and_then(|next| digraph(&atom.value, &next.value))
                    .filter(|d| d.placement == Placement::Postfix);
                if let Some(pair) = pair {
                    cursor.index += 1;
                    let second = cursor.advance();
                    node = Node::apply(pair.name, node);
                    if let Some(second) = second {
                        node = attach_atom_scripts(cursor, node, second);
                    }
                } else if let Some(name) = postfix_function(&atom.value) {
                    cursor.index += 1;
                    node = attach_atom_scripts(cursor, Node::apply(name, node), atom);
                } else {
                    break;
                }
            },
            _ if opens_parenthesis(atom) && matches!(node.as_symbol(), Some("f" | "g")) => {
                let Some(fenced) = parse_fenced(cursor) else {
                    break;
                };
                let name = node.as_symbol().unwrap_or("f").to_string();
                let (args, fence) = fenced_arguments(fenced);
                let mut apply = Node::apply_n(name, args);
                if let Some(fence) = fence {
                    apply = apply.with_fence(fence);
                }
                node = fence_scripts(cursor, apply, atom);
            },
            _ => break,
        }
    }
    node
}

fn implicit_product(cursor: &mut Cursor<'_>, mut lhs: Node, product: Product) -> Node {
    if product == Product::Single {
        return lhs;
    }
    while let Some(atom) = cursor.peek() {
        if !cursor.starts_primary(atom) {
            break;
        }
        if product == Product::Argument && starts_function(cursor, atom) {
            break;
        }
        let Some(rhs) = term(cursor, Product::Single) else {
            break;
        };
        lhs = Node::binary("*", lhs, rhs);
    }
    lhs
}

fn starts_function<'a>(cursor: &Cursor<'a>, atom: &'a Atom) -> bool {
    match atom.kind {
        AtomKind::Op => true,
        AtomKind::Ord => cursor.catalog.is_known_function(&cursor.canonical(atom)),
        _ => false,
    }
}
