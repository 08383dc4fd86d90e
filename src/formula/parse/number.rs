// Number literal runs
//
// A run is a maximal sequence of digit atoms with an optional decimal point,
// digit-group separators (`,`, `{,}` or `\,` followed by exactly three
// digits) and an exponent marker (`e`, `E`, `d`, `D`) that is only taken when
// a digit, or a sign and a digit, follows it. The fraction may end in a
// repeating group (`0.1\overline{6}`) or a truncation marker (`3.14\ldots`).

use super::cursor::Cursor;
use super::primary::{attach_atom_scripts, fraction};
use crate::formula::atom::{Atom, AtomKind};
use crate::formula::ast::{Node, NodeKind, Number};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Integer,
    Fraction,
    /// Fraction closed by a repeating group or a truncation marker
    Closed,
    Exponent,
}

/// Digits written out when expanding a repeating group
const REPEATING_SPAN: usize = 40;

/// Whether a number run starts at the cursor
pub fn starts_number(cursor: &Cursor<'_>, atom: &Atom) -> bool {
    atom.is_digit()
        || (atom.is_ord(".") && !atom.has_scripts() && cursor.raw(cursor.index + 1).is_some_and(Atom::is_digit))
}

/// Consume a number run and return its literal, with a following numeric
/// fraction folded in as a mixed number.
pub fn parse_number(cursor: &mut Cursor<'_>) -> Node {
    let mut text = String::with_capacity(16);
    let mut part = Part::Integer;
    let mut last: Option<&Atom> = None;

    while let Some(atom) = cursor.raw(cursor.index) {
        if part == Part::Fraction
            && let Some(cycle) = repeating_digits(atom)
        {
            expand_cycle(&mut text, &cycle);
            part = Part::Closed;
            cursor.index += 1;
            if atom.has_scripts() {
                last = Some(atom);
                break;
            }
            continue;
        }
        if atom.is_digit() && part != Part::Closed {
            text.push_str(&atom.value);
            cursor.index += 1;
            if atom.has_scripts() {
                last = Some(atom);
                break;
            }
            continue;
        }
        if atom.has_scripts() {
            break;
        }
        if part == Part::Integer && atom.is_ord(".") && fraction_follows(cursor, cursor.index + 1) {
            if text.is_empty() {
                text.push('0');
            }
            text.push('.');
            part = Part::Fraction;
            cursor.index += 1;
        } else if part == Part::Fraction && is_truncation_marker(atom) {
            part = Part::Closed;
            cursor.index += 1;
        } else if matches!(part, Part::Integer | Part::Fraction) && is_separator(atom) && group_follows(cursor, cursor.index + 1) {
            cursor.index += 1;
        } else if part != Part::Exponent && is_exponent_marker(atom) {
            let Some(sign_len) = exponent_follows(cursor, cursor.index + 1) else {
                break;
            };
            text.push('e');
            if sign_len == 1 {
                let sign = cursor.catalog.canonical_name(&cursor.atoms[cursor.index + 1].value);
                text.push_str(&sign);
            }
            part = Part::Exponent;
            cursor.index += 1 + sign_len;
        } else {
            break;
        }
    }

    let value = fast_float2::parse(&text).unwrap_or(f64::NAN);
    let node = Node::number(value);
    match last {
        Some(atom) => attach_atom_scripts(cursor, node, atom),
        None if part == Part::Integer => mixed_number(cursor, node),
        None => node,
    }
}

/// `2\frac{1}{2}` reads as `2 + 1/2` when the fraction is a rational literal
fn mixed_number(cursor: &mut Cursor<'_>, whole: Node) -> Node {
    let Some(atom) = cursor.raw(cursor.index) else {
        return whole;
    };
    if atom.kind != AtomKind::Genfrac || !atom.has_bar {
        return whole;
    }
    let frac = fraction(cursor, atom);
    if matches!(frac.kind, NodeKind::Number(Number::Rational(_))) && !frac.has_scripts() {
        cursor.index += 1;
        Node::binary("+", whole, frac)
    } else {
        whole
    }
}

fn digit_at(cursor: &Cursor<'_>, index: usize) -> bool {
    cursor.raw(index).is_some_and(Atom::is_digit)
}

/// A digit or a repeating group after the decimal point
fn fraction_follows(cursor: &Cursor<'_>, index: usize) -> bool {
    cursor
        .raw(index)
        .is_some_and(|a| a.is_digit() || repeating_digits(a).is_some())
}

/// Digits under an `\overline` accent
fn repeating_digits(atom: &Atom) -> Option<String> {
    if atom.kind != AtomKind::Accent || atom.value != "\\overline" {
        return None;
    }
    let body = atom.body.as_deref().filter(|b| !b.is_empty())?;
    body.iter()
        .map(|a| (a.is_digit() && !a.has_scripts()).then_some(a.value.as_str()))
        .collect()
}

/// Write the cycle out far enough to pin down the nearest float
fn expand_cycle(text: &mut String, cycle: &str) {
    let target = text.len() + REPEATING_SPAN;
    while text.len() < target {
        text.push_str(cycle);
    }
}

fn is_truncation_marker(atom: &Atom) -> bool {
    atom.kind == AtomKind::Ord && matches!(atom.value.as_str(), "\\ldots" | "\\dots")
}

fn is_separator(atom: &Atom) -> bool {
    match atom.kind {
        AtomKind::Punct => atom.value == ",",
        AtomKind::Space => atom.value == "\\,",
        AtomKind::Group => atom.is_braced_comma(),
        _ => false,
    }
}

/// Exactly three digits, none carrying scripts except possibly the last
fn group_follows(cursor: &Cursor<'_>, index: usize) -> bool {
    (index..index + 3).all(|i| cursor.raw(i).is_some_and(|a| a.is_digit() && (i == index + 2 || !a.has_scripts())))
        && !digit_at(cursor, index + 3)
}

fn is_exponent_marker(atom: &Atom) -> bool {
    atom.kind == AtomKind::Ord && matches!(atom.value.as_str(), "e" | "E" | "d" | "D")
}

/// Length of the sign after an exponent marker when a digit follows
fn exponent_follows(cursor: &Cursor<'_>, index: usize) -> Option<usize> {
    if digit_at(cursor, index) {
        return Some(0);
    }
    let sign = cursor.raw(index)?;
    let name = cursor.catalog.canonical_name(&sign.value);
    if sign.kind == AtomKind::Bin && (name == "+" || name == "-") && digit_at(cursor, index + 1) {
        Some(1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::atom::atoms_from_latex;
    use crate::formula::catalog::StandardCatalog;

    fn number(latex: &str) -> (Node, usize) {
        let atoms = atoms_from_latex(latex).unwrap();
        let mut cursor = Cursor::new(&atoms, &StandardCatalog);
        let node = parse_number(&mut cursor);
        (node, cursor.index)
    }

    #[test]
    fn test_integer_and_decimal() {
        assert_eq!(number("1234").0, Node::number(1234.0));
        assert_eq!(number("3.25").0, Node::number(3.25));
        assert_eq!(number(".5").0, Node::number(0.5));
    }

    #[test]
    fn test_group_separators() {
        assert_eq!(number("1,234,567").0, Node::number(1_234_567.0));
        assert_eq!(number("1{,}000").0, Node::number(1000.0));
        assert_eq!(number("12\\,345").0, Node::number(12_345.0));
        // a comma not followed by a digit triple ends the run
        let (node, consumed) = number("1,23");
        assert_eq!(node, Node::number(1.0));
        assert_eq!(consumed, 1);
    }

    #[test]
    fn test_exponent_marker() {
        assert_eq!(number("2e3").0, Node::number(2000.0));
        assert_eq!(number("1.5E-2").0, Node::number(0.015));
        assert_eq!(number("4d+1").0, Node::number(40.0));
        let (node, consumed) = number("2e");
        assert_eq!(node, Node::number(2.0));
        assert_eq!(consumed, 1);
        let (_, consumed) = number("2e+x");
        assert_eq!(consumed, 1);
    }

    #[test]
    fn test_scripts_end_run() {
        let (node, consumed) = number("10^2 3");
        assert_eq!(node, Node::number(10.0).with_superscript(Node::number(2.0)));
        assert_eq!(consumed, 2);
    }

    #[test]
    fn test_repeating_group() {
        assert_eq!(number("0.\\overline{3}").0, Node::number(1.0 / 3.0));
        assert_eq!(number("0.1\\overline{6}").0, Node::number(1.0 / 6.0));
        assert_eq!(number("0.\\overline{142857}").0, Node::number(1.0 / 7.0));
        let (node, consumed) = number("66666.\\overline{6}x");
        assert_eq!(node, Node::number(200000.0 / 3.0));
        assert_eq!(consumed, 7);
        // digits after the group start a new factor
        let (_, consumed) = number("0.\\overline{3}4");
        assert_eq!(consumed, 3);
    }

    #[test]
    fn test_truncation_marker() {
        let (node, consumed) = number("3.14159\\ldots x");
        assert_eq!(node, Node::number(3.14159));
        assert_eq!(consumed, 8);
        // only a fraction can be truncated
        let (node, consumed) = number("3\\ldots");
        assert_eq!(node, Node::number(3.0));
        assert_eq!(consumed, 1);
    }

    #[test]
    fn test_mixed_number() {
        let (node, _) = number("2\\frac{1}{2}");
        assert_eq!(node, Node::binary("+", Node::number(2.0), Node::rational(1, 2)));
        let (node, consumed) = number("2\\frac{x}{2}");
        assert_eq!(node, Node::number(2.0));
        assert_eq!(consumed, 1);
    }
}
