// Template filling
//
// Placeholders: `%` first argument, `%0`..`%9` positional arguments, `%^`
// superscript and `%_` subscript including their markers. A missing
// argument renders as `\square`; a missing script renders as nothing.

use super::utils::push_spaced;

const MISSING_ARGUMENT: &str = "\\square";

/// Which scripts a template placed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Placed {
    pub superscript: bool,
    pub subscript: bool,
}

/// Whether the template wraps its argument in its own delimiters
pub fn encloses_argument(template: &str) -> bool {
    template.starts_with("\\left") || template.contains("{%")
}

/// Whether the argument comes first, as in postfix templates like `%!`
pub fn is_postfix(template: &str) -> bool {
    template.starts_with('%') && !template.starts_with("%^") && !template.starts_with("%_")
}

pub fn fill_template(
    buffer: &mut String,
    template: &str,
    args: &[String],
    superscript: Option<&str>,
    subscript: Option<&str>,
) -> Placed {
    let mut placed = Placed::default();
    let mut rest = template;
    while let Some(pos) = rest.find('%') {
        push_spaced(buffer, &rest[..pos]);
        let tail = &rest[pos + 1..];
        let mut chars = tail.chars();
        match chars.next() {
            Some('^') => {
                if let Some(sup) = superscript {
                    buffer.push_str("^{");
                    buffer.push_str(sup);
                    buffer.push('}');
                    placed.superscript = true;
                }
                rest = chars.as_str();
            },
            Some('_') => {
                if let Some(sub) = subscript {
                    buffer.push_str("_{");
                    buffer.push_str(sub);
                    buffer.push('}');
                    placed.subscript = true;
                }
                rest = chars.as_str();
            },
            Some(d) if d.is_ascii_digit() => {
                let index = usize::from(d as u8 - b'0');
                push_argument(buffer, args.get(index));
                rest = chars.as_str();
            },
            _ => {
                push_argument(buffer, args.first());
                rest = tail;
            },
        }
    }
    push_spaced(buffer, rest);
    placed
}

fn push_argument(buffer: &mut String, arg: Option<&String>) {
    match arg {
        Some(arg) => push_spaced(buffer, arg),
        None => push_spaced(buffer, MISSING_ARGUMENT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(template: &str, args: &[&str], sup: Option<&str>, sub: Option<&str>) -> (String, Placed) {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let mut buffer = String::new();
        let placed = fill_template(&mut buffer, template, &args, sup, sub);
        (buffer, placed)
    }

    #[test]
    fn test_single_argument() {
        assert_eq!(fill("\\sqrt{%}", &["x"], None, None).0, "\\sqrt{x}");
        assert_eq!(fill("%!", &["n"], None, None).0, "n!");
        assert_eq!(fill("\\nabla\\times %", &["F"], None, None).0, "\\nabla\\times F");
    }

    #[test]
    fn test_positional_arguments() {
        assert_eq!(fill("\\binom{%0}{%1}", &["n", "k"], None, None).0, "\\binom{n}{k}");
        assert_eq!(fill("\\binom{%0}{%1}", &["n"], None, None).0, "\\binom{n}{\\square}");
        assert_eq!(fill("%0\\bmod %1", &["a", "b"], None, None).0, "a\\bmod b");
    }

    #[test]
    fn test_scripts() {
        let (text, placed) = fill("\\sum%_%^ %", &["i"], Some("n"), Some("i=1"));
        assert_eq!(text, "\\sum_{i=1}^{n} i");
        assert!(placed.superscript && placed.subscript);

        let (text, placed) = fill("\\lim%_ %", &["f"], Some("2"), None);
        assert_eq!(text, "\\lim f");
        assert_eq!(placed, Placed::default());
    }

    #[test]
    fn test_template_shape() {
        assert!(encloses_argument("\\sqrt{%}"));
        assert!(encloses_argument("\\left|%\\right|"));
        assert!(!encloses_argument("%!"));
        assert!(is_postfix("%!"));
        assert!(!is_postfix("\\nabla\\times %"));
    }
}
