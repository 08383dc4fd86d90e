// Text helpers for LaTeX output

use memchr::{memchr3, memrchr};

/// Whether the buffer ends in a control word such as `\alpha`, so that a
/// following letter would run into it
#[inline]
pub fn ends_with_control_word(buffer: &str) -> bool {
    let bytes = buffer.as_bytes();
    let Some(slash) = memrchr(b'\\', bytes) else {
        return false;
    };
    let word = &bytes[slash + 1..];
    !word.is_empty() && word.iter().all(u8::is_ascii_alphabetic)
}

/// Append `text`, separating it from a preceding control word
#[inline]
pub fn push_spaced(buffer: &mut String, text: &str) {
    if text.starts_with(|c: char| c.is_ascii_alphabetic()) && ends_with_control_word(buffer) {
        buffer.push(' ');
    }
    buffer.push_str(text);
}

#[inline]
fn contains_special(bytes: &[u8]) -> bool {
    memchr3(b'#', b'$', b'%', bytes).is_some()
        || memchr3(b'&', b'_', b'\\', bytes).is_some()
        || memchr3(b'{', b'}', b'~', bytes).is_some()
        || memchr::memchr(b'^', bytes).is_some()
}

/// Escape a run of text for use inside `\text{}`
pub fn escape_text(text: &str, buffer: &mut String) {
    if !contains_special(text.as_bytes()) {
        buffer.push_str(text);
        return;
    }
    for ch in text.chars() {
        match ch {
            '#' | '$' | '%' | '&' | '_' | '{' | '}' => {
                buffer.push('\\');
                buffer.push(ch);
            },
            '\\' => buffer.push_str("\\textbackslash{}"),
            '~' => buffer.push_str("\\textasciitilde{}"),
            '^' => buffer.push_str("\\textasciicircum{}"),
            _ => buffer.push(ch),
        }
    }
}

/// Escape a single-character symbol for math mode
pub fn escape_math_char(ch: char) -> Option<&'static str> {
    match ch {
        '#' => Some("\\#"),
        '$' => Some("\\$"),
        '%' => Some("\\%"),
        '&' => Some("\\&"),
        '_' => Some("\\_"),
        '{' => Some("\\{"),
        '}' => Some("\\}"),
        '~' => Some("\\sim"),
        '\\' => Some("\\backslash"),
        _ => None,
    }
}
