// Numeric formatting
//
// Floats go through their shortest round-trip decimal text, then through the
// same digit pipeline as caller-supplied digit strings: decompose into
// significant digits and a decimal exponent, round half-up to the precision,
// place the decimal point (plain, scientific or engineering), group, and mark
// repeating or truncated fractions.

use smallvec::SmallVec;

use super::options::{LatexOptions, ScientificNotation};
use crate::formula::ast::{Number, parse_rational};

const NAN: &str = "\\text{NaN}";
const INFINITY: &str = "\\infty";

/// Auto notation goes scientific at or above this decimal exponent
const AUTO_MAX_EXPONENT: i32 = 21;
/// and at or below this one
const AUTO_MIN_EXPONENT: i32 = -7;

/// Integers up to this magnitude are exact in an `f64` and print in full
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;
/// Significant digits of `MAX_EXACT_INTEGER`
const EXACT_INTEGER_DIGITS: usize = 16;

const MAX_CYCLE_LEN: usize = 17;
/// Fewest digits a repeating region must cover
const MIN_CYCLE_SPAN: usize = 6;

/// Format a number literal as LaTeX
pub fn format_number(number: &Number, options: &LatexOptions) -> String {
    let mut buf = String::with_capacity(24);
    write_number(&mut buf, number, options);
    buf
}

/// Append a number literal to `buf`
pub fn write_number(buf: &mut String, number: &Number, options: &LatexOptions) {
    match number {
        Number::Float(value) => write_float(buf, *value, options),
        Number::Rational(text) => write_rational(buf, text),
    }
}

/// Format a decimal digit string such as `"1234.5"`, `"-0.25"` or `"1e-9"`.
///
/// Text that is not a decimal renders as `\text{NaN}` unless it names an
/// infinity.
pub fn format_decimal_str(text: &str, options: &LatexOptions) -> String {
    let mut buf = String::with_capacity(text.len() + 8);
    write_decimal_str(&mut buf, text, options);
    buf
}

fn write_decimal_str(buf: &mut String, text: &str, options: &LatexOptions) {
    match Decimal::parse(text) {
        Some(decimal) => write_decimal(buf, decimal, options.precision, options),
        None => match fast_float2::parse::<f64, _>(text.trim()) {
            Ok(value) if !value.is_finite() => write_float(buf, value, options),
            _ => buf.push_str(NAN),
        },
    }
}

fn write_float(buf: &mut String, value: f64, options: &LatexOptions) {
    if value.is_nan() {
        buf.push_str(NAN);
    } else if value.is_infinite() {
        if value < 0.0 {
            buf.push('-');
        }
        buf.push_str(INFINITY);
    } else if value == 0.0 {
        buf.push('0');
    } else {
        let precision = if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
            options.precision.max(EXACT_INTEGER_DIGITS)
        } else {
            options.precision
        };
        let mut text = ryu::Buffer::new();
        match Decimal::parse(text.format_finite(value)) {
            Some(decimal) => write_decimal(buf, decimal, precision, options),
            None => buf.push_str(NAN),
        }
    }
}

fn write_rational(buf: &mut String, text: &str) {
    let Some((numer, denom)) = parse_rational(text) else {
        buf.push_str(NAN);
        return;
    };
    let (mut numer, mut denom) = (i128::from(numer), i128::from(denom));
    if denom == 0 {
        match numer.signum() {
            1 => buf.push_str(INFINITY),
            -1 => {
                buf.push('-');
                buf.push_str(INFINITY);
            },
            _ => buf.push_str(NAN),
        }
        return;
    }
    if numer == 0 {
        buf.push('0');
        return;
    }
    if denom < 0 {
        numer = -numer;
        denom = -denom;
    }
    let mut digits = itoa::Buffer::new();
    if denom == 1 {
        buf.push_str(digits.format(numer));
        return;
    }
    if numer < 0 {
        buf.push('-');
    }
    buf.push_str("\\frac{");
    buf.push_str(digits.format(numer.abs()));
    buf.push_str("}{");
    buf.push_str(digits.format(denom));
    buf.push('}');
}

/// Significant digits and the decimal exponent of the first one.
///
/// The value is `d0.d1d2… × 10^exponent`; `digits` holds ASCII digits
/// without leading or trailing zeros and is empty for zero.
#[derive(Debug, Clone, PartialEq)]
struct Decimal {
    negative: bool,
    digits: SmallVec<[u8; 24]>,
    exponent: i32,
}

impl Decimal {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (negative, body) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        let (mantissa, exponent) = match body.find(['e', 'E']) {
            Some(i) => (&body[..i], body[i + 1..].parse::<i32>().ok()?),
            None => (body, 0),
        };
        let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if int.is_empty() && frac.is_empty() {
            return None;
        }
        if !int.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }

        let all: SmallVec<[u8; 24]> = int.bytes().chain(frac.bytes()).collect();
        let (Some(lead), Some(last)) = (
            all.iter().position(|&b| b != b'0'),
            all.iter().rposition(|&b| b != b'0'),
        ) else {
            return Some(Self {
                negative: false,
                digits: SmallVec::new(),
                exponent: 0,
            });
        };
        let int_len = i32::try_from(int.len()).ok()?;
        let lead_offset = i32::try_from(lead).ok()?;
        Some(Self {
            negative,
            digits: SmallVec::from_slice(&all[lead..=last]),
            exponent: (int_len - lead_offset - 1).checked_add(exponent)?,
        })
    }

    /// Round half-up to `precision` significant digits. Returns whether
    /// the result was cut short, i.e. still uses every allowed digit after
    /// dropping some.
    fn round(&mut self, precision: usize) -> bool {
        if self.digits.len() <= precision {
            return false;
        }
        let round_up = self.digits[precision] >= b'5';
        self.digits.truncate(precision);
        if round_up {
            let mut i = precision;
            loop {
                if i == 0 {
                    self.digits.insert(0, b'1');
                    self.digits.truncate(precision);
                    self.exponent = self.exponent.saturating_add(1);
                    break;
                }
                i -= 1;
                if self.digits[i] == b'9' {
                    self.digits[i] = b'0';
                } else {
                    self.digits[i] += 1;
                    break;
                }
            }
        }
        while self.digits.last() == Some(&b'0') {
            self.digits.pop();
        }
        self.digits.len() == precision
    }
}

fn write_decimal(buf: &mut String, mut decimal: Decimal, precision: usize, options: &LatexOptions) {
    if decimal.digits.is_empty() {
        buf.push('0');
        return;
    }
    let truncated = decimal.round(precision.max(1));
    let exponent = decimal.exponent;
    let (int_len, shown_exponent) = match options.scientific_notation {
        ScientificNotation::Auto if exponent > AUTO_MIN_EXPONENT && exponent < AUTO_MAX_EXPONENT => {
            (exponent + 1, 0)
        },
        ScientificNotation::Auto | ScientificNotation::On => (1, exponent),
        ScientificNotation::Engineering => {
            let shift = exponent.rem_euclid(3);
            (shift + 1, exponent - shift)
        },
    };

    if decimal.negative {
        buf.push('-');
    }
    let (int, frac) = split_digits(&decimal.digits, int_len);
    push_integer(buf, &int, &options.group_separator);
    if !frac.is_empty() {
        buf.push_str(&options.decimal_marker);
        push_fraction(buf, &frac, truncated, options);
    }
    if shown_exponent != 0 {
        push_exponent(buf, shown_exponent, options);
    }
}

/// Place the decimal point after `int_len` digits, padding with zeros
fn split_digits(digits: &[u8], int_len: i32) -> (String, String) {
    let mut int = String::with_capacity(digits.len() + 1);
    let mut frac = String::with_capacity(digits.len());
    match usize::try_from(int_len) {
        Ok(n) if n > 0 => {
            let split = n.min(digits.len());
            int.extend(digits[..split].iter().map(|&b| char::from(b)));
            int.extend(std::iter::repeat_n('0', n - split));
            frac.extend(digits[split..].iter().map(|&b| char::from(b)));
        },
        _ => {
            int.push('0');
            frac.extend(std::iter::repeat_n('0', int_len.unsigned_abs() as usize));
            frac.extend(digits.iter().map(|&b| char::from(b)));
        },
    }
    (int, frac)
}

/// Integer digits grouped by three from the right
fn push_integer(buf: &mut String, digits: &str, separator: &str) {
    if separator.is_empty() || digits.len() <= 3 {
        buf.push_str(digits);
        return;
    }
    let head = match digits.len() % 3 {
        0 => 3,
        r => r,
    };
    buf.push_str(&digits[..head]);
    let mut rest = &digits[head..];
    while !rest.is_empty() {
        buf.push_str(separator);
        buf.push_str(&rest[..3]);
        rest = &rest[3..];
    }
}

/// Fraction digits grouped by three from the left
fn push_fraction_digits(buf: &mut String, digits: &str, separator: &str) {
    if separator.is_empty() {
        buf.push_str(digits);
        return;
    }
    let mut rest = digits;
    while rest.len() > 3 {
        buf.push_str(&rest[..3]);
        buf.push_str(separator);
        rest = &rest[3..];
    }
    buf.push_str(rest);
}

fn push_fraction(buf: &mut String, frac: &str, truncated: bool, options: &LatexOptions) {
    if truncated && !options.begin_repeating_digits.is_empty() {
        // the last digit was rounded and cannot be trusted
        let observed = &frac[..frac.len() - 1];
        if let Some((offset, len)) = find_cycle(observed) {
            push_fraction_digits(buf, &observed[..offset], &options.group_separator);
            buf.push_str(&options.begin_repeating_digits);
            buf.push_str(&observed[offset..offset + len]);
            buf.push_str(&options.end_repeating_digits);
            return;
        }
    }
    push_fraction_digits(buf, frac, &options.group_separator);
    if truncated {
        buf.push_str(&options.truncation_marker);
    }
}

/// Shortest offset, then shortest cycle, that reproduces every digit from
/// the offset on. Returns `(offset, cycle length)`.
fn find_cycle(digits: &str) -> Option<(usize, usize)> {
    let bytes = digits.as_bytes();
    for offset in 0..bytes.len() {
        let region = &bytes[offset..];
        if region.len() < MIN_CYCLE_SPAN {
            break;
        }
        for len in 1..=MAX_CYCLE_LEN {
            if region.len() < (2 * len).max(MIN_CYCLE_SPAN) {
                break;
            }
            if region.iter().enumerate().all(|(i, b)| *b == region[i % len]) {
                return Some((offset, len));
            }
        }
    }
    None
}

fn push_exponent(buf: &mut String, exponent: i32, options: &LatexOptions) {
    let mut digits = itoa::Buffer::new();
    if options.exponent_marker.is_empty() {
        buf.push_str(&options.exponent_product);
        buf.push_str("10^{");
        buf.push_str(digits.format(exponent));
        buf.push('}');
    } else {
        buf.push_str(&options.exponent_marker);
        buf.push_str(digits.format(exponent));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float(value: f64) -> String {
        format_number(&Number::Float(value), &LatexOptions::default())
    }

    fn float_with(value: f64, options: &LatexOptions) -> String {
        format_number(&Number::Float(value), options)
    }

    fn rational(text: &str) -> String {
        format_number(&Number::Rational(text.to_string()), &LatexOptions::default())
    }

    #[test]
    fn test_repeating_digits() {
        assert_eq!(float(1.0 / 3.0), "0.\\overline{3}");
        assert_eq!(float(2.0 / 3.0), "0.\\overline{6}");
        assert_eq!(float(1.0 / 7.0), "0.\\overline{142857}");
        assert_eq!(float(1.0 / 6.0), "0.1\\overline{6}");
        assert_eq!(float(200000.0 / 3.0), "66666.\\overline{6}");
    }

    #[test]
    fn test_truncation_marker() {
        assert_eq!(float(std::f64::consts::PI), "3.14159265358979\\ldots");
        let options = LatexOptions::default().with_repeating_digits("", "");
        assert_eq!(float_with(1.0 / 3.0, &options), "0.333333333333333\\ldots");
        let options = LatexOptions::default().with_precision(3);
        assert_eq!(float_with(2.71828, &options), "2.72\\ldots");
    }

    #[test]
    fn test_exact_values() {
        assert_eq!(float(0.1 + 0.2), "0.3");
        assert_eq!(float(1.5), "1.5");
        assert_eq!(float(-0.25), "-0.25");
        assert_eq!(float(0.0), "0");
        assert_eq!(float(-0.0), "0");
    }

    #[test]
    fn test_integers() {
        assert_eq!(float(42.0), "42");
        assert_eq!(float(-7.0), "-7");
        assert_eq!(float(1e20), "100000000000000000000");
        assert_eq!(float(123456789012345.0), "123456789012345");
        // exact integers print in full regardless of precision
        assert_eq!(float(1234567890123456.0), "1234567890123456");
        assert_eq!(float(9007199254740992.0), "9007199254740992");
        let options = LatexOptions::default().with_precision(3);
        assert_eq!(float_with(12345.0, &options), "12345");
    }

    #[test]
    fn test_rounding_to_precision() {
        let options = LatexOptions::default().with_precision(3);
        assert_eq!(float_with(1234.5, &options), "1230");
        assert_eq!(float_with(9.9999, &options), "10");
        assert_eq!(
            format_decimal_str("1234567890123456789", &LatexOptions::default()),
            "1234567890123460000"
        );
    }

    #[test]
    fn test_auto_notation() {
        assert_eq!(float(1e21), "1\\cdot10^{21}");
        assert_eq!(float(1.5e-7), "1.5\\cdot10^{-7}");
        assert_eq!(float(0.000001), "0.000001");
    }

    #[test]
    fn test_scientific_and_engineering() {
        let on = LatexOptions::default().with_scientific_notation(ScientificNotation::On);
        assert_eq!(float_with(1500.0, &on), "1.5\\cdot10^{3}");
        assert_eq!(float_with(2.5, &on), "2.5");
        let marker = on.clone().with_exponent_marker("e");
        assert_eq!(float_with(1500.0, &marker), "1.5e3");

        let engineering = LatexOptions::default().with_scientific_notation(ScientificNotation::Engineering);
        assert_eq!(float_with(12345.0, &engineering), "12.345\\cdot10^{3}");
        assert_eq!(float_with(0.000123, &engineering), "123\\cdot10^{-6}");
        assert_eq!(float_with(1.5, &engineering), "1.5");
    }

    #[test]
    fn test_grouping_and_marker() {
        let options = LatexOptions::default().with_group_separator("\\,");
        assert_eq!(float_with(1234567.891, &options), "1\\,234\\,567.891");
        assert_eq!(float_with(0.123456, &options), "0.123\\,456");
        assert_eq!(float_with(123.0, &options), "123");
        let options = LatexOptions::default().with_decimal_marker("{,}");
        assert_eq!(float_with(1.5, &options), "1{,}5");
    }

    #[test]
    fn test_rationals_bypass_rounding() {
        assert_eq!(rational("1/3"), "\\frac{1}{3}");
        assert_eq!(rational("-1/3"), "-\\frac{1}{3}");
        assert_eq!(rational("3/-4"), "-\\frac{3}{4}");
        assert_eq!(rational("5/1"), "5");
        assert_eq!(rational("0/4"), "0");
        let options = LatexOptions::default().with_precision(1);
        let number = Number::Rational("123/457".to_string());
        assert_eq!(format_number(&number, &options), "\\frac{123}{457}");
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(rational("1/0"), "\\infty");
        assert_eq!(rational("-1/0"), "-\\infty");
        assert_eq!(rational("0/0"), "\\text{NaN}");
        assert_eq!(rational("x/2"), "\\text{NaN}");
        assert_eq!(float(f64::NAN), "\\text{NaN}");
        assert_eq!(float(f64::INFINITY), "\\infty");
        assert_eq!(float(f64::NEG_INFINITY), "-\\infty");
    }

    #[test]
    fn test_decimal_strings() {
        let options = LatexOptions::default();
        assert_eq!(format_decimal_str("00123.4500", &options), "123.45");
        assert_eq!(format_decimal_str("-0.0", &options), "0");
        assert_eq!(format_decimal_str("1e3", &options), "1000");
        assert_eq!(format_decimal_str(".5", &options), "0.5");
        assert_eq!(format_decimal_str("abc", &options), "\\text{NaN}");
        assert_eq!(format_decimal_str("inf", &options), "\\infty");
    }

    #[test]
    fn test_rounding_at_largest_exponent() {
        let options = LatexOptions::default().with_precision(1);
        assert_eq!(
            format_decimal_str("9.99e2147483647", &options),
            "1\\cdot10^{2147483647}"
        );
    }

    #[test]
    fn test_find_cycle() {
        assert_eq!(find_cycle("333333"), Some((0, 1)));
        assert_eq!(find_cycle("1666666"), Some((1, 1)));
        assert_eq!(find_cycle("14285714285714"), Some((0, 6)));
        assert_eq!(find_cycle("33"), None);
        assert_eq!(find_cycle("1415926535897"), None);
    }
}
