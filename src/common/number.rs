//! Numeric strings with XPath `number()` semantics.
//!
//! XPath numbers are plain decimals: an optional minus sign, digits with an
//! optional fraction, no exponent, no plus sign and no `Infinity`/`NaN`
//! spellings. Surrounding XML whitespace is ignored when coercing.

use crate::common::whitespace::trim_xml;

/// Check whether `s` (without surrounding whitespace) is an XPath number.
///
/// # Examples
///
/// ```
/// use svgtextbox::common::number::is_decimal;
/// assert!(is_decimal("-12.5"));
/// assert!(is_decimal(".5"));
/// assert!(is_decimal("3."));
/// assert!(!is_decimal("1e5"));
/// assert!(!is_decimal("+1"));
/// assert!(!is_decimal(" 1"));
/// ```
pub fn is_decimal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };
    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());

    match frac_part {
        None => !int_part.is_empty() && all_digits(int_part),
        Some(frac) => {
            (!int_part.is_empty() || !frac.is_empty()) && all_digits(int_part) && all_digits(frac)
        },
    }
}

/// Coerce a string to a number the way XPath `number()` does, returning
/// `None` where XPath would produce `NaN`.
///
/// # Examples
///
/// ```
/// use svgtextbox::common::number::coerce;
/// assert_eq!(coerce(" 20 "), Some(20.0));
/// assert_eq!(coerce("-0.5"), Some(-0.5));
/// assert_eq!(coerce("twenty"), None);
/// ```
pub fn coerce(s: &str) -> Option<f64> {
    let trimmed = trim_xml(s);
    if !is_decimal(trimmed) {
        return None;
    }
    fast_float2::parse::<f64, _>(trimmed)
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok())
}

/// Write a number the way XPath `string()` does: integral values have no
/// fraction, everything else uses the shortest round-tripping decimal
/// written without an exponent.
///
/// # Examples
///
/// ```
/// use svgtextbox::common::number::write_number;
///
/// let mut buf = String::new();
/// write_number(&mut buf, 10.0);
/// buf.push(',');
/// write_number(&mut buf, 2.25);
/// assert_eq!(buf, "10,2.25");
/// ```
pub fn write_number(buf: &mut String, n: f64) {
    if n.is_nan() {
        buf.push_str("NaN");
    } else if n.is_infinite() {
        buf.push_str(if n > 0.0 { "Infinity" } else { "-Infinity" });
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        let mut ints = itoa::Buffer::new();
        // -0 prints as 0
        buf.push_str(ints.format(n as i64));
    } else {
        let mut floats = ryu::Buffer::new();
        write_positional(buf, floats.format_finite(n));
    }
}

/// Write ryu's shortest digits (`1.5e-8`, `1e16`, `1000000000000000.0`)
/// in plain positional form.
fn write_positional(buf: &mut String, shortest: &str) {
    let (negative, shortest) = match shortest.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, shortest),
    };
    let (mantissa, exponent) = match shortest.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (shortest, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let mut digits = String::with_capacity(int_part.len() + frac_part.len());
    digits.push_str(int_part);
    digits.push_str(frac_part);
    let point = int_part.len() as i32 + exponent;
    let trimmed = digits.trim_end_matches('0');
    let digits = trimmed.trim_start_matches('0');
    // Leading zeros shift the point left
    let point = point - (trimmed.len() - digits.len()) as i32;

    if negative {
        buf.push('-');
    }
    if digits.is_empty() {
        buf.push('0');
    } else if point <= 0 {
        buf.push_str("0.");
        buf.extend(std::iter::repeat_n('0', (-point) as usize));
        buf.push_str(digits);
    } else if point as usize >= digits.len() {
        buf.push_str(digits);
        buf.extend(std::iter::repeat_n('0', point as usize - digits.len()));
    } else {
        buf.push_str(&digits[..point as usize]);
        buf.push('.');
        buf.push_str(&digits[point as usize..]);
    }
}

/// Format a number with [`write_number`] into a new string.
#[inline]
pub fn format_number(n: f64) -> String {
    let mut s = String::with_capacity(16);
    write_number(&mut s, n);
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_decimal_rejects_degenerate_forms() {
        assert!(!is_decimal(""));
        assert!(!is_decimal("-"));
        assert!(!is_decimal("."));
        assert!(!is_decimal("-."));
        assert!(!is_decimal("1.2.3"));
        assert!(!is_decimal("NaN"));
        assert!(!is_decimal("Infinity"));
        assert!(!is_decimal("0x10"));
    }

    #[test]
    fn test_is_decimal_accepts_xpath_forms() {
        for s in ["0", "007", "-0", "3.", "-.25", "12.50"] {
            assert!(is_decimal(s), "{s} should be a decimal");
        }
    }

    #[test]
    fn test_coerce_trims_xml_whitespace_only() {
        assert_eq!(coerce("\n10\t"), Some(10.0));
        assert_eq!(coerce("\u{a0}10"), None);
        assert_eq!(coerce(""), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(20.0), "20");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(-12.75), "-12.75");
    }

    #[test]
    fn test_format_number_never_uses_exponents() {
        assert_eq!(format_number(1e15), "1000000000000000");
        assert_eq!(format_number(-2e21), "-2000000000000000000000");
        assert_eq!(format_number(1e-7), "0.0000001");
        assert_eq!(format_number(coerce("0.0000001").unwrap()), "0.0000001");
        assert_eq!(format_number(coerce("1000000000000000").unwrap()), "1000000000000000");
        assert_eq!(format_number(1.5e-8), "0.000000015");
        assert_eq!(format_number(1.25e17), "125000000000000000");
        assert_eq!(format_number(123456789.125), "123456789.125");
        assert_eq!(format_number(0.001), "0.001");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }
}
