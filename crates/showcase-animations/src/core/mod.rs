//! Stateless building blocks: numeric transforms, the color palette and
//! the private-state counter.

pub mod counter;
pub mod palette;

pub use counter::{create_counter, Counter};
pub use palette::{ColorPalette, Seed, Xorshift64};

use crate::error::{ShowcaseError, ShowcaseResult};

/// Numeric transform selected by an operation tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `n * n`
    Square,
    /// `n * n * n`
    Cube,
    /// `n * 2`
    Double,
    /// Unrecognized tag, returns the input unchanged
    Identity,
}

impl Operation {
    /// Resolves an operation tag; unknown tags map to [`Operation::Identity`]
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "square" => Self::Square,
            "cube" => Self::Cube,
            "double" => Self::Double,
            _ => Self::Identity,
        }
    }

    /// Returns the tag for this operation
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Cube => "cube",
            Self::Double => "double",
            Self::Identity => "identity",
        }
    }

    /// Applies the transform
    #[must_use]
    pub fn apply(&self, n: f64) -> f64 {
        match self {
            Self::Square => n * n,
            Self::Cube => n * n * n,
            Self::Double => n * 2.0,
            Self::Identity => n,
        }
    }
}

/// Applies the operation named by `tag` to `n`
#[must_use]
pub fn calculate(n: f64, tag: &str) -> f64 {
    Operation::from_tag(tag).apply(n)
}

/// Parses the longest numeric prefix of `input`, the way a browser's
/// `parseFloat` reads form fields ("12px" is 12, "abc" is invalid).
pub fn parse_number(input: &str) -> ShowcaseResult<f64> {
    let trimmed = input.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if trimmed[end..].starts_with("Infinity") {
        let value = if trimmed.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        return Ok(value);
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return Err(ShowcaseError::invalid_input(input));
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    trimmed[..end]
        .parse::<f64>()
        .map_err(|_| ShowcaseError::invalid_input(input))
}

/// Appends `item` and drops the oldest entries beyond `limit`
pub(crate) fn push_bounded<T>(log: &mut Vec<T>, item: T, limit: usize) {
    log.push(item);
    if log.len() > limit {
        let overflow = log.len() - limit;
        log.drain(..overflow);
    }
}

/// Formats a number the way the page's script prints it: shortest
/// round-trip digits, plain notation for decimal exponents in `[-7, 21)`,
/// `1e+22` / `1e-7` style outside that range.
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    if n < 0.0 {
        return format!("-{}", format_number(-n));
    }

    // `{:e}` yields the shortest round-trip digits as `d.ddde<exp>`
    let scientific = format!("{n:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let exponent: i64 = exponent.parse().unwrap_or(0);
    let k = digits.len() as i64;
    // Position of the decimal point relative to the digit string
    let point = exponent + 1;

    if k <= point && point <= 21 {
        format!("{digits}{}", "0".repeat((point - k) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{int}.{frac}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat((-point) as usize))
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{lead}e{sign}{}", exponent.abs())
        } else {
            format!("{lead}.{rest}e{sign}{}", exponent.abs())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_from_tag() {
        assert_eq!(Operation::from_tag("square"), Operation::Square);
        assert_eq!(Operation::from_tag("cube"), Operation::Cube);
        assert_eq!(Operation::from_tag("double"), Operation::Double);
        assert_eq!(Operation::from_tag("halve"), Operation::Identity);
    }

    #[test]
    fn test_calculate() {
        assert_eq!(calculate(4.0, "square"), 16.0);
        assert_eq!(calculate(3.0, "cube"), 27.0);
        assert_eq!(calculate(2.5, "double"), 5.0);
        assert_eq!(calculate(7.0, "unknown"), 7.0);
    }

    #[test]
    fn test_operation_tag_roundtrip() {
        for op in [Operation::Square, Operation::Cube, Operation::Double] {
            assert_eq!(Operation::from_tag(op.tag()), op);
        }
    }

    #[test]
    fn test_parse_number_plain() {
        assert_eq!(parse_number("42").unwrap(), 42.0);
        assert_eq!(parse_number("  -3.5").unwrap(), -3.5);
        assert_eq!(parse_number("+.5").unwrap(), 0.5);
        assert_eq!(parse_number("7.").unwrap(), 7.0);
    }

    #[test]
    fn test_parse_number_prefix() {
        assert_eq!(parse_number("12px").unwrap(), 12.0);
        assert_eq!(parse_number("1e3x").unwrap(), 1000.0);
        assert_eq!(parse_number("2e").unwrap(), 2.0);
        assert_eq!(parse_number("3.25.1").unwrap(), 3.25);
    }

    #[test]
    fn test_parse_number_infinity() {
        assert_eq!(parse_number("Infinity").unwrap(), f64::INFINITY);
        assert_eq!(parse_number("-Infinity").unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_number_invalid() {
        assert!(matches!(
            parse_number("abc"),
            Err(ShowcaseError::InvalidInput { .. })
        ));
        assert!(parse_number("").is_err());
        assert!(parse_number("-").is_err());
        assert!(parse_number(".").is_err());
        assert!(parse_number("e5").is_err());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(16.0), "16");
        assert_eq!(format_number(-4.0), "-4");
        assert_eq!(format_number(6.25), "6.25");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_push_bounded() {
        let mut log = Vec::new();
        for i in 0..10 {
            push_bounded(&mut log, i, 3);
        }
        assert_eq!(log, [7, 8, 9]);

        let mut none = Vec::new();
        push_bounded(&mut none, 1, 0);
        assert!(none.is_empty());
    }

    #[test]
    fn test_format_number_non_finite() {
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_format_number_large_magnitudes() {
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1e22), "1e+22");
        assert_eq!(format_number(1.5e300), "1.5e+300");
        assert_eq!(format_number(-2.5e25), "-2.5e+25");
        assert_eq!(format_number(123_456_789_012_345_680.0), "123456789012345680");
    }

    #[test]
    fn test_format_number_small_magnitudes() {
        assert_eq!(format_number(0.000_001), "0.000001");
        assert_eq!(format_number(0.000_001_5), "0.0000015");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(1e-7 * 1e-7), "9.999999999999998e-15");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
    }
}
