//! Number parsing and formatting for calculator operands.
//!
//! Operands live as text on the display. These two functions are the only
//! bridge between that text and `f64`, so both follow the lenient rules a
//! pocket calculator display needs: parse the longest numeric prefix, and
//! print the shortest text that round-trips.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Longest numeric prefix: optional sign, then `Infinity` or a decimal
    /// with optional fraction and exponent.
    static ref FLOAT_PREFIX: Regex = Regex::new(
        r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)"
    ).unwrap();
}

/// Parse the leading number of `text`.
///
/// Leading whitespace is skipped and trailing garbage is ignored
/// (`"12abc"` is 12). Returns NaN when no number prefix exists, which is how
/// the evaluator recognises an operand it has to skip.
pub fn parse_float(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let Some(m) = FLOAT_PREFIX.find(trimmed) else {
        return f64::NAN;
    };

    let matched = m.as_str();
    let (negative, unsigned) = match matched.as_bytes().first() {
        Some(b'-') => (true, &matched[1..]),
        Some(b'+') => (false, &matched[1..]),
        _ => (false, matched),
    };

    let magnitude = if unsigned == "Infinity" {
        f64::INFINITY
    } else {
        unsigned.parse::<f64>().unwrap_or(f64::NAN)
    };

    if negative { -magnitude } else { magnitude }
}

/// Format a number for the display.
///
/// Integers print without a fraction, negative zero prints as `0`, and very
/// large or very small magnitudes switch to exponent form with an explicit
/// exponent sign (`1e+21`, `1.5e-7`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        return text.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        };
    }

    format!("{}", value)
}
