//! Coercion of loosely-typed numeric inputs.
//!
//! Project records arrive from forms and spreadsheets, so amounts may be JSON
//! numbers, strings carrying thousands separators or currency symbols, or be
//! missing altogether. Nothing in here fails: anything unusable becomes the
//! caller's default.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Coerce a raw JSON value into a number, falling back to `default`.
///
/// - `null` or absent: `default`
/// - number: the number itself
/// - string: every character other than a digit, `.` or `-` is stripped and
///   the longest leading numeric prefix is parsed; no prefix gives `default`
/// - anything else: `default`
pub fn clean_numeric(value: Option<&Value>, default: Decimal) -> Decimal {
    clean_optional(value).unwrap_or(default)
}

/// Same as [`clean_numeric`] but keeps "absent or unusable" distinguishable
/// from a value.
pub fn clean_optional(value: Option<&Value>) -> Option<Decimal> {
    match value? {
        Value::Number(n) => number_to_decimal(n),
        Value::String(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            parse_leading_number(&cleaned)
        }
        _ => None,
    }
}

fn number_to_decimal(n: &serde_json::Number) -> Option<Decimal> {
    let repr = n.to_string();
    Decimal::from_str(&repr)
        .or_else(|_| Decimal::from_scientific(&repr))
        .ok()
        .or_else(|| n.as_f64().and_then(Decimal::from_f64))
}

/// Parse the longest prefix of the form `-?digits(.digits)?`.
fn parse_leading_number(s: &str) -> Option<Decimal> {
    let bytes = s.as_bytes();
    let mut i = 0;
    let negative = bytes.first() == Some(&b'-');
    if negative {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_part = &s[int_start..i];

    let mut frac_part = "";
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        frac_part = &s[frac_start..j];
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut normalized = String::with_capacity(int_part.len() + frac_part.len() + 3);
    if negative {
        normalized.push('-');
    }
    normalized.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        normalized.push('.');
        normalized.push_str(frac_part);
    }
    Decimal::from_str(&normalized).ok()
}
