//! Tolerant coercion from raw JSON values to the draft's field types.
//!
//! Stored drafts arrive from a client-local slot that older schema
//! versions also wrote, so every field may be a number, a numeric string,
//! `null`, or absent. Each helper here maps all of those to a finite
//! value; none of them can fail.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde_json::Value;

use crate::models::Frequency;

/// Trims whitespace and removes comma thousands separators.
fn clean_numeric_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Coerces a raw value to a [`Decimal`], falling back to `default` only
/// when the value is absent, `null`, or an empty string.
///
/// An explicit zero (the number `0` or the string `"0"`) is preserved,
/// distinguishing "user set zero" from "unset". A non-empty string that
/// does not parse coerces to zero, not to the default.
pub fn decimal_or(value: Option<&Value>, default: Decimal) -> Decimal {
    match value {
        None | Some(Value::Null) => default,
        Some(Value::Number(n)) => number_to_decimal(n),
        Some(Value::String(s)) => {
            let cleaned = clean_numeric_input(s);
            if cleaned.is_empty() {
                return default;
            }
            cleaned.parse().unwrap_or_else(|_| {
                tracing::warn!(input = %s, "non-numeric value in numeric field, coercing to 0");
                Decimal::ZERO
            })
        }
        Some(other) => {
            tracing::warn!(kind = %json_kind(other), "unexpected value in numeric field");
            default
        }
    }
}

/// Coerces a raw value to a [`Decimal`] with a zero fallback. Used for
/// quantities and amounts, which have no named default.
pub fn decimal_or_zero(value: Option<&Value>) -> Decimal {
    decimal_or(value, Decimal::ZERO)
}

/// Coerces a raw value to a count, clamped to `min`. Fractional input
/// truncates toward zero.
pub fn count_at_least(value: Option<&Value>, min: u32) -> u32 {
    let n = decimal_or_zero(value).trunc().to_u32().unwrap_or(0);
    n.max(min)
}

/// Coerces a raw value to a display string. Absent, `null`, and
/// non-scalar values become `""` so nothing downstream ever renders a
/// missing-value token.
pub fn string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Coerces a raw value to a frequency selection. Unknown labels and
/// non-strings are the empty selection.
pub fn frequency(value: Option<&Value>) -> Option<Frequency> {
    match value {
        Some(Value::String(s)) => Frequency::parse(s),
        _ => None,
    }
}

fn number_to_decimal(n: &serde_json::Number) -> Decimal {
    if let Some(i) = n.as_i64() {
        return Decimal::from(i);
    }
    if let Some(u) = n.as_u64() {
        return Decimal::from(u);
    }
    // Lossy path for JSON floats; non-finite input has no JSON encoding
    // but from_f64 still guards it.
    n.as_f64()
        .and_then(Decimal::from_f64)
        .unwrap_or(Decimal::ZERO)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
