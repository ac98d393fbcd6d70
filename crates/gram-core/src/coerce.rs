//! Lenient integer coercion for loosely-typed log fields.
//!
//! The bot's session logger was never strict about types: counters show up
//! as numbers, numeric strings, or garbage depending on the version that
//! wrote the file. Aggregation treats anything unusable as 0 rather than
//! rejecting the whole log.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Extract an integer from a JSON value when it carries something numeric.
///
/// Accepts numbers (floats truncate toward zero), numeric strings with
/// surrounding whitespace, and booleans. Everything else yields `None`.
pub fn int_opt(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

/// Like [`int_opt`] but defaulting to 0 for anything non-numeric.
pub fn int_or_zero(value: &Value) -> i64 {
    int_opt(value).unwrap_or(0)
}

/// Deserialize a counter field that may be a number or a numeric string.
/// Null and junk come out as 0.
pub fn lenient_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(int_or_zero(&value))
}

/// Deserialize an optional numeric field with the same coercion. Null and
/// junk come out as `None`; callers decide what absence means.
pub fn lenient_count_opt<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(int_opt))
}
