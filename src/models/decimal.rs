//! Deserializers for decimal fields.
//!
//! The API renders Django `DecimalField`s as strings (`"125000.00"`) but
//! computed totals as plain numbers, so every money field accepts both.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Number or numeric string; `null` and unparsable input become `0.0`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_f64(&value).unwrap_or(0.0))
}

/// Number or numeric string; `null` and unparsable input become `None`.
pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_f64(&value))
}
