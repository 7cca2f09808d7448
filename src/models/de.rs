//! Deserialization helpers for AMap's loosely-typed JSON.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a field that AMap sometimes returns as a string and sometimes
/// as an empty array (its convention for "absent"). Anything other than a
/// non-empty string becomes `None`.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    })
}
