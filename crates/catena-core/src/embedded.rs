//! Lenient decoders for registry payloads.
//!
//! The registry stores nested objects as text, so the same field arrives
//! either as a JSON object or as a string holding one.

use serde::de::{DeserializeOwned, Error};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode a nested object given inline or as an embedded JSON string.
/// `null`, a missing field and a blank string all yield `T::default()`.
pub fn object_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(T::default()),
        Some(Value::String(text)) if text.trim().is_empty() => Ok(T::default()),
        Some(Value::String(text)) => serde_json::from_str(&text).map_err(D::Error::custom),
        Some(other) => serde_json::from_value(other).map_err(D::Error::custom),
    }
}

/// Decode a network id sent either as a number or as a numeric string.
pub fn optional_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number
            .as_u64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid network id: {number}"))),
        Some(Value::String(text)) if text.trim().is_empty() => Ok(None),
        Some(Value::String(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid network id: {text}"))),
        Some(other) => Err(D::Error::custom(format!("invalid network id: {other}"))),
    }
}
