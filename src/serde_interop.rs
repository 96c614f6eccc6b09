//! Conversion between this crate's [`Value`] and [`serde_json::Value`],
//! gated behind the `serde_json` feature.
//!
//! Grounded on this repository's existing `serde_json` interop module,
//! which converts a stream of parser events into a `serde_json::Value`;
//! here the conversion is a direct tree-to-tree walk since both sides
//! already hold a complete value.

use serde_json::{Map, Number, Value as SerdeValue};

use crate::value::{Member, Value};

/// Converts this crate's [`Value`] into a [`serde_json::Value`].
///
/// String and object-key bytes are interpreted as UTF-8 and replaced
/// lossily if they are not — `serde_json::Value::String` requires valid
/// UTF-8, `Value::String` does not.
pub fn to_serde_json(value: &Value) -> SerdeValue {
    match value {
        Value::Null => SerdeValue::Null,
        Value::Bool(b) => SerdeValue::Bool(*b),
        Value::Number(n) => Number::from_f64(*n).map(SerdeValue::Number).unwrap_or(SerdeValue::Null),
        Value::String(s) => SerdeValue::String(String::from_utf8_lossy(s).into_owned()),
        Value::Array(elements) => SerdeValue::Array(elements.iter().map(to_serde_json).collect()),
        Value::Object(members) => {
            let mut map = Map::with_capacity(members.len());
            for Member { key, value } in members {
                map.insert(String::from_utf8_lossy(key).into_owned(), to_serde_json(value));
            }
            SerdeValue::Object(map)
        }
    }
}

/// Converts a [`serde_json::Value`] into this crate's [`Value`].
pub fn from_serde_json(value: &SerdeValue) -> Value {
    match value {
        SerdeValue::Null => Value::Null,
        SerdeValue::Bool(b) => Value::Bool(*b),
        SerdeValue::Number(n) => Value::Number(n.as_f64().unwrap_or(0.0)),
        SerdeValue::String(s) => Value::String(s.clone().into_bytes()),
        SerdeValue::Array(elements) => Value::Array(elements.iter().map(from_serde_json).collect()),
        SerdeValue::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| Member::new(k.clone().into_bytes(), from_serde_json(v)))
                .collect(),
        ),
    }
}
