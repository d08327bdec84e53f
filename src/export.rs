// Author: Dustin Pilgrim
// License: MIT

use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::ast::Value;
use crate::HoconError;

/// Project a resolved HOCON value into a generic JSON value.
///
/// - Object → JSON object (insertion order kept)
/// - Array → JSON array, element order kept
/// - String → JSON string, unchanged
/// - Empty → `null`
///
/// A substitution or concatenation still pending here means resolution was
/// skipped; that is reported instead of emitting wrong data.
///
/// # Examples
/// ```
/// use hocon_json::ast::Value;
/// use hocon_json::export::project;
///
/// let json = project(&Value::Array(vec![Value::String("1".into()), Value::Empty])).unwrap();
/// assert_eq!(json, serde_json::json!(["1", null]));
/// ```
pub fn project(value: &Value) -> Result<serde_json::Value, HoconError> {
    match value {
        Value::Object(items) => {
            let mut out = serde_json::Map::with_capacity(items.len());
            for (key, item) in items {
                out.insert(key.clone(), project(item)?);
            }
            Ok(serde_json::Value::Object(out))
        }
        Value::Array(items) => items
            .iter()
            .map(project)
            .collect::<Result<Vec<_>, _>>()
            .map(serde_json::Value::Array),
        Value::String(s) => Ok(serde_json::Value::String(s.clone())),
        Value::Empty => Ok(serde_json::Value::Null),
        pending => Err(unresolved(pending)),
    }
}

fn unresolved(value: &Value) -> HoconError {
    let message = match value {
        Value::Substitution(sub) => format!(
            "substitution ${{{}}} at {}:{} was never resolved",
            sub.dotted(),
            sub.line,
            sub.column
        ),
        other => format!("{} was never resolved", other.kind()),
    };
    HoconError::Unresolved {
        message,
        code: Some(501),
    }
}

/// Compact JSON text of a resolved value.
pub fn to_json_string(value: &Value) -> Result<String, HoconError> {
    Ok(serde_json::to_string(&project(value)?)?)
}

/// Indented JSON text of a resolved value.
pub fn to_json_string_pretty(value: &Value) -> Result<String, HoconError> {
    Ok(serde_json::to_string_pretty(&project(value)?)?)
}

/// Serializes like `project`, without building the intermediate JSON tree.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Object(items) => {
                let mut map = serializer.serialize_map(Some(items.len()))?;
                for (key, item) in items {
                    map.serialize_entry(key, item)?;
                }
                map.end()
            }
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::String(s) => serializer.serialize_str(s),
            Value::Empty => serializer.serialize_unit(),
            pending => Err(S::Error::custom(unresolved(pending))),
        }
    }
}
