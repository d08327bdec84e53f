// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashMap;

use crate::{HoconError, Value};

// HOCON keeps every scalar as text; typed access parses it on the way out.

impl TryFrom<Value> for String {
    type Error = HoconError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(HoconError::TypeError {
                message: format!("Expected string, got {}", other.kind()),
                hint: Some("Use a string value in your config".into()),
                code: Some(405),
            }),
        }
    }
}

macro_rules! numeric_try_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TryFrom<Value> for $ty {
                type Error = HoconError;

                fn try_from(value: Value) -> Result<Self, Self::Error> {
                    match value {
                        Value::String(s) => s.trim().parse::<$ty>().map_err(|e| HoconError::TypeError {
                            message: format!("'{}' is not a valid {}: {}", s, stringify!($ty), e),
                            hint: Some(format!("Use a {} value in your config", stringify!($ty))),
                            code: Some(406),
                        }),
                        other => Err(HoconError::TypeError {
                            message: format!("Expected number, got {}", other.kind()),
                            hint: Some("Use a number value in your config".into()),
                            code: Some(406),
                        }),
                    }
                }
            }
        )*
    };
}

numeric_try_from!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

impl TryFrom<Value> for bool {
    type Error = HoconError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => match s.trim() {
                "true" | "yes" | "on" => Ok(true),
                "false" | "no" | "off" => Ok(false),
                other => Err(HoconError::TypeError {
                    message: format!("Invalid boolean value '{}'", other),
                    hint: Some("Use true/false, yes/no or on/off".into()),
                    code: Some(407),
                }),
            },
            other => Err(HoconError::TypeError {
                message: format!("Expected boolean, got {}", other.kind()),
                hint: None,
                code: Some(407),
            }),
        }
    }
}

impl<T> TryFrom<Value> for Vec<T>
where
    T: TryFrom<Value, Error = HoconError>,
{
    type Error = HoconError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) => items.into_iter().map(T::try_from).collect(),
            other => Err(HoconError::TypeError {
                message: format!("Expected array, got {}", other.kind()),
                hint: Some("Use an array [...] in your config".into()),
                code: Some(408),
            }),
        }
    }
}

impl<T> TryFrom<Value> for Option<T>
where
    T: TryFrom<Value, Error = HoconError>,
{
    type Error = HoconError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Empty => Ok(None),
            v => Ok(Some(T::try_from(v)?)),
        }
    }
}

impl TryFrom<Value> for HashMap<String, String> {
    type Error = HoconError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(items) => items
                .into_iter()
                .map(|(key, item)| -> Result<(String, String), HoconError> {
                    Ok((key, String::try_from(item)?))
                })
                .collect(),
            other => Err(HoconError::TypeError {
                message: format!("Expected object, got {}", other.kind()),
                hint: Some("Use an object with string values".into()),
                code: Some(409),
            }),
        }
    }
}
