// Author: Dustin Pilgrim
// License: MIT

use std::sync::atomic::{AtomicUsize, Ordering};

use indexmap::IndexMap;

use crate::HoconError;

/// Insertion-ordered HOCON object.
pub type Object = IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Object(Object),
    Array(Vec<Value>),
    String(String),
    Empty,
    /// Placeholder for `${path}`; replaced by the substitution resolver.
    Substitution(Substitution),
    /// Adjacent values on one line (`foo bar`, `${a} "/x"`, `[1] [2]`).
    Concat(Vec<Value>),
}

/// An unresolved `${...}` reference. The same `id` is carried by the
/// placeholder in the tree and by the entry in `Root::substitutions`.
#[derive(Debug, Clone, PartialEq)]
pub struct Substitution {
    pub id: usize,
    pub path: Vec<String>,
    pub optional: bool,
    pub line: usize,
    pub column: usize,
}

static NEXT_SUBSTITUTION_ID: AtomicUsize = AtomicUsize::new(0);

impl Substitution {
    pub fn new(path: Vec<String>, optional: bool, line: usize, column: usize) -> Self {
        Self {
            id: NEXT_SUBSTITUTION_ID.fetch_add(1, Ordering::Relaxed),
            path,
            optional,
            line,
            column,
        }
    }

    pub fn dotted(&self) -> String {
        self.path.join(".")
    }
}

/// A parsed document: top-level value plus the substitutions still pending in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Root {
    pub value: Value,
    pub substitutions: Vec<Substitution>,
}

impl Default for Root {
    fn default() -> Self {
        Self::empty()
    }
}

impl Root {
    pub fn new(value: Value, substitutions: Vec<Substitution>) -> Self {
        Self { value, substitutions }
    }

    /// An empty object with no substitutions.
    pub fn empty() -> Self {
        Self {
            value: Value::Object(Object::new()),
            substitutions: Vec::new(),
        }
    }
}

impl Value {
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// True for placeholders that only exist between parsing and resolution.
    pub fn is_pending(&self) -> bool {
        matches!(self, Value::Substitution(_) | Value::Concat(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Object(_) => "object",
            Value::Array(_) => "array",
            Value::String(_) => "string",
            Value::Empty => "empty",
            Value::Substitution(_) => "substitution",
            Value::Concat(_) => "concatenation",
        }
    }

    pub fn as_object(&self) -> Result<&Object, HoconError> {
        match self {
            Value::Object(items) => Ok(items),
            other => Err(other.mismatch("object")),
        }
    }

    pub fn as_object_mut(&mut self) -> Result<&mut Object, HoconError> {
        match self {
            Value::Object(items) => Ok(items),
            other => Err(other.mismatch("object")),
        }
    }

    pub fn as_array(&self) -> Result<&[Value], HoconError> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(other.mismatch("array")),
        }
    }

    pub fn as_string(&self) -> Result<&str, HoconError> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(other.mismatch("string")),
        }
    }

    /// Walk nested objects by key segments. An empty path yields `self`.
    pub fn lookup(&self, path: &[String]) -> Option<&Value> {
        let mut current = self;
        for seg in path {
            match current {
                Value::Object(items) => current = items.get(seg)?,
                _ => return None,
            }
        }
        Some(current)
    }

    /// Whether any placeholder remains anywhere in this subtree.
    pub fn contains_pending(&self) -> bool {
        match self {
            Value::Substitution(_) | Value::Concat(_) => true,
            Value::Object(items) => items.values().any(Value::contains_pending),
            Value::Array(items) => items.iter().any(Value::contains_pending),
            Value::String(_) | Value::Empty => false,
        }
    }

    fn mismatch(&self, expected: &'static str) -> HoconError {
        HoconError::TypeMismatch {
            expected,
            found: self.kind(),
            code: Some(401),
        }
    }
}
