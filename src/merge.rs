//! Deep merge of HOCON objects.
//!
//! Object-vs-object always merges key by key; any other combination is an
//! overwrite by the incoming value. Keys keep the position of their first
//! insertion.

use crate::ast::{Object, Value};

/// Merge `incoming` into `base`, with `incoming` taking precedence.
///
/// - key only in `incoming` → inserted
/// - both sides objects → merged recursively
/// - anything else → `incoming` replaces the base value
///
/// # Example
/// ```
/// use hocon_json::ast::{Object, Value};
/// use hocon_json::merge::merge;
///
/// let mut base = Object::new();
/// base.insert("a".into(), Value::String("1".into()));
/// let mut incoming = Object::new();
/// incoming.insert("a".into(), Value::String("2".into()));
/// incoming.insert("b".into(), Value::Empty);
///
/// merge(&mut base, incoming);
/// assert_eq!(base["a"], Value::String("2".into()));
/// assert!(base["b"].is_empty());
/// ```
pub fn merge(base: &mut Object, incoming: Object) {
    for (key, incoming_value) in incoming {
        match base.get_mut(&key) {
            Some(slot) => merge_value(slot, incoming_value),
            None => {
                base.insert(key, incoming_value);
            }
        }
    }
}

fn merge_value(slot: &mut Value, incoming: Value) {
    match (slot, incoming) {
        (Value::Object(base_obj), Value::Object(incoming_obj)) => merge(base_obj, incoming_obj),
        (slot, value) => *slot = value,
    }
}

/// Set `value` at `key`, merging with an existing object when both are objects.
///
/// Used for duplicate keys inside one document.
pub fn merge_field(target: &mut Object, key: String, value: Value) {
    let mut single = Object::new();
    single.insert(key, value);
    merge(target, single);
}

/// Fold a sequence of objects left to right; later objects win.
pub fn merge_all(objects: impl IntoIterator<Item = Object>) -> Object {
    objects.into_iter().fold(Object::new(), |mut acc, next| {
        merge(&mut acc, next);
        acc
    })
}
