// Author: Dustin Pilgrim
// License: MIT

use std::collections::{HashMap, HashSet};
use std::env;

use log::debug;

use crate::ast::{Object, Root, Substitution, Value};
use crate::merge::merge;
use crate::HoconError;

/// Resolve every pending substitution of `root` against its own merged tree
/// and return the fully resolved value.
///
/// Substitutions are visited in list order. A path missing from the tree
/// falls back to the environment variable of the same (dotted) name; if
/// that is missing too, a required substitution is an error and an optional
/// one resolves to nothing (dropped from its concatenation, its field
/// removed).
pub fn resolve(root: Root) -> Result<Value, HoconError> {
    let Root { value, substitutions } = root;
    if substitutions.is_empty() && !value.contains_pending() {
        return Ok(value);
    }

    let mut live = HashSet::new();
    collect_placeholder_ids(&value, &mut live);

    let mut resolver = SubstitutionResolver::new(&value);
    for sub in substitutions.iter().filter(|s| live.contains(&s.id)) {
        resolver.resolve_substitution(sub)?;
    }

    match resolver.resolve_value(value.clone())? {
        Some(resolved) => Ok(resolved),
        None => Ok(Value::Object(Object::new())),
    }
}

/// Placeholders overwritten by a later merge are gone from the tree and
/// are not resolved.
fn collect_placeholder_ids(value: &Value, ids: &mut HashSet<usize>) {
    match value {
        Value::Substitution(sub) => {
            ids.insert(sub.id);
        }
        Value::Concat(pieces) | Value::Array(pieces) => {
            for piece in pieces {
                collect_placeholder_ids(piece, ids);
            }
        }
        Value::Object(items) => {
            for item in items.values() {
                collect_placeholder_ids(item, ids);
            }
        }
        Value::String(_) | Value::Empty => {}
    }
}

struct SubstitutionResolver<'s> {
    source: &'s Value,
    resolved: HashMap<usize, Option<Value>>,
    visiting: HashSet<usize>,
}

impl<'s> SubstitutionResolver<'s> {
    fn new(source: &'s Value) -> Self {
        Self {
            source,
            resolved: HashMap::new(),
            visiting: HashSet::new(),
        }
    }

    fn resolve_substitution(&mut self, sub: &Substitution) -> Result<Option<Value>, HoconError> {
        if let Some(done) = self.resolved.get(&sub.id) {
            return Ok(done.clone());
        }
        if !self.visiting.insert(sub.id) {
            return Err(HoconError::SubstitutionCycle {
                path: sub.dotted(),
                code: Some(404),
            });
        }

        let found = self.lookup(&sub.path)?;
        let result = match found {
            Some(value) => Some(value),
            None => match env::var(sub.dotted()) {
                Ok(from_env) => {
                    debug!("${{{}}} resolved from the environment", sub.dotted());
                    Some(Value::String(from_env))
                }
                Err(_) if sub.optional => None,
                Err(_) => {
                    return Err(HoconError::UnresolvedSubstitution {
                        path: sub.dotted(),
                        line: sub.line,
                        column: sub.column,
                        hint: Some("Define the path in the configuration or set an environment variable of that name; use ${?path} if it may be absent".into()),
                        code: Some(402),
                    });
                }
            },
        };

        debug!("${{{}}} resolved (defined: {})", sub.dotted(), result.is_some());
        self.visiting.remove(&sub.id);
        self.resolved.insert(sub.id, result.clone());
        Ok(result)
    }

    /// Find `path` in the source tree, resolving any placeholder met on the way.
    fn lookup(&mut self, path: &[String]) -> Result<Option<Value>, HoconError> {
        let mut node: &'s Value = self.source;
        for (i, seg) in path.iter().enumerate() {
            match node {
                Value::Object(items) => match items.get(seg) {
                    Some(next) => node = next,
                    None => return Ok(None),
                },
                pending if pending.is_pending() => {
                    let resolved = self.resolve_value(pending.clone())?;
                    return Ok(resolved.and_then(|r| r.lookup(&path[i..]).cloned()));
                }
                _ => return Ok(None),
            }
        }
        self.resolve_value(node.clone())
    }

    /// Replace every placeholder inside `value`. `None` means the value was
    /// an undefined optional substitution.
    fn resolve_value(&mut self, value: Value) -> Result<Option<Value>, HoconError> {
        match value {
            Value::Substitution(sub) => self.resolve_substitution(&sub),
            Value::Concat(pieces) => {
                let mut defined = Vec::with_capacity(pieces.len());
                let mut dropped = false;
                for piece in pieces {
                    match self.resolve_value(piece)? {
                        Some(v) => defined.push(v),
                        None => dropped = true,
                    }
                }
                // Only undefined optionals and the spaces between them
                if defined.is_empty() || (dropped && defined.iter().all(is_blank)) {
                    return Ok(None);
                }
                concatenate(defined).map(Some)
            }
            Value::Object(items) => {
                let mut out = Object::with_capacity(items.len());
                for (key, item) in items {
                    if let Some(v) = self.resolve_value(item)? {
                        out.insert(key, v);
                    }
                }
                Ok(Some(Value::Object(out)))
            }
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    if let Some(v) = self.resolve_value(item)? {
                        out.push(v);
                    }
                }
                Ok(Some(Value::Array(out)))
            }
            plain @ (Value::String(_) | Value::Empty) => Ok(Some(plain)),
        }
    }
}

fn is_blank(value: &Value) -> bool {
    matches!(value, Value::String(s) if s.trim().is_empty())
}

/// Join adjacent resolved values: strings append, arrays extend, objects
/// merge. Whitespace between arrays or objects is dropped.
pub(crate) fn concatenate(pieces: Vec<Value>) -> Result<Value, HoconError> {
    let structured = pieces.iter().any(|p| p.is_object() || p.is_array());
    let mut iter = pieces
        .into_iter()
        .filter(|p| !(structured && is_blank(p)));

    let mut acc = match iter.next() {
        Some(first) => first,
        None => return Ok(Value::String(String::new())),
    };

    for next in iter {
        acc = match (acc, next) {
            (Value::String(mut a), Value::String(b)) => {
                a.push_str(&b);
                Value::String(a)
            }
            (Value::Array(mut a), Value::Array(b)) => {
                a.extend(b);
                Value::Array(a)
            }
            (Value::Object(mut a), Value::Object(b)) => {
                merge(&mut a, b);
                Value::Object(a)
            }
            (a, b) => {
                return Err(HoconError::ConcatMismatch {
                    left: a.kind(),
                    right: b.kind(),
                    code: Some(403),
                });
            }
        };
    }

    Ok(acc)
}

// -- Tests --
