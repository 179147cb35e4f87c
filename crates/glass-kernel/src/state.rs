//! Belief and measurement mappings.
//!
//! Both are JSON objects. They are never mutated in place by the kernel:
//! every update produces a new mapping via [`merge`] and replaces the old
//! one, so the result of a propagation step depends only on the values
//! involved and the order the steps were taken in.

use serde_json::{Map, Value};

/// A string-keyed JSON mapping (a node's belief or measurement).
pub type Mapping = Map<String, Value>;

/// Right-biased shallow union: keys of `incoming` overwrite the same keys
/// of `base`; every other key of `base` is kept.
///
/// Nested objects are replaced wholesale, not merged recursively.
pub fn merge(base: &Mapping, incoming: &Mapping) -> Mapping {
    let mut merged = base.clone();
    for (key, value) in incoming {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Convert a JSON value into a mapping, if it is an object.
pub fn as_mapping(value: Value) -> Option<Mapping> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Short name of a JSON value's kind, for diagnostics.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
