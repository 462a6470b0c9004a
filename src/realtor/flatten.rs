//! JSON flattening and path lookup shared by every realtor operation.
//!
//! `flatten` turns `{"location": {"address": {"city": "Austin"}}}` into
//! `{"location.address.city": "Austin"}`. Arrays and scalars are leaves; an empty
//! object is kept as a `{}` leaf, which makes flattening idempotent.

use serde_json::{Map, Value};

use super::error::{RealtorError, Result};

/// One flattened listing/detail row.
pub type ListingRecord = Map<String, Value>;

pub const KEY_SEPARATOR: char = '.';

/// Flatten one JSON object into a single-level record.
pub fn flatten(object: &Map<String, Value>) -> ListingRecord {
    let mut out = Map::new();
    flatten_into(&mut out, "", object);
    out
}

fn flatten_into(out: &mut ListingRecord, prefix: &str, object: &Map<String, Value>) {
    for (key, value) in object {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}{KEY_SEPARATOR}{key}")
        };
        match value {
            Value::Object(inner) if !inner.is_empty() => flatten_into(out, &path, inner),
            leaf => {
                out.insert(path, leaf.clone());
            }
        }
    }
}

/// Flatten an array of objects into one record per element. A bare object
/// yields a single record. `path` only labels errors.
pub fn flatten_records(value: &Value, path: &str) -> Result<Vec<ListingRecord>> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(map) => Ok(flatten(map)),
                _ => Err(RealtorError::shape(format!("{path}[{i}]"))),
            })
            .collect(),
        Value::Object(map) => Ok(vec![flatten(map)]),
        Value::Null => Ok(Vec::new()),
        _ => Err(RealtorError::shape(path)),
    }
}

/// Walk `segments` through nested objects, failing with the dotted path on the
/// first missing key.
pub fn lookup<'a>(root: &'a Value, segments: &[&str]) -> Result<&'a Value> {
    let mut current = root;
    for (depth, segment) in segments.iter().enumerate() {
        current = current
            .get(segment)
            .ok_or_else(|| RealtorError::shape(segments[..=depth].join(".")))?;
    }
    Ok(current)
}

/// Like [`lookup`] but the target must be an object.
pub fn lookup_object<'a>(root: &'a Value, segments: &[&str]) -> Result<&'a Map<String, Value>> {
    lookup(root, segments)?
        .as_object()
        .ok_or_else(|| RealtorError::shape(segments.join(".")))
}

/// Python-style truthiness: null, false, zero, "", [] and {} are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
