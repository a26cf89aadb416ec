//! Locale File Repairs
//!
//! Structural fixes for translation resources: nesting flat dotted keys,
//! and finding or filling keys a language is missing against a base one.

use serde_json::{Map, Value};

use crate::catalog::resolve;

/// Insert `value` at `path`, creating objects along the way. Objects merge
/// with existing objects; anything else overwrites.
fn insert_path(target: &mut Map<String, Value>, path: &[&str], value: Value) {
    let Some((head, rest)) = path.split_first() else {
        return;
    };
    if rest.is_empty() {
        let merge = matches!((target.get(*head), &value), (Some(Value::Object(_)), Value::Object(_)));
        if merge {
            if let (Some(Value::Object(existing)), Value::Object(incoming)) = (target.get_mut(*head), value) {
                for (key, child) in incoming {
                    insert_path(existing, &[key.as_str()], child);
                }
            }
        } else {
            if target.contains_key(*head) {
                log::warn!("Overwriting existing key '{}'", head);
            }
            target.insert(head.to_string(), value);
        }
        return;
    }

    let slot = target
        .entry(head.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        log::warn!("Replacing leaf '{}' with an object to nest '{}'", head, rest.join("."));
        *slot = Value::Object(Map::new());
    }
    if let Value::Object(child) = slot {
        insert_path(child, rest, value);
    }
}

/// Turn `{"a.b": 1}` into `{"a": {"b": 1}}` at every level
pub fn nest_flat_keys(value: Value) -> Value {
    let Value::Object(map) = value else {
        return value;
    };
    let mut nested = Map::new();
    for (key, child) in map {
        let child = nest_flat_keys(child);
        let path: Vec<&str> = key.split('.').collect();
        insert_path(&mut nested, &path, child);
    }
    Value::Object(nested)
}

/// Dot paths of every non-object value, sorted
pub fn leaf_paths(value: &Value) -> Vec<String> {
    fn walk(value: &Value, prefix: &str, out: &mut Vec<String>) {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", prefix, key)
                    };
                    walk(child, &path, out);
                }
            }
            _ if !prefix.is_empty() => out.push(prefix.to_string()),
            _ => {}
        }
    }

    let mut out = Vec::new();
    walk(value, "", &mut out);
    out.sort();
    out
}

/// Leaf paths of `base` that `target` cannot resolve, sorted
pub fn missing_keys(base: &Value, target: &Value) -> Vec<String> {
    leaf_paths(base)
        .into_iter()
        .filter(|path| resolve(target, path).is_none())
        .collect()
}

/// Leaf paths of `target` that `base` does not have, sorted
pub fn extra_keys(base: &Value, target: &Value) -> Vec<String> {
    missing_keys(target, base)
}

/// Copy every leaf `target` is missing from `base`. Returns the paths
/// that were filled.
pub fn fill_missing(base: &Value, target: &mut Value) -> Vec<String> {
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    let missing = missing_keys(base, target);
    let Value::Object(map) = target else {
        return Vec::new();
    };
    for path in &missing {
        if let Some(value) = resolve(base, path) {
            let segments: Vec<&str> = path.split('.').collect();
            insert_path(map, &segments, value.clone());
        }
    }
    missing
}
