// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Flattening of nested data into placeholder bindings.

use serde_json::{Map, Value};
use std::collections::HashMap;

/// Build the placeholder key for a dotted path.
pub fn placeholder_key(path: &str) -> String {
    format!("{{:{}}}", path)
}

/// Resolve a dotted path (`address.zip`) through nested objects.
///
/// A path that exists verbatim as a key wins over the nested lookup, so
/// data keys containing dots are still reachable.
pub fn resolve_path<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    let object = data.as_object()?;
    if let Some(value) = object.get(path) {
        return Some(value);
    }

    let mut current = data;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Placeholder bindings for a single validation call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: HashMap<String, Value>,
}

impl Bindings {
    /// Create empty bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten `data` into bindings.
    ///
    /// Only objects are descended into; arrays are leaves and bind as a
    /// whole. Non-object input yields empty bindings.
    pub fn from_data(data: &Value) -> Self {
        let mut bindings = Self::new();
        if let Value::Object(map) = data {
            bindings.flatten(map, None);
        }
        tracing::debug!("Bound {} validation variables", bindings.len());
        bindings
    }

    fn flatten(&mut self, map: &Map<String, Value>, prefix: Option<&str>) {
        for (key, value) in map {
            let path = match prefix {
                Some(prefix) => format!("{}.{}", prefix, key),
                None => key.clone(),
            };

            match value {
                Value::Object(nested) => self.flatten(nested, Some(&path)),
                leaf => {
                    self.values.insert(placeholder_key(&path), leaf.clone());
                }
            }
        }
    }

    /// Insert a binding for `path` directly.
    pub fn insert(&mut self, path: &str, value: impl Into<Value>) {
        self.values.insert(placeholder_key(path), value.into());
    }

    /// Look up a bound value by placeholder key (`{:path}`).
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Render the bound value for a placeholder key as substitution text.
    pub fn render(&self, key: &str) -> Option<String> {
        self.get(key).map(render_value)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no values are bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(key, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }
}

/// Text a bound value contributes to an expanded rule.
pub(crate) fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_objects() {
        let data = json!({
            "name": "john",
            "address": { "zip": "8000", "geo": { "lat": 56.1 } },
            "age": 30,
        });
        let bindings = Bindings::from_data(&data);

        assert_eq!(bindings.len(), 4);
        assert_eq!(bindings.render("{:name}"), Some("john".to_string()));
        assert_eq!(bindings.render("{:address.zip}"), Some("8000".to_string()));
        assert_eq!(bindings.render("{:address.geo.lat}"), Some("56.1".to_string()));
        assert_eq!(bindings.render("{:age}"), Some("30".to_string()));
        assert!(bindings.get("{:address}").is_none());
    }

    #[test]
    fn test_arrays_are_leaves() {
        let data = json!({ "tags": ["a", "b"], "matrix": [{ "x": 1 }] });
        let bindings = Bindings::from_data(&data);

        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings.render("{:tags}"), Some(r#"["a","b"]"#.to_string()));
        assert!(bindings.get("{:tags.0}").is_none());
        assert!(bindings.get("{:matrix.0.x}").is_none());
    }

    #[test]
    fn test_scalar_rendering() {
        let data = json!({ "on": true, "off": false, "gone": null });
        let bindings = Bindings::from_data(&data);

        assert_eq!(bindings.render("{:on}"), Some("true".to_string()));
        assert_eq!(bindings.render("{:off}"), Some("false".to_string()));
        assert_eq!(bindings.render("{:gone}"), Some("null".to_string()));
    }

    #[test]
    fn test_empty_and_non_object_input() {
        assert!(Bindings::from_data(&json!({})).is_empty());
        assert!(Bindings::from_data(&json!([1, 2, 3])).is_empty());
        assert!(Bindings::from_data(&json!("text")).is_empty());
    }

    #[test]
    fn test_insert() {
        let mut bindings = Bindings::new();
        bindings.insert("limit", 10);
        assert_eq!(bindings.render("{:limit}"), Some("10".to_string()));
    }

    #[test]
    fn test_resolve_path() {
        let data = json!({
            "address": { "zip": "8000" },
            "dotted.key": 1,
        });

        assert_eq!(resolve_path(&data, "address.zip"), Some(&json!("8000")));
        assert_eq!(resolve_path(&data, "dotted.key"), Some(&json!(1)));
        assert_eq!(resolve_path(&data, "address.city"), None);
        assert_eq!(resolve_path(&data, "missing"), None);
        assert_eq!(resolve_path(&json!(null), "anything"), None);
    }
}
