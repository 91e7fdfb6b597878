//! Safe traversal over the untrusted snapshot document.
//!
//! Every accessor tolerates absence and wrong types, returning `None`
//! instead of failing. The only hard requirement is the root shape.

use serde_json::{Map, Value};

/// The parsed document's root is not a JSON object, so none of the rules
/// are evaluable.
#[derive(Debug, thiserror::Error)]
#[error("snapshot root must be a JSON object, got {got}")]
pub struct ShapeError {
    pub got: &'static str,
}

/// A merged snapshot manifest, wrapped for defaulting field access.
#[derive(Debug, Clone)]
pub struct SnapshotDoc {
    root: Map<String, Value>,
}

impl SnapshotDoc {
    pub fn new(value: Value) -> Result<Self, ShapeError> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(ShapeError {
                got: json_type_name(&other),
            }),
        }
    }

    /// Optional-chaining lookup: `value_at(&["meta", "filters", "path_filter"])`.
    /// Returns `None` on any missing key or non-object intermediate.
    pub fn value_at(&self, keys: &[&str]) -> Option<&Value> {
        let (first, rest) = keys.split_first()?;
        let mut cur = self.root.get(*first)?;
        for key in rest {
            cur = cur.as_object()?.get(*key)?;
        }
        Some(cur)
    }

    pub fn str_at(&self, keys: &[&str]) -> Option<&str> {
        self.value_at(keys)?.as_str()
    }

    pub fn f64_at(&self, keys: &[&str]) -> Option<f64> {
        self.value_at(keys)?.as_f64()
    }

    pub fn i64_at(&self, keys: &[&str]) -> Option<i64> {
        self.value_at(keys)?.as_i64()
    }

    pub fn bool_at(&self, keys: &[&str]) -> Option<bool> {
        self.value_at(keys)?.as_bool()
    }

    /// Echo of the `meta` mapping, or an empty object when absent/mistyped.
    pub fn meta(&self) -> Value {
        match self.root.get("meta") {
            Some(Value::Object(m)) => Value::Object(m.clone()),
            _ => Value::Object(Map::new()),
        }
    }

    /// Declared scope string, empty when absent or not a string.
    pub fn scope(&self) -> &str {
        self.root
            .get("scope")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// File paths in document order, duplicates included. Non-conforming
    /// entries (non-object records, missing or non-string `path`) are
    /// ignored, not errors.
    pub fn file_paths(&self) -> Vec<&str> {
        let Some(Value::Array(files)) = self.root.get("files") else {
            return Vec::new();
        };
        files
            .iter()
            .filter_map(|f| f.as_object()?.get("path")?.as_str())
            .collect()
    }
}

/// Dynamic truthiness of a raw JSON value: null, false, 0, "" and empty
/// containers are falsy, everything else is truthy.
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

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
