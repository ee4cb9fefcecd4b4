//! The Value type - a tree-shaped data structure.
//!
//! Cached schema definitions are arbitrary nested documents. Backends store
//! them as `Value` and never look inside.

use std::collections::BTreeMap;

/// A tree-shaped value held by a cache entry.
///
/// This maps directly to JSON, Avro's JSON schema form, MessagePack, etc.,
/// but is encoding-agnostic.
///
/// # Design Notes
///
/// - Uses `BTreeMap` for deterministic ordering (important for comparison)
/// - Includes `Bytes` for binary payloads
/// - Uses `i64` for integers
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absence of a value inside a document. Distinct from "key not cached".
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed 64-bit integer.
    Integer(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Binary data.
    Bytes(Vec<u8>),
    /// Ordered sequence of values.
    Array(Vec<Value>),
    /// Key-value map with string keys.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Create a null value.
    pub fn null() -> Self {
        Value::Null
    }

    /// Create an empty map.
    pub fn map() -> Self {
        Value::Map(BTreeMap::new())
    }

    /// Create an empty array.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value is a map.
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Check if this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a field of a map value.
    ///
    /// Returns `None` for missing fields and for non-map values.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.as_map()?.get(name)
    }

    /// Insert a field into a map value, returning `self` for chaining.
    ///
    /// A non-map value is replaced by a single-field map.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        match &mut self {
            Value::Map(map) => {
                map.insert(name.into(), value.into());
                self
            }
            _ => {
                let mut map = BTreeMap::new();
                map.insert(name.into(), value.into());
                Value::Map(map)
            }
        }
    }
}

// Conversion from common types

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Value::Map(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_field_builds_nested_documents() {
        let schema = Value::map()
            .with_field("type", "record")
            .with_field("name", "User")
            .with_field(
                "fields",
                Value::Array(vec![Value::map()
                    .with_field("name", "id")
                    .with_field("type", "long")]),
            );

        assert_eq!(schema.field("type"), Some(&Value::from("record")));
        let fields = schema.field("fields").unwrap();
        assert!(fields.is_array());
        assert_eq!(fields.field("name"), None);
    }

    #[test]
    fn with_field_on_scalar_replaces_it() {
        let value = Value::from(3i64).with_field("k", true);
        assert!(value.is_map());
        assert_eq!(value.field("k"), Some(&Value::Bool(true)));
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::from(5i32).as_i64(), Some(5));
        assert_eq!(Value::from(5i32).as_str(), None);
        assert!(Value::null().is_null());
        assert!(Value::array().is_array());
        assert!(Value::default().is_null());
    }

    #[test]
    fn vec_conversion() {
        let value = Value::from(vec!["a", "b"]);
        assert_eq!(
            value,
            Value::Array(vec![Value::from("a"), Value::from("b")])
        );
    }
}
