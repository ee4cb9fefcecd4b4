//! Cache keys.

use serde::{Deserialize, Serialize};

/// The key an entry is stored under.
///
/// Schema definitions are addressed either by subject name or by the
/// integer id a registry assigned them. The two spaces never collide:
/// `Key::Name("1")` and `Key::Id(1)` are different entries.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// Integer identifier.
    Id(i64),
    /// String name.
    Name(String),
}

impl Key {
    /// Get the name, if this is a string key.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Id(_) => None,
        }
    }

    /// Get the id, if this is an integer key.
    pub fn as_id(&self) -> Option<i64> {
        match self {
            Key::Id(id) => Some(*id),
            Key::Name(_) => None,
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Name(name) => write!(f, "{:?}", name),
            Key::Id(id) => write!(f, "{}", id),
        }
    }
}

impl From<&str> for Key {
    fn from(v: &str) -> Self {
        Key::Name(v.to_string())
    }
}

impl From<String> for Key {
    fn from(v: String) -> Self {
        Key::Name(v)
    }
}

impl From<&String> for Key {
    fn from(v: &String) -> Self {
        Key::Name(v.clone())
    }
}

impl From<i64> for Key {
    fn from(v: i64) -> Self {
        Key::Id(v)
    }
}

impl From<i32> for Key {
    fn from(v: i32) -> Self {
        Key::Id(v as i64)
    }
}

impl From<u32> for Key {
    fn from(v: u32) -> Self {
        Key::Id(v as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn name_and_id_are_distinct() {
        let mut keys = HashSet::new();
        keys.insert(Key::from("1"));
        keys.insert(Key::from(1i64));
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn conversions() {
        assert_eq!(Key::from("schema-1"), Key::Name("schema-1".to_string()));
        assert_eq!(Key::from(String::from("a")), Key::Name("a".to_string()));
        assert_eq!(Key::from(7i32), Key::Id(7));
        assert_eq!(Key::from(7u32), Key::Id(7));
    }

    #[test]
    fn accessors() {
        assert_eq!(Key::from("x").as_name(), Some("x"));
        assert_eq!(Key::from("x").as_id(), None);
        assert_eq!(Key::from(42i64).as_id(), Some(42));
        assert_eq!(Key::from(42i64).as_name(), None);
    }

    #[test]
    fn display_quotes_names() {
        assert_eq!(Key::from("orders").to_string(), "\"orders\"");
        assert_eq!(Key::from(12i64).to_string(), "12");
    }

    #[test]
    fn deserializes_untagged() {
        let key: Key = serde_json::from_str("\"orders-value\"").unwrap();
        assert_eq!(key, Key::from("orders-value"));

        let key: Key = serde_json::from_str("17").unwrap();
        assert_eq!(key, Key::Id(17));
    }
}
