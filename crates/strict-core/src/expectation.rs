//! # Expectation Declarations
//!
//! An [`Expectations`] set maps expectation names to declared arguments.
//! Declarations are plain data so they can be introspected, merged and
//! re-declared; resolving a name to a predicate happens later, in the
//! engine.
//!
//! ## Ordering Invariant
//!
//! Declarations are kept in insertion order and each name appears at most
//! once. Re-declaring a name replaces its argument in place, so the
//! position of the first declaration decides where it is checked. The
//! validation engine walks the set in this order, which makes first-failure
//! reporting deterministic.
//!
//! Deserialization preserves document order for JSON and YAML sources.
//! Building from a [`serde_json::Value`] follows the key order of the
//! value's object, which is sorted unless `serde_json` is built with
//! `preserve_order`.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{StrictError, StrictResult};

/// An ordered, name-unique set of expectation declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expectations {
    entries: Vec<(String, Value)>,
}

impl Expectations {
    /// Create an empty declaration set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `name` with `argument`.
    ///
    /// Returns the previous argument if `name` was already declared; the
    /// declaration keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, argument: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let argument = argument.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, argument)),
            None => {
                self.entries.push((name, argument));
                None
            }
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, argument: impl Into<Value>) -> Self {
        self.insert(name, argument);
        self
    }

    /// Merge `other` into this set. On name collision the argument from
    /// `other` wins.
    pub fn merge(&mut self, other: Expectations) {
        for (name, argument) in other.entries {
            self.insert(name, argument);
        }
    }

    /// Argument declared for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, argument)| argument)
    }

    /// Whether `name` is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove the declaration for `name`, returning its argument.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no expectations are declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate declarations in check order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a))
    }

    /// Declared names in check order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Parse declarations from a JSON object document.
    pub fn from_json_str(document: &str) -> StrictResult<Self> {
        serde_json::from_str(document).map_err(|e| StrictError::MalformedDeclarations {
            reason: e.to_string(),
        })
    }

    /// Parse declarations from a YAML mapping document.
    pub fn from_yaml_str(document: &str) -> StrictResult<Self> {
        serde_yaml::from_str(document).map_err(|e| StrictError::MalformedDeclarations {
            reason: e.to_string(),
        })
    }
}

impl TryFrom<Value> for Expectations {
    type Error = StrictError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(StrictError::MalformedDeclarations {
                reason: format!("expected an object of expectations, got {other}"),
            }),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Expectations {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, argument) in iter {
            set.insert(name, argument);
        }
        set
    }
}

impl<'a> IntoIterator for &'a Expectations {
    type Item = (&'a str, &'a Value);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a Value)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl Serialize for Expectations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, argument) in &self.entries {
            map.serialize_entry(name, argument)?;
        }
        map.end()
    }
}

struct ExpectationsVisitor;

impl<'de> Visitor<'de> for ExpectationsVisitor {
    type Value = Expectations;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of expectation names to arguments")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut set = Expectations::new();
        while let Some((name, argument)) = access.next_entry::<String, Value>()? {
            set.insert(name, argument);
        }
        Ok(set)
    }
}

impl<'de> Deserialize<'de> for Expectations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ExpectationsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn redeclaring_overwrites_in_place() {
        let mut set = Expectations::new()
            .with("length", json!({"is": 1}))
            .with("has_keys", json!(["hello"]));
        let previous = set.insert("length", json!({"is": 2}));

        assert_eq!(previous, Some(json!({"is": 1})));
        assert_eq!(set.len(), 2);
        assert_eq!(set.names(), vec!["length", "has_keys"]);
        assert_eq!(set.get("length"), Some(&json!({"is": 2})));
    }

    #[test]
    fn merge_lets_later_arguments_win() {
        let mut a = Expectations::new()
            .with("length", json!({"is": 1}))
            .with("contains", "my");
        let b = Expectations::new()
            .with("contains", "string")
            .with("has_keys", json!([]));
        a.merge(b);

        assert_eq!(a.names(), vec!["length", "contains", "has_keys"]);
        assert_eq!(a.get("contains"), Some(&json!("string")));
    }

    #[test]
    fn remove_drops_the_declaration() {
        let mut set = Expectations::new().with("a", 1).with("b", 2);
        assert_eq!(set.remove("a"), Some(json!(1)));
        assert_eq!(set.remove("a"), None);
        assert!(!set.contains("a"));
        assert_eq!(set.names(), vec!["b"]);
    }

    #[test]
    fn json_document_keeps_document_order() {
        let doc = r#"{"length": {"is": 9}, "contains": "my"}"#;
        let set = Expectations::from_json_str(doc).unwrap();
        assert_eq!(set.names(), vec!["length", "contains"]);
        assert_eq!(set.get("length"), Some(&json!({"is": 9})));
    }

    #[test]
    fn yaml_document_keeps_document_order() {
        let doc = "length:\n  min: 1\n  max: 5\nhas_keys:\n  - hello\n  - my\n";
        let set = Expectations::from_yaml_str(doc).unwrap();
        assert_eq!(set.names(), vec!["length", "has_keys"]);
        assert_eq!(set.get("has_keys"), Some(&json!(["hello", "my"])));
    }

    #[test]
    fn non_object_documents_are_rejected() {
        let err = Expectations::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, StrictError::MalformedDeclarations { .. }));
        let err = Expectations::try_from(json!("length")).unwrap_err();
        assert!(matches!(err, StrictError::MalformedDeclarations { .. }));
    }

    #[test]
    fn serializes_as_ordered_object() {
        let set = Expectations::new().with("length", json!({"is": 1})).with("contains", "a");
        assert_eq!(
            serde_json::to_string(&set).unwrap(),
            r#"{"length":{"is":1},"contains":"a"}"#
        );
    }

    fn declarations() -> impl Strategy<Value = Vec<(String, i64)>> {
        prop::collection::vec(("[a-d]", any::<i64>()), 0..8)
    }

    proptest! {
        /// Merging is equivalent to inserting every declaration of the
        /// second set into the first, in order.
        #[test]
        fn merge_matches_sequential_insert(a in declarations(), b in declarations()) {
            let mut merged: Expectations = a.iter().map(|(n, v)| (n.clone(), json!(v))).collect();
            merged.merge(b.iter().map(|(n, v)| (n.clone(), json!(v))).collect());

            let mut expected = Expectations::new();
            for (n, v) in a.iter().chain(b.iter()) {
                expected.insert(n.clone(), json!(v));
            }
            prop_assert_eq!(&merged, &expected);

            let all: Vec<&(String, i64)> = a.iter().chain(b.iter()).collect();
            let unique: std::collections::HashSet<&str> = merged.names().into_iter().collect();
            prop_assert_eq!(unique.len(), merged.len());
            for (name, argument) in merged.iter() {
                let last = all.iter().rev().find(|(n, _)| n == name).map(|(_, v)| json!(v));
                prop_assert_eq!(Some(argument.clone()), last);
            }
        }
    }
}
