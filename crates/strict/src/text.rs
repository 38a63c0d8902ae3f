//! # Text Container
//!
//! [`StrictText`] wraps a string and answers the `length` and `contains`
//! expectations. Length is measured in Unicode scalar values, not bytes.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use strict_core::{
    decode_argument, validate, ContainerKind, Expectable, Expectations, LengthBounds,
    PredicateEntry, StrictResult,
};

/// Length pattern for text: the shared bounds plus `not`.
///
/// Conditions are plain numbers, compared against the character count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextLength {
    /// Exact length.
    #[serde(default)]
    pub is: Option<f64>,
    /// Inclusive lower bound.
    #[serde(default)]
    pub min: Option<f64>,
    /// Inclusive upper bound.
    #[serde(default)]
    pub max: Option<f64>,
    /// Excluded length.
    #[serde(default)]
    pub not: Option<f64>,
}

impl TextLength {
    /// Length must differ from `n`.
    pub fn not(n: usize) -> Self {
        Self {
            not: Some(n as f64),
            ..Self::default()
        }
    }

    /// Add a `not` condition to this pattern.
    pub fn excluding(mut self, n: usize) -> Self {
        self.not = Some(n as f64);
        self
    }

    /// The `is`/`min`/`max` part of the pattern.
    pub fn bounds(&self) -> LengthBounds {
        LengthBounds {
            is: self.is,
            min: self.min,
            max: self.max,
        }
    }

    /// Whether `n` satisfies every present condition.
    pub fn admits(&self, n: usize) -> bool {
        self.bounds().admits(n) && self.not.map_or(true, |not| n as f64 != not)
    }
}

impl From<LengthBounds> for TextLength {
    fn from(bounds: LengthBounds) -> Self {
        Self {
            is: bounds.is,
            min: bounds.min,
            max: bounds.max,
            not: None,
        }
    }
}

/// A validating container over a text value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrictText {
    text: String,
    expectations: Expectations,
}

impl StrictText {
    /// Wrap `text` with no expectations declared.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            expectations: Expectations::new(),
        }
    }

    /// Wrap the textual representation of `value`.
    pub fn from_display(value: impl fmt::Display) -> Self {
        Self::new(value.to_string())
    }

    /// Merge `declarations` into the declared expectations.
    pub fn expects(mut self, declarations: Expectations) -> Self {
        self.expectations.merge(declarations);
        self
    }

    /// Declare a single expectation.
    pub fn expect(mut self, name: impl Into<String>, argument: impl Into<Value>) -> Self {
        self.expectations.insert(name, argument);
        self
    }

    /// The declared expectations, in check order.
    pub fn expectations(&self) -> &Expectations {
        &self.expectations
    }

    /// Check every declared expectation; a predicate returning `false`
    /// fails with [`StrictError::InvalidText`](strict_core::StrictError::InvalidText).
    pub fn is_valid(&self) -> StrictResult<bool> {
        validate(self)
    }

    /// Whether the character count satisfies `pattern`.
    pub fn length(&self, pattern: impl Into<TextLength>) -> bool {
        pattern.into().admits(self.text.chars().count())
    }

    /// Whether `needle` occurs in the text.
    pub fn contains(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }

    /// The wrapped text.
    pub fn to_text(&self) -> &str {
        &self.text
    }

    /// Unwrap into the text, dropping the expectations.
    pub fn into_text(self) -> String {
        self.text
    }

    fn declared_length(&self, argument: &Value) -> Result<bool, serde_json::Error> {
        let pattern: TextLength = decode_argument(argument)?;
        Ok(self.length(pattern))
    }

    fn declared_contains(&self, argument: &Value) -> Result<bool, serde_json::Error> {
        let needle: String = decode_argument(argument)?;
        Ok(self.contains(&needle))
    }
}

impl Expectable for StrictText {
    const CONTAINER: ContainerKind = ContainerKind::Text;
    const PREDICATES: &'static [PredicateEntry<Self>] = &[
        PredicateEntry {
            name: "length",
            predicate: Self::declared_length,
        },
        PredicateEntry {
            name: "contains",
            predicate: Self::declared_contains,
        },
    ];

    fn expectations(&self) -> &Expectations {
        &self.expectations
    }
}

impl fmt::Display for StrictText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<String> for StrictText {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for StrictText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use strict_core::StrictError;

    #[test]
    fn length_checks_each_condition() {
        let s = StrictText::new("my string");
        assert!(s.length(LengthBounds::exactly(9)));
        assert!(s.length(LengthBounds::at_least(3)));
        assert!(s.length(LengthBounds::at_most(10)));
        assert!(!s.length(LengthBounds::between(1, 5)));
        assert!(!s.length(LengthBounds::exactly(3)));
        assert!(!s.length(TextLength::not(9)));
        assert!(s.length(TextLength::from(LengthBounds::at_least(1)).excluding(3)));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let s = StrictText::new("héllo");
        assert!(s.length(LengthBounds::exactly(5)));
        assert!(s.length(TextLength::not(6)));
    }

    #[test]
    fn declared_length_accepts_not() {
        let s = StrictText::new("abc").expect("length", json!({"min": 1, "not": 3}));
        let err = s.is_valid().unwrap_err();
        assert_eq!(
            err,
            StrictError::InvalidText {
                expectation: "length".into(),
                argument: json!({"min": 1, "not": 3}),
            }
        );
    }

    #[test]
    fn declared_length_compares_any_number() {
        let check = |pattern: Value| StrictText::new("a").expect("length", pattern).is_valid();
        assert_eq!(check(json!({"not": -1})), Ok(true));
        assert_eq!(check(json!({"is": 1.0})), Ok(true));
        assert_eq!(check(json!({"min": -2})), Ok(true));

        let err = check(json!({"max": 0.5})).unwrap_err();
        assert!(matches!(err, StrictError::InvalidText { .. }));
    }

    #[test]
    fn contains_is_plain_substring_search() {
        let s = StrictText::new("my string");
        assert!(s.contains("my"));
        assert!(s.contains("y s"));
        assert!(s.contains(""));
        assert!(!s.contains("nope"));
        assert!(!s.contains("m.*g"));
    }

    #[test]
    fn declared_contains_needs_a_string() {
        let err = StrictText::new("3")
            .expect("contains", 3)
            .is_valid()
            .unwrap_err();
        assert!(matches!(err, StrictError::MalformedArgument { .. }));
    }

    #[test]
    fn mapping_predicates_do_not_resolve_on_text() {
        let err = StrictText::new("a")
            .expect("has_keys", json!([]))
            .is_valid()
            .unwrap_err();
        assert!(matches!(
            err,
            StrictError::UnknownExpectation {
                container: "text",
                ..
            }
        ));
    }

    #[test]
    fn text_views() {
        let s = StrictText::from_display(42);
        assert_eq!(s.to_text(), "42");
        assert_eq!(s.to_string(), "42");
        assert_eq!(s.into_text(), "42".to_string());
    }

    proptest! {
        /// A text pattern holds exactly when each present condition holds.
        #[test]
        fn text_length_is_a_conjunction(
            text in "\\PC{0,12}",
            is in proptest::option::of(-2i64..14),
            min in proptest::option::of(-2i64..14),
            max in proptest::option::of(-2i64..14),
            not in proptest::option::of(-2i64..14),
        ) {
            let s = StrictText::new(text.as_str());
            let n = text.chars().count() as i64;
            let pattern = TextLength {
                is: is.map(|v| v as f64),
                min: min.map(|v| v as f64),
                max: max.map(|v| v as f64),
                not: not.map(|v| v as f64),
            };
            let expected = is.map_or(true, |v| n == v)
                && min.map_or(true, |v| n >= v)
                && max.map_or(true, |v| n <= v)
                && not.map_or(true, |v| n != v);
            prop_assert_eq!(s.length(pattern), expected);
        }

        /// `contains` agrees with finding the needle at some char boundary.
        #[test]
        fn contains_matches_a_window_search(text in "[ab]{0,8}", needle in "[ab]{0,3}") {
            let s = StrictText::new(text.as_str());
            let expected = needle.is_empty()
                || text.as_bytes().windows(needle.len()).any(|w| w == needle.as_bytes());
            prop_assert_eq!(s.contains(&needle), expected);
        }
    }
}
