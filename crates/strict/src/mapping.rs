//! # Keyed-Mapping Container
//!
//! [`StrictMapping`] wraps a JSON object and answers the `length` and
//! `has_keys` expectations. It also owns the insertion path for new
//! entries, optionally gated on the runtime type of every inserted value.
//!
//! ## Atomic Typed Insertion
//!
//! [`StrictMapping::append_typed`] and [`StrictMapping::append_typed_one_of`]
//! check every value before merging any of them. A rejected call leaves the
//! mapping exactly as it was.
//!
//! ## Length Options
//!
//! Mapping `length` takes `is`, `min` and `max` only. A declared argument
//! carrying `not` is a malformed argument here, unlike on
//! [`StrictText`](crate::StrictText).

use serde_json::{Map, Value};

use strict_core::{
    decode_argument, validate, ContainerKind, Expectable, Expectations, LengthBounds,
    PredicateEntry, StrictError, StrictResult, TypeSpec, ValueType,
};

/// How [`StrictMapping::append_with`] screens incoming values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AppendOptions {
    /// Merge without checking.
    #[default]
    Untyped,
    /// Every value must be of exactly this type.
    Type(ValueType),
    /// Every value must be of one of these types.
    Types(Vec<ValueType>),
}

/// A validating container over a keyed mapping.
///
/// ```
/// use serde_json::json;
/// use strict::{AsStrict, Expectations};
///
/// let entries = json!({"hello": "world"}).as_object().cloned().unwrap_or_default();
/// let mapping = entries
///     .as_strict()
///     .expects(Expectations::new().with("length", json!({"is": 1})));
/// assert_eq!(mapping.is_valid(), Ok(true));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrictMapping {
    entries: Map<String, Value>,
    expectations: Expectations,
}

impl StrictMapping {
    /// Wrap `entries` with no expectations declared.
    pub fn new(entries: Map<String, Value>) -> Self {
        Self {
            entries,
            expectations: Expectations::new(),
        }
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

    /// Check every declared expectation.
    ///
    /// Returns `Ok(true)` or the error for the first failing declaration,
    /// which is [`StrictError::InvalidMapping`] for a predicate that
    /// returned `false`.
    pub fn is_valid(&self) -> StrictResult<bool> {
        validate(self)
    }

    /// Whether every key in `keys` is present.
    pub fn has_keys<I, K>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        keys.into_iter().all(|key| self.entries.contains_key(key.as_ref()))
    }

    /// Whether the number of entries satisfies `pattern`.
    pub fn length(&self, pattern: &LengthBounds) -> bool {
        pattern.admits(self.entries.len())
    }

    /// The wrapped entries.
    pub fn to_mapping(&self) -> &Map<String, Value> {
        &self.entries
    }

    /// Unwrap into the entries, dropping the expectations.
    pub fn into_mapping(self) -> Map<String, Value> {
        self.entries
    }

    /// Merge `entries` without checking; incoming values win on collision.
    pub fn append(&mut self, entries: Map<String, Value>) {
        self.entries.extend(entries);
    }

    /// Merge `entries` if every value is exactly of `value_type`.
    ///
    /// Fails with [`StrictError::WrongTypeInMapping`] and merges nothing
    /// otherwise.
    pub fn append_typed(
        &mut self,
        entries: Map<String, Value>,
        value_type: ValueType,
    ) -> StrictResult<()> {
        self.append_checked(entries, TypeSpec::Exactly(value_type))
    }

    /// Merge `entries` if every value's type is one of `types`.
    ///
    /// Fails with [`StrictError::WrongTypeInMapping`] and merges nothing
    /// otherwise.
    pub fn append_typed_one_of(
        &mut self,
        entries: Map<String, Value>,
        types: &[ValueType],
    ) -> StrictResult<()> {
        self.append_checked(entries, TypeSpec::OneOf(types.to_vec()))
    }

    /// Merge `entries` with the screening selected by `options`.
    pub fn append_with(
        &mut self,
        entries: Map<String, Value>,
        options: AppendOptions,
    ) -> StrictResult<()> {
        match options {
            AppendOptions::Untyped => {
                self.append(entries);
                Ok(())
            }
            AppendOptions::Type(value_type) => self.append_typed(entries, value_type),
            AppendOptions::Types(types) => self.append_checked(entries, TypeSpec::OneOf(types)),
        }
    }

    fn append_checked(
        &mut self,
        entries: Map<String, Value>,
        expected: TypeSpec,
    ) -> StrictResult<()> {
        let rejected = entries
            .iter()
            .find(|(_, value)| !expected.admits(value))
            .map(|(key, value)| (key.clone(), ValueType::of(value)));

        if let Some((key, actual)) = rejected {
            tracing::debug!(key = %key, %actual, %expected, "rejected typed append");
            return Err(StrictError::WrongTypeInMapping {
                entries,
                key,
                expected,
            });
        }

        self.append(entries);
        Ok(())
    }

    fn declared_length(&self, argument: &Value) -> Result<bool, serde_json::Error> {
        let pattern: LengthBounds = decode_argument(argument)?;
        Ok(self.length(&pattern))
    }

    fn declared_has_keys(&self, argument: &Value) -> Result<bool, serde_json::Error> {
        let keys: Vec<String> = decode_argument(argument)?;
        Ok(self.has_keys(&keys))
    }
}

impl Expectable for StrictMapping {
    const CONTAINER: ContainerKind = ContainerKind::Mapping;
    const PREDICATES: &'static [PredicateEntry<Self>] = &[
        PredicateEntry {
            name: "length",
            predicate: Self::declared_length,
        },
        PredicateEntry {
            name: "has_keys",
            predicate: Self::declared_has_keys,
        },
    ];

    fn expectations(&self) -> &Expectations {
        &self.expectations
    }
}

impl From<Map<String, Value>> for StrictMapping {
    fn from(entries: Map<String, Value>) -> Self {
        Self::new(entries)
    }
}
