//! # Validation Engine
//!
//! Walks a container's declared [`Expectations`], resolves each name to a
//! predicate exposed by that container, and invokes it with the declared
//! argument. The first predicate that returns `false` stops the walk and
//! is reported through the container's bound error kind.
//!
//! ## Dispatch
//!
//! Containers publish a static table of [`PredicateEntry`] values mapping
//! expectation names to plain function pointers. Resolution is a lookup in
//! that table; nothing is registered at runtime and no closures are stored
//! alongside the declarations.
//!
//! ## Error Contract
//!
//! Predicates return booleans and never raise. A table entry adapts a
//! declared [`Value`] argument into the predicate's typed parameter with
//! [`decode_argument`]; a decoding failure surfaces as
//! [`StrictError::MalformedArgument`], and a name with no table entry as
//! [`StrictError::UnknownExpectation`]. Neither is ever treated as success.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{StrictError, StrictResult};
use crate::expectation::Expectations;

/// A declared-argument adapter around a container predicate.
///
/// Returns `Ok(holds)` once the argument has been decoded, or the decoding
/// error if the argument has the wrong shape.
pub type Predicate<C> = fn(&C, &Value) -> Result<bool, serde_json::Error>;

/// One row of a container's predicate table.
pub struct PredicateEntry<C: 'static> {
    /// Expectation name the predicate answers to.
    pub name: &'static str,
    /// The predicate adapter.
    pub predicate: Predicate<C>,
}

/// The container families, each bound to the error kind its failed
/// expectations are reported with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// Keyed mapping; failures raise [`StrictError::InvalidMapping`].
    Mapping,
    /// Text; failures raise [`StrictError::InvalidText`].
    Text,
}

impl ContainerKind {
    /// Identifier used in logs and usage errors.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mapping => "mapping",
            Self::Text => "text",
        }
    }

    /// Build the failure for `expectation` declared with `argument`.
    pub fn rejection(&self, expectation: &str, argument: &Value) -> StrictError {
        match self {
            Self::Mapping => StrictError::InvalidMapping {
                expectation: expectation.to_string(),
                argument: argument.clone(),
            },
            Self::Text => StrictError::InvalidText {
                expectation: expectation.to_string(),
                argument: argument.clone(),
            },
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability a container provides to the engine.
pub trait Expectable: Sized + 'static {
    /// Container family, which fixes the error kind for failures.
    const CONTAINER: ContainerKind;

    /// Predicates resolvable by expectation name.
    const PREDICATES: &'static [PredicateEntry<Self>];

    /// The declarations to check.
    fn expectations(&self) -> &Expectations;
}

/// Resolve `name` against `C`'s predicate table.
pub fn resolve<C: Expectable>(name: &str) -> Option<Predicate<C>> {
    C::PREDICATES
        .iter()
        .find(|entry| entry.name == name)
        .map(|entry| entry.predicate)
}

/// Names of every predicate `C` exposes, in table order.
pub fn predicate_names<C: Expectable>() -> Vec<&'static str> {
    C::PREDICATES.iter().map(|entry| entry.name).collect()
}

/// Decode a declared argument into a predicate's parameter type.
pub fn decode_argument<T: DeserializeOwned>(argument: &Value) -> Result<T, serde_json::Error> {
    T::deserialize(argument)
}

/// Check every declaration of `container` in order.
///
/// Returns `Ok(true)` when all predicates hold. Otherwise returns the
/// error for the first declaration that failed, resolved to nothing, or
/// carried an undecodable argument; later declarations are not evaluated.
pub fn validate<C: Expectable>(container: &C) -> StrictResult<bool> {
    let expectations = container.expectations();
    tracing::debug!(
        container = %C::CONTAINER,
        declared = expectations.len(),
        "validating expectations"
    );

    for (name, argument) in expectations.iter() {
        let Some(predicate) = resolve::<C>(name) else {
            tracing::warn!(container = %C::CONTAINER, expectation = name, "unknown expectation");
            return Err(StrictError::UnknownExpectation {
                container: C::CONTAINER.as_str(),
                expectation: name.to_string(),
            });
        };

        let holds = predicate(container, argument).map_err(|e| {
            tracing::warn!(
                container = %C::CONTAINER,
                expectation = name,
                %argument,
                error = %e,
                "malformed expectation argument"
            );
            StrictError::MalformedArgument {
                expectation: name.to_string(),
                argument: argument.clone(),
                reason: e.to_string(),
            }
        })?;

        if !holds {
            tracing::debug!(
                container = %C::CONTAINER,
                expectation = name,
                %argument,
                "expectation failed"
            );
            return Err(C::CONTAINER.rejection(name, argument));
        }
    }

    Ok(true)
}

/// `is`/`min`/`max` length bounds shared by every container.
///
/// Each present bound is checked independently; absent bounds are
/// skipped, so the empty pattern always holds. Bounds are plain numbers:
/// a negative or fractional bound is compared like any other, and only a
/// non-numeric bound fails to decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LengthBounds {
    /// Exact length.
    #[serde(default)]
    pub is: Option<f64>,
    /// Inclusive lower bound.
    #[serde(default)]
    pub min: Option<f64>,
    /// Inclusive upper bound.
    #[serde(default)]
    pub max: Option<f64>,
}

impl LengthBounds {
    /// Length must equal `n`.
    pub fn exactly(n: usize) -> Self {
        Self {
            is: Some(n as f64),
            ..Self::default()
        }
    }

    /// Length must be at least `min`.
    pub fn at_least(min: usize) -> Self {
        Self {
            min: Some(min as f64),
            ..Self::default()
        }
    }

    /// Length must be at most `max`.
    pub fn at_most(max: usize) -> Self {
        Self {
            max: Some(max as f64),
            ..Self::default()
        }
    }

    /// Length must lie in `min..=max`.
    pub fn between(min: usize, max: usize) -> Self {
        Self {
            is: None,
            min: Some(min as f64),
            max: Some(max as f64),
        }
    }

    /// Whether `n` satisfies every present bound.
    pub fn admits(&self, n: usize) -> bool {
        let n = n as f64;
        if self.is.is_some_and(|is| n != is) {
            return false;
        }
        if self.min.is_some_and(|min| n < min) {
            return false;
        }
        if self.max.is_some_and(|max| n > max) {
            return false;
        }
        true
    }
}
