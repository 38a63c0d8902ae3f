//! # Error Types — Structured Error Taxonomy
//!
//! Defines the errors raised by containers and the validation engine.
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Validation failures carry the failing expectation name and the
//!   declared argument, exactly as declared.
//! - Typed insertion failures carry the rejected entries, the first
//!   offending key, and the type requirement.
//! - Usage errors (unknown expectation names, undecodable arguments) are
//!   separate variants so callers can tell a failed constraint apart from
//!   a broken declaration.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::value::TypeSpec;

/// Result alias used throughout strict.
pub type StrictResult<T> = Result<T, StrictError>;

/// Top-level error type for strict.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrictError {
    /// A mapping expectation evaluated to `false`.
    #[error("invalid mapping: expectation '{expectation}' failed for argument {argument}")]
    InvalidMapping {
        /// Name of the failing expectation.
        expectation: String,
        /// Argument the expectation was declared with.
        argument: Value,
    },

    /// A text expectation evaluated to `false`.
    #[error("invalid text: expectation '{expectation}' failed for argument {argument}")]
    InvalidText {
        /// Name of the failing expectation.
        expectation: String,
        /// Argument the expectation was declared with.
        argument: Value,
    },

    /// A typed insertion found a value of the wrong runtime type.
    #[error("wrong type in mapping: value at key '{key}' is not {expected}")]
    WrongTypeInMapping {
        /// The entries passed to the rejected insertion, none of which were merged.
        entries: Map<String, Value>,
        /// First key whose value failed the check.
        key: String,
        /// The type requirement the entries were checked against.
        expected: TypeSpec,
    },

    /// A declared expectation name has no predicate on the container.
    #[error("{container} has no expectation named '{expectation}'")]
    UnknownExpectation {
        /// Container the declaration was dispatched against.
        container: &'static str,
        /// The unresolved expectation name.
        expectation: String,
    },

    /// A declared argument does not have the shape the predicate takes.
    #[error("malformed argument for expectation '{expectation}' ({argument}): {reason}")]
    MalformedArgument {
        /// Name of the expectation.
        expectation: String,
        /// The argument as declared.
        argument: Value,
        /// Decoder message.
        reason: String,
    },

    /// A declaration document is not a name-to-argument object.
    #[error("malformed expectation declarations: {reason}")]
    MalformedDeclarations {
        /// Reason the document was rejected.
        reason: String,
    },

    /// A value type name did not parse.
    #[error("unknown value type: {name:?}")]
    UnknownValueType {
        /// The unrecognized name.
        name: String,
    },
}

/// Classification of a [`StrictError`] without its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`StrictError::InvalidMapping`].
    InvalidMapping,
    /// See [`StrictError::InvalidText`].
    InvalidText,
    /// See [`StrictError::WrongTypeInMapping`].
    WrongTypeInMapping,
    /// See [`StrictError::UnknownExpectation`].
    UnknownExpectation,
    /// See [`StrictError::MalformedArgument`].
    MalformedArgument,
    /// See [`StrictError::MalformedDeclarations`].
    MalformedDeclarations,
    /// See [`StrictError::UnknownValueType`].
    UnknownValueType,
}

impl StrictError {
    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidMapping { .. } => ErrorKind::InvalidMapping,
            Self::InvalidText { .. } => ErrorKind::InvalidText,
            Self::WrongTypeInMapping { .. } => ErrorKind::WrongTypeInMapping,
            Self::UnknownExpectation { .. } => ErrorKind::UnknownExpectation,
            Self::MalformedArgument { .. } => ErrorKind::MalformedArgument,
            Self::MalformedDeclarations { .. } => ErrorKind::MalformedDeclarations,
            Self::UnknownValueType { .. } => ErrorKind::UnknownValueType,
        }
    }

    /// Name of the expectation involved, for validation and usage errors.
    pub fn expectation(&self) -> Option<&str> {
        match self {
            Self::InvalidMapping { expectation, .. }
            | Self::InvalidText { expectation, .. }
            | Self::UnknownExpectation { expectation, .. }
            | Self::MalformedArgument { expectation, .. } => Some(expectation),
            _ => None,
        }
    }

    /// Declared argument of the failing expectation.
    pub fn argument(&self) -> Option<&Value> {
        match self {
            Self::InvalidMapping { argument, .. }
            | Self::InvalidText { argument, .. }
            | Self::MalformedArgument { argument, .. } => Some(argument),
            _ => None,
        }
    }

    /// Whether this error reports a failed constraint rather than a
    /// broken declaration.
    pub fn is_validation_failure(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidMapping | ErrorKind::InvalidText | ErrorKind::WrongTypeInMapping
        )
    }
}
