//! # strict — Validating Containers
//!
//! Wrap a keyed mapping or a text value, declare named expectations, and
//! ask the container whether they all hold.
//!
//! ```
//! use serde_json::json;
//! use strict::{AsStrict, StrictError};
//!
//! let text = "my string"
//!     .as_strict()
//!     .expect("length", json!({"is": 9}))
//!     .expect("contains", "my");
//! assert_eq!(text.is_valid(), Ok(true));
//!
//! let err = "a".as_strict().expect("contains", "b").is_valid().unwrap_err();
//! assert!(matches!(err, StrictError::InvalidText { .. }));
//! ```
//!
//! ## Containers
//!
//! | Container | Predicates | Failure |
//! |-----------|------------|---------|
//! | [`StrictMapping`] | `length` (`is`, `min`, `max`), `has_keys` | `InvalidMapping` |
//! | [`StrictText`] | `length` (`is`, `min`, `max`, `not`), `contains` | `InvalidText` |
//!
//! Predicates can also be called directly for a plain `bool`. Typed
//! insertion on [`StrictMapping`] fails with `WrongTypeInMapping`.

pub mod convert;
pub mod mapping;
pub mod text;

pub use convert::AsStrict;
pub use mapping::{AppendOptions, StrictMapping};
pub use text::{StrictText, TextLength};

pub use strict_core::{
    ErrorKind, Expectations, LengthBounds, StrictError, StrictResult, TypeSpec, ValueType,
};
