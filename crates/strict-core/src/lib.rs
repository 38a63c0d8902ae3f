//! # strict-core — Expectation Dispatch for strict
//!
//! This crate is the leaf of the strict workspace. It defines the data
//! model and the engine shared by every validating container; the
//! containers themselves live in `strict`.
//!
//! ## Key Design Principles
//!
//! 1. **Expectations are data.** An [`Expectations`] set is an ordered,
//!    name-unique map from expectation name to a JSON argument. It can be
//!    built fluently, merged, inspected, or loaded from JSON/YAML.
//!
//! 2. **Static dispatch tables.** Each container implements [`Expectable`]
//!    and publishes a `const` table of named predicates. The engine resolves
//!    names against that table at validation time. No reflection, no boxed
//!    closures.
//!
//! 3. **Predicates never raise.** Only [`validate`] and the typed-insertion
//!    mutators turn a `false` into a [`StrictError`]; the first failure wins.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `strict-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod engine;
pub mod error;
pub mod expectation;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use engine::{
    decode_argument, predicate_names, resolve, validate, ContainerKind, Expectable, LengthBounds,
    Predicate, PredicateEntry,
};
pub use error::{ErrorKind, StrictError, StrictResult};
pub use expectation::Expectations;
pub use value::{TypeSpec, ValueType};
