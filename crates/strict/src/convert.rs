//! Conversions from native values into validating containers.

use serde_json::{Map, Value};

use crate::mapping::StrictMapping;
use crate::text::StrictText;

/// Wrap a native value in its validating container.
///
/// The container owns a copy of the value; later changes to either side
/// are not shared.
pub trait AsStrict {
    /// The container this value wraps into.
    type Strict;

    /// Copy `self` into a fresh container with no expectations.
    fn as_strict(&self) -> Self::Strict;
}

impl AsStrict for Map<String, Value> {
    type Strict = StrictMapping;

    fn as_strict(&self) -> StrictMapping {
        StrictMapping::new(self.clone())
    }
}

impl AsStrict for str {
    type Strict = StrictText;

    fn as_strict(&self) -> StrictText {
        StrictText::new(self)
    }
}

impl AsStrict for String {
    type Strict = StrictText;

    fn as_strict(&self) -> StrictText {
        StrictText::new(self.as_str())
    }
}
