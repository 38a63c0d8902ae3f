//! # Runtime Value Types
//!
//! Classifies JSON values into the runtime types that typed insertion
//! checks against. Integers and floats are distinct types: a value of
//! `3` is an [`ValueType::Integer`] and never satisfies a
//! [`ValueType::Float`] requirement, and vice versa.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::error::StrictError;

/// Runtime type of a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// JSON `null`.
    Null,
    /// `true` or `false`.
    Boolean,
    /// A number representable as `i64` or `u64`.
    Integer,
    /// Any other number.
    Float,
    /// A string.
    String,
    /// An ordered sequence of values.
    Array,
    /// A keyed mapping of values.
    Object,
}

impl ValueType {
    /// Returns the runtime type of `value`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Float,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Returns the snake_case identifier for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = StrictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "null" => Ok(Self::Null),
            "boolean" => Ok(Self::Boolean),
            "integer" => Ok(Self::Integer),
            "float" => Ok(Self::Float),
            "string" => Ok(Self::String),
            "array" => Ok(Self::Array),
            "object" => Ok(Self::Object),
            other => Err(StrictError::UnknownValueType {
                name: other.to_string(),
            }),
        }
    }
}

/// The type requirement a typed insertion was checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpec {
    /// The value type must equal this type exactly.
    Exactly(ValueType),
    /// The value type must be one of these types.
    OneOf(Vec<ValueType>),
}

impl TypeSpec {
    /// Whether `value` satisfies this requirement.
    pub fn admits(&self, value: &Value) -> bool {
        let actual = ValueType::of(value);
        match self {
            Self::Exactly(expected) => actual == *expected,
            Self::OneOf(allowed) => allowed.contains(&actual),
        }
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(t) => write!(f, "{t}"),
            Self::OneOf(types) => {
                f.write_str("one of [")?;
                for (i, t) in types.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{t}")?;
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ALL: [ValueType; 7] = [
        ValueType::Null,
        ValueType::Boolean,
        ValueType::Integer,
        ValueType::Float,
        ValueType::String,
        ValueType::Array,
        ValueType::Object,
    ];

    #[test]
    fn classifies_every_json_shape() {
        assert_eq!(ValueType::of(&json!(null)), ValueType::Null);
        assert_eq!(ValueType::of(&json!(false)), ValueType::Boolean);
        assert_eq!(ValueType::of(&json!(-3)), ValueType::Integer);
        assert_eq!(ValueType::of(&json!(u64::MAX)), ValueType::Integer);
        assert_eq!(ValueType::of(&json!(1.5)), ValueType::Float);
        assert_eq!(ValueType::of(&json!("value")), ValueType::String);
        assert_eq!(ValueType::of(&json!([1, 2])), ValueType::Array);
        assert_eq!(ValueType::of(&json!({"a": 1})), ValueType::Object);
    }

    #[test]
    fn integer_and_float_are_distinct() {
        let spec = TypeSpec::Exactly(ValueType::Float);
        assert!(!spec.admits(&json!(3)));
        assert!(spec.admits(&json!(3.0)));
    }

    #[test]
    fn one_of_checks_membership() {
        let spec = TypeSpec::OneOf(vec![ValueType::String, ValueType::Boolean]);
        assert!(spec.admits(&json!("x")));
        assert!(spec.admits(&json!(true)));
        assert!(!spec.admits(&json!(3)));
        assert!(!TypeSpec::OneOf(vec![]).admits(&json!(null)));
    }

    #[test]
    fn as_str_parses_back() {
        for t in ALL {
            assert_eq!(t.as_str().parse::<ValueType>().unwrap(), t);
            assert_eq!(t.to_string(), t.as_str());
        }
    }

    #[test]
    fn from_str_rejects_unknown_names() {
        assert!("symbol".parse::<ValueType>().is_err());
        assert!("String".parse::<ValueType>().is_err());
        assert!("".parse::<ValueType>().is_err());
    }

    #[test]
    fn serde_format_matches_as_str() {
        for t in ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
    }

    #[test]
    fn type_spec_display() {
        assert_eq!(TypeSpec::Exactly(ValueType::String).to_string(), "string");
        assert_eq!(
            TypeSpec::OneOf(vec![ValueType::String, ValueType::Integer]).to_string(),
            "one of [string, integer]"
        );
    }
}
