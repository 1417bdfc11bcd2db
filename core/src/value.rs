//! Typed values produced by argument conversion.
//!
//! Every raw token bound to an argument is converted into an [`ArgValue`]
//! by the argument's [`ValueParser`](crate::parse::ValueParser). The enum is
//! deliberately small: consoles deal in booleans, numbers, and text, and a
//! tagged variant keeps [`CommandResult`](crate::result::CommandResult)
//! bindings serializable for diagnostics.

use serde::{Deserialize, Serialize};

/// A typed argument value.
///
/// # Examples
///
/// ```
/// use command_console_core::ArgValue;
///
/// let v = ArgValue::Int(7);
/// assert_eq!(v.as_int(), Some(7));
/// assert_eq!(v.as_float(), Some(7.0));
/// assert_eq!(v.as_str(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    /// Boolean, produced by flags and [`BoolParser`](crate::parse::BoolParser).
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Plain text.
    Str(String),
}

impl ArgValue {
    /// Returns the boolean payload, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the numeric payload as `f64`.
    ///
    /// Integers widen losslessly for the usual console value ranges, so
    /// numeric validators accept both `Int` and `Float` values.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the text payload, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Human-readable name of the variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
        }
    }
}

impl std::fmt::Display for ArgValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for ArgValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for ArgValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_match_variants() {
        assert_eq!(ArgValue::Bool(true).as_bool(), Some(true));
        assert_eq!(ArgValue::Int(3).as_int(), Some(3));
        assert_eq!(ArgValue::Float(2.5).as_float(), Some(2.5));
        assert_eq!(ArgValue::Str("x".into()).as_str(), Some("x"));
        assert_eq!(ArgValue::Str("x".into()).as_int(), None);
    }

    #[test]
    fn test_int_widens_to_float() {
        assert_eq!(ArgValue::Int(42).as_float(), Some(42.0));
    }

    #[test]
    fn test_serialize_untagged() {
        let json = serde_json::to_string(&ArgValue::Int(5)).unwrap();
        assert_eq!(json, "5");
        let json = serde_json::to_string(&ArgValue::Str("door".into())).unwrap();
        assert_eq!(json, "\"door\"");
    }

    #[test]
    fn test_display_is_plain() {
        assert_eq!(ArgValue::Float(1.5).to_string(), "1.5");
        assert_eq!(ArgValue::Bool(false).to_string(), "false");
    }
}
