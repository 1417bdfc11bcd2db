//! Value parsers: the conversion capability from raw token to [`ArgValue`].
//!
//! A [`ValueParser`] turns one raw token into a typed value or fails with a
//! [`ValueParseError`]. Parsers are dynamic-dispatch capabilities held by
//! each [`Argument`](crate::argument::Argument); any
//! `Fn(&str) -> Result<ArgValue, ValueParseError>` closure also qualifies.

use thiserror::Error;

use crate::value::ArgValue;

/// Conversion failure for one raw token.
///
/// Carries only what the token failed to convert into; the resolver wraps it
/// with the argument name and raw value when surfacing
/// [`ResolveError::IllegalValue`](crate::error::ResolveError::IllegalValue).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}")]
pub struct ValueParseError {
    /// Description of the expected value shape (e.g. "an integer").
    pub expected: String,
}

impl ValueParseError {
    /// Creates an error naming the expected value shape.
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }
}

/// Converts a raw token into a typed value.
///
/// # Examples
///
/// ```
/// use command_console_core::{IntParser, ValueParser, ArgValue};
///
/// assert_eq!(IntParser.parse("42").unwrap(), ArgValue::Int(42));
/// assert!(IntParser.parse("forty-two").is_err());
/// ```
pub trait ValueParser: Send + Sync {
    /// Converts `raw` or fails with a description of what was expected.
    fn parse(&self, raw: &str) -> Result<ArgValue, ValueParseError>;

    /// Fixed completion candidates for this parser's value domain.
    ///
    /// Empty by default; [`ChoiceParser`] overrides this so tab completion
    /// can offer its choices without a separate suggestion provider.
    fn suggestions(&self) -> Vec<String> {
        Vec::new()
    }
}

impl<F> ValueParser for F
where
    F: Fn(&str) -> Result<ArgValue, ValueParseError> + Send + Sync,
{
    fn parse(&self, raw: &str) -> Result<ArgValue, ValueParseError> {
        self(raw)
    }
}

/// Accepts any token verbatim as [`ArgValue::Str`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StringParser;

impl ValueParser for StringParser {
    fn parse(&self, raw: &str) -> Result<ArgValue, ValueParseError> {
        Ok(ArgValue::Str(raw.to_string()))
    }
}

/// Parses a signed integer.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntParser;

impl ValueParser for IntParser {
    fn parse(&self, raw: &str) -> Result<ArgValue, ValueParseError> {
        raw.parse::<i64>()
            .map(ArgValue::Int)
            .map_err(|_| ValueParseError::new("an integer"))
    }
}

/// Parses a floating-point number.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatParser;

impl ValueParser for FloatParser {
    fn parse(&self, raw: &str) -> Result<ArgValue, ValueParseError> {
        raw.parse::<f64>()
            .map(ArgValue::Float)
            .map_err(|_| ValueParseError::new("a number"))
    }
}

/// Parses `true`/`false`, case-insensitively.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolParser;

impl ValueParser for BoolParser {
    fn parse(&self, raw: &str) -> Result<ArgValue, ValueParseError> {
        match raw.to_ascii_lowercase().as_str() {
            "true" => Ok(ArgValue::Bool(true)),
            "false" => Ok(ArgValue::Bool(false)),
            _ => Err(ValueParseError::new("true or false")),
        }
    }
}

/// Accepts exactly one of a fixed set of choices.
///
/// The accepted choice is returned verbatim as [`ArgValue::Str`]. The choice
/// list doubles as the parser's completion candidates.
///
/// # Examples
///
/// ```
/// use command_console_core::{ChoiceParser, ValueParser};
///
/// let parser = ChoiceParser::new(["north", "east", "south", "west"]);
/// assert!(parser.parse("east").is_ok());
/// assert!(parser.parse("up").is_err());
/// assert_eq!(parser.suggestions().len(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChoiceParser {
    choices: Vec<String>,
}

impl ChoiceParser {
    /// Creates a parser accepting the given choices, in the given order.
    pub fn new<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    /// The accepted choices, in declaration order.
    pub fn choices(&self) -> &[String] {
        &self.choices
    }
}

impl ValueParser for ChoiceParser {
    fn parse(&self, raw: &str) -> Result<ArgValue, ValueParseError> {
        if self.choices.iter().any(|c| c == raw) {
            Ok(ArgValue::Str(raw.to_string()))
        } else {
            Err(ValueParseError::new(format!(
                "one of: {}",
                self.choices.join(", ")
            )))
        }
    }

    fn suggestions(&self) -> Vec<String> {
        self.choices.clone()
    }
}
