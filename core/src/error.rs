//! Error taxonomy for registration and resolution.
//!
//! Every resolution failure is a recoverable, typed [`ResolveError`] carrying
//! enough context for a caller-formatted, localizable message. Nothing here
//! is fatal to the process.

use thiserror::Error;

/// Failures raised while building or registering command trees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Command name is empty or whitespace-only.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// Argument name is empty or whitespace-only.
    #[error("argument name cannot be empty")]
    EmptyArgumentName,
    /// Two sibling commands share a name or alias under the registry's
    /// case policy.
    #[error("duplicate command in scope: {0}")]
    DuplicateCommand(String),
    /// Two arguments of one command share a name or alias under the
    /// manager's case policy.
    #[error("duplicate argument name or alias: {0}")]
    DuplicateArgument(String),
    /// A default value was set on an argument kind that cannot carry one.
    #[error("default value not allowed on argument: {0}")]
    InvalidDefault(String),
}

/// Failures raised while resolving an invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No root command (or child, at deeper levels where a command token is
    /// required) matches the token.
    #[error("unknown command: {token}")]
    CommandNotFound {
        /// The offending token.
        token: String,
    },
    /// A prefixed token names no registered argument or alias.
    #[error("unknown argument: {name}")]
    UnknownArgument {
        /// The name with its `-`/`--` prefix stripped.
        name: String,
    },
    /// A required positional or repeatable argument was left unfilled after
    /// all tokens were consumed, or a named argument was supplied with no
    /// value token.
    #[error("missing required argument: {argument}")]
    MissingArgument {
        /// The unfilled argument.
        argument: String,
    },
    /// The argument's value parser could not convert the raw token.
    #[error("illegal value for argument {argument}: {raw}")]
    IllegalValue {
        /// The argument being bound.
        argument: String,
        /// The raw token that failed conversion.
        raw: String,
    },
    /// A validator rejected a converted value.
    #[error("value {raw} for argument {argument} is out of bounds: {bound}")]
    ValidationFailed {
        /// The argument being bound.
        argument: String,
        /// The raw token whose converted value was rejected.
        raw: String,
        /// The bound computed at check time.
        bound: String,
    },
    /// The sender lacks permission for the resolved command or one of its
    /// ancestors.
    #[error("{sender} is not allowed to use command: {command}")]
    NoPermission {
        /// The denied sender.
        sender: String,
        /// The resolved command path.
        command: String,
    },
    /// The tokenizer reached end of input inside an open double quote.
    #[error("unterminated quote at end of input")]
    UnterminatedQuote,
}

/// Convenience alias for resolution results.
pub type Result<T> = std::result::Result<T, ResolveError>;
