//! Core types for hierarchical command trees.
//!
//! This crate defines the data model behind an in-process command console:
//!
//! - [`ArgValue`] — the typed value a raw token converts into.
//! - [`ValueParser`] — the conversion capability, with built-ins
//!   ([`StringParser`], [`IntParser`], [`FloatParser`], [`BoolParser`],
//!   [`ChoiceParser`]).
//! - [`Validator`] / [`RangeValidator`] — accept/reject converted values,
//!   with fixed or sender-scaled (computed) exclusive bounds.
//! - [`Argument`] — one tagged descriptor over the positional, named
//!   optional, flag, and repeatable kinds.
//! - [`ArgumentManager`] — per-command name/alias lookup under a fixed
//!   [`CasePolicy`].
//! - [`Command`] / [`CommandRegistry`] — the immutable command tree and the
//!   explicit, owned registry resolutions run against.
//! - [`CommandResult`] — the bound, validated invocation handed to a
//!   [`CommandExecutor`].
//! - [`ResolveError`] / [`RegistrationError`] — the full error taxonomy.
//!
//! The resolution pipeline itself (tokenizer, tree walk, argument binding,
//! tab completion) lives in the `command-console-resolver` crate.
//!
//! # Example
//!
//! ```
//! use command_console_core::*;
//!
//! let mut registry = CommandRegistry::new();
//! registry
//!     .register(
//!         Command::new("bigdoors")
//!             .with_alias("bd")
//!             .with_subcommand(
//!                 Command::new("movedoor")
//!                     .with_argument(Argument::positional("door", StringParser))
//!                     .with_argument(
//!                         Argument::positional("blocks", IntParser)
//!                             .with_validator(RangeValidator::between(0.0, 100.0)),
//!                     )
//!                     .with_argument(Argument::flag("instant").with_alias("i"))
//!                     .with_executor(|_sender: &dyn CommandSender, invocation: &CommandResult<'_>| {
//!                         let _ = invocation.int("blocks");
//!                     }),
//!             ),
//!     )
//!     .unwrap();
//!
//! let root = registry.find("bd").unwrap();
//! assert_eq!(root.name(), "bigdoors");
//! assert!(root.find_child("movedoor", registry.case_policy()).is_some());
//! ```

pub mod argument;
pub mod command;
pub mod error;
pub mod manager;
pub mod parse;
pub mod result;
pub mod validate;
pub mod value;

pub use argument::{Argument, ArgumentKind, CompletionContext, SuggestionProvider};
pub use command::{Command, CommandExecutor, CommandRegistry, CommandSender, ConsoleSender};
pub use error::{RegistrationError, ResolveError};
pub use manager::{ArgumentManager, CasePolicy};
pub use parse::{
    BoolParser, ChoiceParser, FloatParser, IntParser, StringParser, ValueParseError, ValueParser,
};
pub use result::{CommandResult, ParsedArgument};
pub use validate::{Bound, BoundViolation, RangeValidator, ValidationContext, Validator};
pub use value::ArgValue;
