//! Resolution pipeline for `command-console` trees.
//!
//! This crate turns raw console input into executable invocations against a
//! [`CommandRegistry`]: quote-aware tokenization, a walk down the command
//! tree, permission gating, and argument binding with type conversion and
//! validation. It also drives tab completion over the same tree.
//!
//! # Examples
//!
//! ```
//! use command_console_core::{
//!     Argument, Command, CommandRegistry, ConsoleSender, IntParser, RangeValidator,
//!     StringParser,
//! };
//! use command_console_resolver::resolve_line;
//!
//! let mut registry = CommandRegistry::new();
//! registry
//!     .register(
//!         Command::new("bigdoors").with_subcommand(
//!             Command::new("movedoor")
//!                 .with_argument(Argument::positional("door", StringParser))
//!                 .with_argument(
//!                     Argument::positional("blocks", IntParser)
//!                         .with_validator(RangeValidator::between(0.0, 100.0)),
//!                 ),
//!         ),
//!     )
//!     .unwrap();
//!
//! let invocation = resolve_line(&registry, &ConsoleSender, "bigdoors movedoor gate 12").unwrap();
//! assert_eq!(invocation.str("door"), Some("gate"));
//! assert_eq!(invocation.int("blocks"), Some(12));
//! ```

pub mod tokenizer;
pub mod trace;

mod complete;
mod resolve;

use command_console_core::command::{CommandRegistry, CommandSender};
use command_console_core::error;
use command_console_core::result::CommandResult;

pub use complete::{complete_line, complete_tokens};
pub use trace::{ResolutionRun, ResolutionTrace, TraceStep};

/// Resolves one raw command line into a bound invocation.
///
/// Tokenizes the line, walks the command tree, checks permissions, and binds
/// arguments. See the crate docs for an end-to-end example.
pub fn resolve_line<'r>(
    registry: &'r CommandRegistry,
    sender: &dyn CommandSender,
    line: &str,
) -> error::Result<CommandResult<'r>> {
    let tokens = tokenizer::tokenize_line(line)?;
    resolve::resolve_inner(registry, sender, &tokens, None)
}

/// Resolves a pre-split token sequence, merging quoted segments first.
///
/// For hosts whose input arrives already split on whitespace.
pub fn resolve_tokens<'r>(
    registry: &'r CommandRegistry,
    sender: &dyn CommandSender,
    tokens: &[&str],
) -> error::Result<CommandResult<'r>> {
    let merged = tokenizer::merge_quoted(tokens.iter().copied())?;
    resolve::resolve_inner(registry, sender, &merged, None)
}

/// Resolves one raw line, capturing a step-by-step [`ResolutionTrace`] when
/// the registry's debug toggle is on.
///
/// With debug off this is exactly [`resolve_line`] and the returned trace is
/// `None`.
pub fn resolve_line_with_trace<'r>(
    registry: &'r CommandRegistry,
    sender: &dyn CommandSender,
    line: &str,
) -> ResolutionRun<'r> {
    if !registry.debug_enabled() {
        return ResolutionRun {
            result: resolve_line(registry, sender, line),
            trace: None,
        };
    }

    let mut trace = ResolutionTrace::default();
    let result = match tokenizer::tokenize_line(line) {
        Ok(tokens) => resolve::resolve_inner(registry, sender, &tokens, Some(&mut trace)),
        Err(err) => Err(err),
    };
    if let Err(err) = &result {
        trace.record(TraceStep::Failed {
            error: err.to_string(),
        });
    }
    ResolutionRun {
        result,
        trace: Some(trace),
    }
}

/// Resolves one raw line and runs the matched command's executor.
///
/// Returns `Ok(true)` when an executor ran, `Ok(false)` when the resolved
/// command has none (e.g. a bare group node).
pub fn dispatch_line(
    registry: &CommandRegistry,
    sender: &dyn CommandSender,
    line: &str,
) -> error::Result<bool> {
    let invocation = resolve_line(registry, sender, line)?;
    Ok(invocation.run(sender))
}
