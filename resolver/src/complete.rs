//! Tab completion: the resolution walk without terminal invariants.
//!
//! Completion re-runs the command-tree walk over a possibly incomplete token
//! sequence, stops at the first incomplete token, and emits candidate
//! strings instead of failing. It never raises an error: malformed or
//! partial input degrades to an empty suggestion list, and an open quote is
//! treated as a value still being typed.
//!
//! Candidates come back in declaration order — commands and arguments in
//! registration order, names before aliases — so suggestion lists are
//! deterministic.

use command_console_core::argument::{Argument, ArgumentKind, CompletionContext};
use command_console_core::command::{Command, CommandRegistry, CommandSender};
use command_console_core::manager::CasePolicy;

use crate::resolve::{split_inline, strip_arg_prefix};
use crate::tokenizer::tokenize_lenient;

/// Completes the final token of `line`.
///
/// # Examples
///
/// ```
/// use command_console_core::{Command, CommandRegistry, ConsoleSender};
/// use command_console_resolver::complete_line;
///
/// let mut registry = CommandRegistry::new();
/// registry.register(Command::new("bigdoors")).unwrap();
///
/// assert_eq!(
///     complete_line(&registry, &ConsoleSender, "big"),
///     vec!["bigdoors".to_string()],
/// );
/// ```
pub fn complete_line(
    registry: &CommandRegistry,
    sender: &dyn CommandSender,
    line: &str,
) -> Vec<String> {
    let lenient = tokenize_lenient(line);
    if lenient.open_quote {
        // Still typing a quoted value; nothing sensible to offer yet.
        return Vec::new();
    }
    let (complete, partial) = if lenient.trailing_space {
        (lenient.tokens.as_slice(), String::new())
    } else {
        match lenient.tokens.split_last() {
            Some((last, rest)) => (rest, last.clone()),
            None => (&[][..], String::new()),
        }
    };
    complete_tokens(registry, sender, complete, &partial)
}

/// Completes `partial` given the fully-typed tokens before it.
pub fn complete_tokens(
    registry: &CommandRegistry,
    sender: &dyn CommandSender,
    complete: &[String],
    partial: &str,
) -> Vec<String> {
    let case = registry.case_policy();

    // Root level: the partial is a root command name.
    let Some((first, rest)) = complete.split_first() else {
        return command_candidates(registry.commands(), partial, case);
    };
    let Some(mut command) = registry.find(first) else {
        return Vec::new();
    };

    // Walk as deep as the typed tokens allow.
    let mut idx = 0;
    while idx < rest.len() {
        match command.find_child(&rest[idx], case) {
            Some(child) => {
                command = child;
                idx += 1;
            }
            None => break,
        }
    }
    let arg_tokens = &rest[idx..];
    let scan = scan_arg_tokens(command, arg_tokens);

    // Mid-argument-value: the previous token was a named argument awaiting
    // its value.
    if let Some(argument) = scan.expecting {
        return value_candidates(argument, command, sender, partial, case);
    }

    // Mid-argument-name: the partial carries an argument prefix.
    if partial.starts_with('-') {
        let prefix = if partial.starts_with("--") { "--" } else { "-" };
        let stripped = &partial[prefix.len()..];
        let (name, inline) = split_inline(stripped);
        if let Some(value_partial) = inline {
            // -name=<partial value>: complete the value, keeping the typed
            // name intact.
            let Some(argument) = command.arguments().lookup(&name) else {
                return Vec::new();
            };
            return value_candidates(argument, command, sender, &value_partial, case)
                .into_iter()
                .map(|s| format!("{prefix}{name}={s}"))
                .collect();
        }
        return argument_name_candidates(command, stripped, prefix, case);
    }

    // No argument tokens yet: the partial may still be a deeper subcommand.
    if arg_tokens.is_empty() {
        let children = command_candidates(command.children(), partial, case);
        if !children.is_empty() {
            return children;
        }
    }

    // Otherwise the partial is a value for the next unfilled positional.
    match next_positional(command, &scan) {
        Some(argument) => value_candidates(argument, command, sender, partial, case),
        None => Vec::new(),
    }
}

struct ArgScan<'a> {
    expecting: Option<&'a Argument>,
    filled: Vec<String>,
}

/// Replays the fully-typed argument tokens just far enough to know what the
/// partial token is: a value for a pending named argument, a positional
/// value, or a fresh token. Unknown names and conversion errors are ignored
/// here; completion never fails.
fn scan_arg_tokens<'a>(command: &'a Command, tokens: &[String]) -> ArgScan<'a> {
    let manager = command.arguments();
    let mut scan = ArgScan {
        expecting: None,
        filled: Vec::new(),
    };

    for token in tokens {
        if let Some(argument) = scan.expecting.take() {
            // This token was the pending argument's value.
            if !matches!(argument.kind(), ArgumentKind::Repeatable { .. }) {
                scan.filled.push(argument.name().to_string());
            }
            continue;
        }
        if let Some(stripped) = strip_arg_prefix(token) {
            let (name, inline) = split_inline(stripped);
            let Some(argument) = manager.lookup(&name) else {
                continue;
            };
            match argument.kind() {
                ArgumentKind::Flag => scan.filled.push(argument.name().to_string()),
                ArgumentKind::Repeatable { .. } => {
                    if inline.is_none() {
                        scan.expecting = Some(argument);
                    }
                }
                _ => {
                    if inline.is_none() {
                        scan.expecting = Some(argument);
                    } else {
                        scan.filled.push(argument.name().to_string());
                    }
                }
            }
        } else if let Some(argument) = next_positional_inner(command, &scan.filled) {
            scan.filled.push(argument.name().to_string());
        }
    }
    scan
}

fn next_positional<'a>(command: &'a Command, scan: &ArgScan<'_>) -> Option<&'a Argument> {
    next_positional_inner(command, &scan.filled)
}

fn next_positional_inner<'a>(command: &'a Command, filled: &[String]) -> Option<&'a Argument> {
    let manager = command.arguments();
    manager
        .positional_indices()
        .iter()
        .map(|&i| &manager.arguments()[i])
        .find(|a| !filled.iter().any(|f| f == a.name()))
}

fn has_prefix(candidate: &str, partial: &str, case: CasePolicy) -> bool {
    case.fold(candidate).starts_with(&case.fold(partial))
}

/// Visible command names and aliases prefix-matching the partial, in
/// declaration order.
fn command_candidates(commands: &[Command], partial: &str, case: CasePolicy) -> Vec<String> {
    let mut out = Vec::new();
    for command in commands.iter().filter(|c| !c.is_hidden()) {
        if has_prefix(command.name(), partial, case) {
            out.push(command.name().to_string());
        }
        for alias in command.aliases() {
            if has_prefix(alias, partial, case) {
                out.push(alias.clone());
            }
        }
    }
    out
}

/// Named-argument names and aliases prefix-matching the stripped partial,
/// emitted with the prefix the sender typed. Positionals are filled by bare
/// tokens and are not offered here.
fn argument_name_candidates(
    command: &Command,
    stripped: &str,
    prefix: &str,
    case: CasePolicy,
) -> Vec<String> {
    let mut out = Vec::new();
    for argument in command.arguments().arguments().iter().filter(|a| !a.is_positional()) {
        if has_prefix(argument.name(), stripped, case) {
            out.push(format!("{prefix}{}", argument.name()));
        }
        for alias in argument.aliases() {
            if has_prefix(alias, stripped, case) {
                out.push(format!("{prefix}{alias}"));
            }
        }
    }
    out
}

/// Value suggestions for one argument: its suggestion provider when
/// declared, otherwise the parser's fixed candidates (e.g. choices).
fn value_candidates(
    argument: &Argument,
    command: &Command,
    sender: &dyn CommandSender,
    partial: &str,
    case: CasePolicy,
) -> Vec<String> {
    let raw = match argument.suggestion_provider() {
        Some(provider) => {
            let ctx = CompletionContext {
                sender,
                command,
                argument,
                partial,
            };
            provider.suggest(&ctx)
        }
        None => argument.parser().suggestions(),
    };
    raw.into_iter()
        .filter(|s| has_prefix(s, partial, case))
        .collect()
}
