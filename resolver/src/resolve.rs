//! Command-tree resolution and argument binding.
//!
//! Resolution is a single synchronous pass: walk the tree consuming leading
//! tokens that match child command names/aliases, gate on permissions, then
//! bind the remaining tokens against the matched command's argument manager.
//! Every failure aborts the pass with one typed
//! [`ResolveError`](command_console_core::ResolveError).
//!
//! Permission is checked against the resolved command and its ancestor chain
//! *before* any argument binding, so unauthorized senders never learn a
//! command's argument shape.

use std::collections::HashMap;

use tracing::debug;

use command_console_core::argument::{Argument, ArgumentKind};
use command_console_core::command::{Command, CommandRegistry, CommandSender};
use command_console_core::error::{self, ResolveError};
use command_console_core::result::{CommandResult, ParsedArgument};
use command_console_core::validate::ValidationContext;
use command_console_core::value::ArgValue;

use crate::trace::{ResolutionTrace, TraceStep};

/// Outcome of the tree walk: the resolution target, its ancestor chain, and
/// how many leading tokens were consumed as command names.
pub(crate) struct Walk<'a> {
    pub(crate) command: &'a Command,
    pub(crate) ancestors: Vec<&'a Command>,
    pub(crate) consumed: usize,
}

impl Walk<'_> {
    /// The resolved command path, space-joined.
    pub(crate) fn path(&self) -> String {
        let mut parts: Vec<&str> = self.ancestors.iter().map(|c| c.name()).collect();
        parts.push(self.command.name());
        parts.join(" ")
    }
}

/// Walks the tree from the registry roots. A token consumed as a command
/// match is never reconsidered as an argument token.
pub(crate) fn walk_tree<'a>(
    registry: &'a CommandRegistry,
    tokens: &[String],
) -> error::Result<Walk<'a>> {
    let first = tokens.first().map(String::as_str).unwrap_or("");
    let Some(root) = registry.find(first) else {
        return Err(ResolveError::CommandNotFound {
            token: first.to_string(),
        });
    };

    let case = registry.case_policy();
    let mut command = root;
    let mut ancestors: Vec<&Command> = Vec::new();
    let mut consumed = 1;
    while consumed < tokens.len() {
        match command.find_child(&tokens[consumed], case) {
            Some(child) => {
                ancestors.push(command);
                command = child;
                consumed += 1;
            }
            None => break,
        }
    }
    Ok(Walk {
        command,
        ancestors,
        consumed,
    })
}

/// Checks the resolved command and every gated ancestor, outermost first.
pub(crate) fn check_permission(walk: &Walk<'_>, sender: &dyn CommandSender) -> error::Result<()> {
    let chain = walk.ancestors.iter().copied().chain([walk.command]);
    for node in chain {
        if let Some(key) = node.permission() {
            if !sender.has_permission(key) {
                debug!(sender = sender.name(), command = %walk.path(), "permission denied");
                return Err(ResolveError::NoPermission {
                    sender: sender.name().to_string(),
                    command: walk.path(),
                });
            }
        }
    }
    Ok(())
}

/// Strips a recognized argument prefix. `-` and `--` alone are not argument
/// tokens.
pub(crate) fn strip_arg_prefix(token: &str) -> Option<&str> {
    let stripped = token
        .strip_prefix("--")
        .or_else(|| token.strip_prefix('-'))?;
    (!stripped.is_empty()).then_some(stripped)
}

/// Splits a stripped argument token on the first unescaped `=` into name and
/// inline value. `\=` in the name is a literal `=`.
pub(crate) fn split_inline(stripped: &str) -> (String, Option<String>) {
    let mut name = String::new();
    let mut chars = stripped.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'=') => {
                chars.next();
                name.push('=');
            }
            '=' => return (name, Some(chars.collect())),
            other => name.push(other),
        }
    }
    (name, None)
}

/// Converts a raw token through the argument's parser and runs its
/// validators in declaration order; the first rejection wins.
fn convert_and_validate(
    argument: &Argument,
    raw: &str,
    sender: &dyn CommandSender,
    command: &Command,
) -> error::Result<ArgValue> {
    let value = argument
        .parser()
        .parse(raw)
        .map_err(|_| ResolveError::IllegalValue {
            argument: argument.name().to_string(),
            raw: raw.to_string(),
        })?;

    let ctx = ValidationContext {
        sender,
        command,
        argument,
    };
    for validator in argument.validators() {
        if let Err(violation) = validator.validate(&value, &ctx) {
            return Err(ResolveError::ValidationFailed {
                argument: argument.name().to_string(),
                raw: raw.to_string(),
                bound: violation.bound,
            });
        }
    }
    Ok(value)
}

/// Binds the remaining tokens against the resolved command's arguments.
pub(crate) fn bind_arguments<'a>(
    walk: &Walk<'a>,
    sender: &dyn CommandSender,
    tokens: &[String],
    mut trace: Option<&mut ResolutionTrace>,
) -> error::Result<CommandResult<'a>> {
    let command = walk.command;
    let manager = command.arguments();
    let positional = manager.positional_indices();
    let mut bindings: HashMap<String, ParsedArgument> = HashMap::new();
    let mut next_positional = 0usize;

    let mut i = walk.consumed;
    while i < tokens.len() {
        let token = &tokens[i];
        if let Some(stripped) = strip_arg_prefix(token) {
            let (name, inline) = split_inline(stripped);
            let Some(argument) = manager.lookup(&name) else {
                return Err(ResolveError::UnknownArgument { name });
            };

            if matches!(argument.kind(), ArgumentKind::Flag) {
                // Zero-token: presence binds the boolean. An inline value is
                // ignored for flags.
                bindings.insert(
                    argument.name().to_string(),
                    ParsedArgument::Single(ArgValue::Bool(true)),
                );
                if let Some(t) = trace.as_deref_mut() {
                    t.record(TraceStep::FlagSet {
                        argument: argument.name().to_string(),
                    });
                }
            } else {
                let raw = match inline {
                    Some(v) => v,
                    None => {
                        i += 1;
                        match tokens.get(i) {
                            Some(next) => next.clone(),
                            None => {
                                return Err(ResolveError::MissingArgument {
                                    argument: argument.name().to_string(),
                                });
                            }
                        }
                    }
                };
                let value = convert_and_validate(argument, &raw, sender, command)?;
                match argument.kind() {
                    ArgumentKind::Repeatable { .. } => {
                        let entry = bindings
                            .entry(argument.name().to_string())
                            .or_insert_with(|| ParsedArgument::Repeated(Vec::new()));
                        if let ParsedArgument::Repeated(values) = entry {
                            values.push(value);
                        }
                        if let Some(t) = trace.as_deref_mut() {
                            t.record(TraceStep::ValueAppended {
                                argument: argument.name().to_string(),
                                raw,
                            });
                        }
                    }
                    _ => {
                        bindings.insert(
                            argument.name().to_string(),
                            ParsedArgument::Single(value),
                        );
                        if let Some(t) = trace.as_deref_mut() {
                            t.record(TraceStep::ArgumentBound {
                                argument: argument.name().to_string(),
                                raw,
                            });
                        }
                    }
                }
            }
        } else {
            // Un-prefixed: the next unfilled positional, in declaration
            // order. Tokens arriving after every slot is filled are dropped.
            while next_positional < positional.len() {
                let name = manager.arguments()[positional[next_positional]].name();
                if bindings.contains_key(name) {
                    next_positional += 1;
                } else {
                    break;
                }
            }
            if next_positional < positional.len() {
                let argument = &manager.arguments()[positional[next_positional]];
                let value = convert_and_validate(argument, token, sender, command)?;
                bindings.insert(argument.name().to_string(), ParsedArgument::Single(value));
                if let Some(t) = trace.as_deref_mut() {
                    t.record(TraceStep::ArgumentBound {
                        argument: argument.name().to_string(),
                        raw: token.clone(),
                    });
                }
                next_positional += 1;
            } else {
                debug!(token = %token, command = %command.name(), "ignoring surplus token");
                if let Some(t) = trace.as_deref_mut() {
                    t.record(TraceStep::SurplusTokenIgnored {
                        token: token.clone(),
                    });
                }
            }
        }
        i += 1;
    }

    // Fill defaults and enforce required arguments, in declaration order.
    for argument in manager.arguments() {
        if let Some(bound) = bindings.get(argument.name()) {
            if let ArgumentKind::Repeatable { min_count } = argument.kind() {
                if bound.values().len() < *min_count {
                    return Err(ResolveError::MissingArgument {
                        argument: argument.name().to_string(),
                    });
                }
            }
            continue;
        }
        match argument.kind() {
            ArgumentKind::Positional { required: true } => {
                return Err(ResolveError::MissingArgument {
                    argument: argument.name().to_string(),
                });
            }
            ArgumentKind::Positional { required: false } => {}
            ArgumentKind::Optional { default } => {
                if let Some(default) = default {
                    bindings.insert(
                        argument.name().to_string(),
                        ParsedArgument::Single(default.clone()),
                    );
                    if let Some(t) = trace.as_deref_mut() {
                        t.record(TraceStep::DefaultApplied {
                            argument: argument.name().to_string(),
                        });
                    }
                }
            }
            ArgumentKind::Flag => {
                bindings.insert(
                    argument.name().to_string(),
                    ParsedArgument::Single(ArgValue::Bool(false)),
                );
            }
            ArgumentKind::Repeatable { min_count } => {
                if *min_count > 0 {
                    return Err(ResolveError::MissingArgument {
                        argument: argument.name().to_string(),
                    });
                }
                bindings.insert(
                    argument.name().to_string(),
                    ParsedArgument::Repeated(Vec::new()),
                );
            }
        }
    }

    Ok(CommandResult::new(command, bindings))
}

/// One full resolution pass over a token sequence.
pub(crate) fn resolve_inner<'a>(
    registry: &'a CommandRegistry,
    sender: &dyn CommandSender,
    tokens: &[String],
    mut trace: Option<&mut ResolutionTrace>,
) -> error::Result<CommandResult<'a>> {
    let walk = walk_tree(registry, tokens)?;
    if let Some(t) = trace.as_deref_mut() {
        for (depth, node) in walk
            .ancestors
            .iter()
            .copied()
            .chain([walk.command])
            .enumerate()
        {
            t.record(TraceStep::CommandMatched {
                name: node.name().to_string(),
                depth,
            });
        }
    }

    check_permission(&walk, sender)?;
    if let Some(t) = trace.as_deref_mut() {
        t.record(TraceStep::PermissionGranted {
            command: walk.path(),
        });
    }

    debug!(command = %walk.path(), args = tokens.len() - walk.consumed, "resolved command");
    bind_arguments(&walk, sender, tokens, trace)
}
