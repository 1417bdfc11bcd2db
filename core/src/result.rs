//! The bound, validated output of one resolution.

use std::collections::HashMap;

use serde::Serialize;

use crate::command::{Command, CommandSender};
use crate::value::ArgValue;

/// One bound argument: a single value, or the ordered sequence accumulated
/// by a repeatable argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParsedArgument {
    /// One resolved value (or the configured default).
    Single(ArgValue),
    /// The values of a repeatable argument, in supply order.
    Repeated(Vec<ArgValue>),
}

impl ParsedArgument {
    /// The single value, if this binding is not repeated.
    pub fn value(&self) -> Option<&ArgValue> {
        match self {
            Self::Single(v) => Some(v),
            Self::Repeated(_) => None,
        }
    }

    /// All values: one slice element for a single binding, the full
    /// sequence for a repeated one.
    pub fn values(&self) -> &[ArgValue] {
        match self {
            Self::Single(v) => std::slice::from_ref(v),
            Self::Repeated(vs) => vs,
        }
    }
}

/// The resolved command plus its validated name-to-value bindings.
///
/// Handed to the command's executor for the duration of one invocation and
/// discarded afterwards. Getters are alias-aware: any name or alias the
/// command's argument manager knows resolves to the same binding.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use command_console_core::{
///     ArgValue, Argument, Command, CommandResult, IntParser, ParsedArgument,
/// };
///
/// let command = Command::new("setspeed")
///     .with_argument(Argument::positional("speed", IntParser).with_alias("s"));
/// let mut bindings = HashMap::new();
/// bindings.insert("speed".to_string(), ParsedArgument::Single(ArgValue::Int(3)));
/// let result = CommandResult::new(&command, bindings);
///
/// assert_eq!(result.int("speed"), Some(3));
/// assert_eq!(result.int("s"), Some(3));
/// ```
pub struct CommandResult<'a> {
    command: &'a Command,
    bindings: HashMap<String, ParsedArgument>,
}

impl<'a> CommandResult<'a> {
    /// Assembles a result. Bindings are keyed by canonical argument name.
    pub fn new(command: &'a Command, bindings: HashMap<String, ParsedArgument>) -> Self {
        Self { command, bindings }
    }

    /// The resolved command.
    pub fn command(&self) -> &'a Command {
        self.command
    }

    /// The binding for a name or alias.
    pub fn get(&self, name: &str) -> Option<&ParsedArgument> {
        // Canonicalize through the argument manager so aliases hit.
        let canonical = self.command.arguments().lookup(name)?.name();
        self.bindings.get(canonical)
    }

    /// The single bound value for a name or alias.
    pub fn value(&self, name: &str) -> Option<&ArgValue> {
        self.get(name).and_then(ParsedArgument::value)
    }

    /// All bound values for a name or alias; empty when unbound.
    pub fn values(&self, name: &str) -> &[ArgValue] {
        self.get(name).map(ParsedArgument::values).unwrap_or(&[])
    }

    /// The boolean state of a flag. Unbound flags read as `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.value(name).and_then(ArgValue::as_bool).unwrap_or(false)
    }

    /// The bound integer, if present and integral.
    pub fn int(&self, name: &str) -> Option<i64> {
        self.value(name).and_then(ArgValue::as_int)
    }

    /// The bound number widened to `f64`, if present and numeric.
    pub fn float(&self, name: &str) -> Option<f64> {
        self.value(name).and_then(ArgValue::as_float)
    }

    /// The bound text, if present and textual.
    pub fn str(&self, name: &str) -> Option<&str> {
        self.value(name).and_then(ArgValue::as_str)
    }

    /// Runs the command's executor, if one is set.
    ///
    /// Returns whether an executor ran.
    pub fn run(&self, sender: &dyn CommandSender) -> bool {
        match self.command.executor() {
            Some(executor) => {
                executor.execute(sender, self);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for CommandResult<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandResult")
            .field("command", &self.command.name())
            .field("bindings", &self.bindings)
            .finish()
    }
}
