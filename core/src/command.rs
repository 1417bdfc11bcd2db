//! The command tree: commands, senders, executors, and the registry.
//!
//! A [`Command`] is one node in a hierarchical command tree. Trees are built
//! with the `with_*` builder methods at application setup time, registered
//! into a [`CommandRegistry`], and treated as read-only from then on. The
//! registry is an explicit, owned instance passed by reference to every
//! resolution call; there is no process-wide singleton.

use std::sync::Arc;

use tracing::debug;

use crate::argument::Argument;
use crate::error::RegistrationError;
use crate::manager::{ArgumentManager, CasePolicy};
use crate::parse::StringParser;
use crate::result::CommandResult;

/// The originator of a command invocation.
///
/// Supplies the identity used in permission checks and diagnostics, and is
/// available to validators and suggestion providers for sender-scaled
/// behavior.
pub trait CommandSender: Send + Sync {
    /// Display name of the sender.
    fn name(&self) -> &str;

    /// Whether the sender holds the given permission key. Defaults to
    /// granting everything, which suits hosts without a permission system.
    fn has_permission(&self, _key: &str) -> bool {
        true
    }
}

/// A sender with every permission, named `console`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSender;

impl CommandSender for ConsoleSender {
    fn name(&self) -> &str {
        "console"
    }
}

/// Executes a resolved, validated invocation.
///
/// Any `Fn(&dyn CommandSender, &CommandResult)` closure also qualifies.
pub trait CommandExecutor: Send + Sync {
    /// Runs the command with its bound arguments.
    fn execute(&self, sender: &dyn CommandSender, invocation: &CommandResult<'_>);
}

impl<F> CommandExecutor for F
where
    F: Fn(&dyn CommandSender, &CommandResult<'_>) + Send + Sync,
{
    fn execute(&self, sender: &dyn CommandSender, invocation: &CommandResult<'_>) {
        self(sender, invocation)
    }
}

/// One node in the command tree.
///
/// # Examples
///
/// ```
/// use command_console_core::{
///     Argument, Command, CommandResult, CommandSender, IntParser, StringParser,
/// };
///
/// let movedoor = Command::new("movedoor")
///     .with_alias("md")
///     .with_summary("Move a door by a number of blocks")
///     .with_argument(Argument::positional("door", StringParser))
///     .with_argument(Argument::positional("blocks", IntParser))
///     .with_executor(|_sender: &dyn CommandSender, _invocation: &CommandResult<'_>| {});
///
/// let root = Command::new("bigdoors")
///     .with_alias("bd")
///     .with_subcommand(movedoor);
///
/// assert_eq!(root.children().len(), 1);
/// assert!(root.find_child("MD", Default::default()).is_some());
/// ```
pub struct Command {
    name: String,
    aliases: Vec<String>,
    summary: String,
    permission: Option<String>,
    hidden: bool,
    arguments: ArgumentManager,
    children: Vec<Command>,
    executor: Option<Arc<dyn CommandExecutor>>,
    help_child: Option<usize>,
    defects: Vec<RegistrationError>,
}

impl Command {
    /// Creates a command with a case-insensitive argument manager.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_case_policy(name, CasePolicy::Insensitive)
    }

    /// Creates a command whose argument manager uses the given case policy.
    pub fn with_case_policy(name: impl Into<String>, case: CasePolicy) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            summary: String::new(),
            permission: None,
            hidden: false,
            arguments: ArgumentManager::new(case),
            children: Vec::new(),
            executor: None,
            help_child: None,
            defects: Vec::new(),
        }
    }

    /// Adds an alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Sets the one-line summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Sets the permission key gating this command (and, transitively,
    /// its subtree).
    pub fn with_permission(mut self, key: impl Into<String>) -> Self {
        self.permission = Some(key.into());
        self
    }

    /// Hides this command from tab completion. Hidden commands still
    /// resolve and execute normally.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Registers an argument. Duplicate names/aliases are recorded and
    /// surfaced when the command is registered into a
    /// [`CommandRegistry`].
    pub fn with_argument(mut self, argument: Argument) -> Self {
        if let Err(err) = self.arguments.register(argument) {
            self.defects.push(err);
        }
        self
    }

    /// Adds a child command.
    pub fn with_subcommand(mut self, child: Command) -> Self {
        self.children.push(child);
        self
    }

    /// Sets the executor invoked with the bound [`CommandResult`].
    pub fn with_executor(mut self, executor: impl CommandExecutor + 'static) -> Self {
        self.executor = Some(Arc::new(executor));
        self
    }

    /// Generates the standard help subcommand as a child of this command.
    ///
    /// The generated child is named `help` with alias `?` and carries one
    /// optional positional `query` (a command name or page number). Rendering
    /// is the host's concern; the given executor receives the bound query.
    pub fn with_help_subcommand(mut self, executor: impl CommandExecutor + 'static) -> Self {
        let help = Command::new("help")
            .with_alias("?")
            .with_summary("Show help for this command")
            .with_argument(Argument::optional_positional("query", StringParser))
            .with_executor(executor);
        self.help_child = Some(self.children.len());
        self.children.push(help);
        self
    }

    /// The command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Aliases, in registration order.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// One-line summary.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Permission key, if this command is gated.
    pub fn permission(&self) -> Option<&str> {
        self.permission.as_deref()
    }

    /// Whether this command is hidden from completion.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// The owned argument manager.
    pub fn arguments(&self) -> &ArgumentManager {
        &self.arguments
    }

    /// Child commands, in registration order.
    pub fn children(&self) -> &[Command] {
        &self.children
    }

    /// The executor, if one was set.
    pub fn executor(&self) -> Option<&dyn CommandExecutor> {
        self.executor.as_deref()
    }

    /// The auto-generated help subcommand, if
    /// [`with_help_subcommand`](Self::with_help_subcommand) was used.
    pub fn help_command(&self) -> Option<&Command> {
        self.help_child.map(|i| &self.children[i])
    }

    /// Whether `token` matches this command's name or an alias.
    pub fn matches(&self, token: &str, case: CasePolicy) -> bool {
        case.eq(&self.name, token) || self.aliases.iter().any(|a| case.eq(a, token))
    }

    /// Finds a direct child by name or alias.
    pub fn find_child(&self, token: &str, case: CasePolicy) -> Option<&Command> {
        self.children.iter().find(|c| c.matches(token, case))
    }

    fn validate_subtree(&self, case: CasePolicy) -> Result<(), RegistrationError> {
        if self.name.trim().is_empty() {
            return Err(RegistrationError::EmptyCommandName);
        }
        if let Some(defect) = self.defects.first() {
            return Err(defect.clone());
        }

        let mut seen: Vec<String> = Vec::new();
        for child in &self.children {
            let mut keys = vec![case.fold(&child.name)];
            keys.extend(child.aliases.iter().map(|a| case.fold(a)));
            for key in keys {
                if seen.contains(&key) {
                    return Err(RegistrationError::DuplicateCommand(key));
                }
                seen.push(key);
            }
            child.validate_subtree(case)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("hidden", &self.hidden)
            .field("arguments", &self.arguments.len())
            .field("children", &self.children.len())
            .finish_non_exhaustive()
    }
}

/// The owned set of root commands and the policies shared by every
/// resolution against them.
///
/// Registration completes before any dispatch begins; after that the
/// registry is read-only and safe to share across threads.
///
/// # Examples
///
/// ```
/// use command_console_core::{Command, CommandRegistry};
///
/// let mut registry = CommandRegistry::new();
/// registry
///     .register(Command::new("bigdoors").with_alias("bd"))
///     .unwrap();
///
/// assert!(registry.find("BD").is_some());
/// assert!(registry.find("smalldoors").is_none());
/// ```
#[derive(Debug, Default)]
pub struct CommandRegistry {
    case: CasePolicy,
    debug: bool,
    roots: Vec<Command>,
}

impl CommandRegistry {
    /// Creates an empty registry with case-insensitive command matching.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with the given case policy for command
    /// name matching.
    pub fn with_case_policy(case: CasePolicy) -> Self {
        Self {
            case,
            debug: false,
            roots: Vec::new(),
        }
    }

    /// Enables or disables capture of the resolution trace on failures.
    ///
    /// Disabled by default to keep the dispatch path cheap.
    pub fn set_debug(&mut self, enabled: bool) {
        self.debug = enabled;
    }

    /// Whether resolution traces are captured.
    pub fn debug_enabled(&self) -> bool {
        self.debug
    }

    /// The case policy for command name matching.
    pub fn case_policy(&self) -> CasePolicy {
        self.case
    }

    /// Registers a root command after validating its whole subtree:
    /// non-empty names, no duplicate sibling names/aliases, and no
    /// argument defects.
    pub fn register(&mut self, command: Command) -> Result<(), RegistrationError> {
        command.validate_subtree(self.case)?;

        let mut keys = vec![self.case.fold(&command.name)];
        keys.extend(command.aliases.iter().map(|a| self.case.fold(a)));
        for key in &keys {
            if self.roots.iter().any(|r| r.matches(key, self.case)) {
                return Err(RegistrationError::DuplicateCommand(key.clone()));
            }
        }

        debug!(command = %command.name, "registered root command");
        self.roots.push(command);
        Ok(())
    }

    /// Root commands, in registration order.
    pub fn commands(&self) -> &[Command] {
        &self.roots
    }

    /// Finds a root command by name or alias.
    pub fn find(&self, token: &str) -> Option<&Command> {
        self.roots.iter().find(|c| c.matches(token, self.case))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::StringParser;

    #[test]
    fn test_find_child_by_alias() {
        let root = Command::new("bigdoors")
            .with_subcommand(Command::new("movedoor").with_alias("md"));

        assert!(root.find_child("md", CasePolicy::Insensitive).is_some());
        assert!(root.find_child("MD", CasePolicy::Insensitive).is_some());
        assert!(root.find_child("MD", CasePolicy::Sensitive).is_none());
    }

    #[test]
    fn test_registry_rejects_duplicate_roots() {
        let mut registry = CommandRegistry::new();
        registry.register(Command::new("bigdoors")).unwrap();

        let err = registry.register(Command::new("BigDoors")).unwrap_err();
        assert_eq!(err, RegistrationError::DuplicateCommand("bigdoors".into()));
    }

    #[test]
    fn test_registry_rejects_duplicate_siblings() {
        let mut registry = CommandRegistry::new();
        let root = Command::new("bigdoors")
            .with_subcommand(Command::new("movedoor"))
            .with_subcommand(Command::new("MoveDoor"));

        let err = registry.register(root).unwrap_err();
        assert_eq!(err, RegistrationError::DuplicateCommand("movedoor".into()));
    }

    #[test]
    fn test_registry_surfaces_argument_defects() {
        let mut registry = CommandRegistry::new();
        let root = Command::new("bigdoors")
            .with_argument(Argument::optional("player", StringParser))
            .with_argument(Argument::optional("player", StringParser));

        let err = registry.register(root).unwrap_err();
        assert_eq!(err, RegistrationError::DuplicateArgument("player".into()));
    }

    #[test]
    fn test_registry_rejects_empty_name() {
        let mut registry = CommandRegistry::new();
        let err = registry.register(Command::new("  ")).unwrap_err();
        assert_eq!(err, RegistrationError::EmptyCommandName);
    }

    #[test]
    fn test_help_subcommand_is_generated() {
        let root = Command::new("bigdoors")
            .with_help_subcommand(|_s: &dyn CommandSender, _r: &CommandResult<'_>| {});

        let help = root.help_command().expect("help child");
        assert_eq!(help.name(), "help");
        assert!(help.matches("?", CasePolicy::Insensitive));
        assert_eq!(help.arguments().len(), 1);
    }
}
