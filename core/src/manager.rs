//! The argument manager: per-command argument registry and lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::argument::{Argument, ArgumentKind};
use crate::error::RegistrationError;

/// Case-sensitivity policy for name and alias lookup.
///
/// Fixed at construction of the owning [`ArgumentManager`] or
/// [`CommandRegistry`](crate::command::CommandRegistry). Under the
/// insensitive policy all keys are lower-cased before insertion and lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasePolicy {
    /// Keys are used verbatim.
    Sensitive,
    /// Keys are lower-cased before insertion and lookup (the default).
    #[default]
    Insensitive,
}

impl CasePolicy {
    /// Normalizes a key under this policy.
    pub fn fold(&self, key: &str) -> String {
        match self {
            Self::Sensitive => key.to_string(),
            Self::Insensitive => key.to_lowercase(),
        }
    }

    /// Compares two keys under this policy.
    pub fn eq(&self, a: &str, b: &str) -> bool {
        match self {
            Self::Sensitive => a == b,
            Self::Insensitive => a.to_lowercase() == b.to_lowercase(),
        }
    }
}

/// Owns the arguments of one command and resolves names/aliases to
/// descriptors.
///
/// Lookup never errors; an unknown name is simply `None`. Registration
/// enforces uniqueness of every name and alias under the configured
/// [`CasePolicy`].
///
/// # Examples
///
/// ```
/// use command_console_core::{Argument, ArgumentManager, CasePolicy, StringParser};
///
/// let mut manager = ArgumentManager::new(CasePolicy::Insensitive);
/// manager
///     .register(Argument::optional("player", StringParser).with_alias("p"))
///     .unwrap();
///
/// assert!(manager.lookup("PLAYER").is_some());
/// assert!(manager.lookup("p").is_some());
/// assert!(manager.lookup("q").is_none());
/// ```
#[derive(Debug)]
pub struct ArgumentManager {
    case: CasePolicy,
    arguments: Vec<Argument>,
    index: HashMap<String, usize>,
    positional: Vec<usize>,
}

impl ArgumentManager {
    /// Creates an empty manager with the given case policy.
    pub fn new(case: CasePolicy) -> Self {
        Self {
            case,
            arguments: Vec::new(),
            index: HashMap::new(),
            positional: Vec::new(),
        }
    }

    /// The case policy fixed at construction.
    pub fn case_policy(&self) -> CasePolicy {
        self.case
    }

    /// Registers an argument, indexing its name and every alias.
    ///
    /// Positional arguments are consumed in the order they are registered.
    pub fn register(&mut self, argument: Argument) -> Result<(), RegistrationError> {
        if argument.name().trim().is_empty() {
            return Err(RegistrationError::EmptyArgumentName);
        }
        if argument.has_invalid_default() {
            return Err(RegistrationError::InvalidDefault(
                argument.name().to_string(),
            ));
        }

        let position = self.arguments.len();
        let mut keys = Vec::with_capacity(1 + argument.aliases().len());
        keys.push(self.case.fold(argument.name()));
        for alias in argument.aliases() {
            keys.push(self.case.fold(alias));
        }
        for key in &keys {
            if self.index.contains_key(key) {
                return Err(RegistrationError::DuplicateArgument(key.clone()));
            }
        }
        for key in keys {
            self.index.insert(key, position);
        }
        if matches!(argument.kind(), ArgumentKind::Positional { .. }) {
            self.positional.push(position);
        }
        self.arguments.push(argument);
        Ok(())
    }

    /// Resolves a name or alias to its descriptor.
    pub fn lookup(&self, name: &str) -> Option<&Argument> {
        self.index
            .get(&self.case.fold(name))
            .map(|&i| &self.arguments[i])
    }

    /// All arguments, in registration order.
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Indices into [`arguments`](Self::arguments) of the positional
    /// arguments, in consumption order.
    pub fn positional_indices(&self) -> &[usize] {
        &self.positional
    }

    /// Number of registered arguments.
    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    /// Whether no arguments are registered.
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::StringParser;

    #[test]
    fn test_case_sensitive_lookup() {
        let mut manager = ArgumentManager::new(CasePolicy::Sensitive);
        manager
            .register(Argument::optional("argumenta", StringParser))
            .unwrap();
        manager
            .register(Argument::optional("argumentB", StringParser))
            .unwrap();

        assert!(manager.lookup("argumentA").is_none());
        assert!(manager.lookup("argumentB").is_some());
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let mut manager = ArgumentManager::new(CasePolicy::Insensitive);
        manager
            .register(Argument::optional("argumenta", StringParser))
            .unwrap();
        manager
            .register(Argument::optional("argumentB", StringParser))
            .unwrap();

        assert!(manager.lookup("argumenta").is_some());
        assert!(manager.lookup("argumentA").is_some());
        assert!(manager.lookup("argumentb").is_some());
        assert!(manager.lookup("argumentB").is_some());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut manager = ArgumentManager::new(CasePolicy::Insensitive);
        manager
            .register(Argument::optional("player", StringParser))
            .unwrap();

        let err = manager
            .register(Argument::optional("PLAYER", StringParser))
            .unwrap_err();
        assert_eq!(err, RegistrationError::DuplicateArgument("player".into()));
    }

    #[test]
    fn test_duplicate_alias_rejected() {
        let mut manager = ArgumentManager::new(CasePolicy::Insensitive);
        manager
            .register(Argument::optional("player", StringParser).with_alias("p"))
            .unwrap();

        let err = manager
            .register(Argument::flag("preview").with_alias("p"))
            .unwrap_err();
        assert_eq!(err, RegistrationError::DuplicateArgument("p".into()));
    }

    #[test]
    fn test_positional_order_is_registration_order() {
        let mut manager = ArgumentManager::new(CasePolicy::Insensitive);
        manager
            .register(Argument::positional("first", StringParser))
            .unwrap();
        manager
            .register(Argument::optional("speed", StringParser))
            .unwrap();
        manager
            .register(Argument::positional("second", StringParser))
            .unwrap();

        let names: Vec<&str> = manager
            .positional_indices()
            .iter()
            .map(|&i| manager.arguments()[i].name())
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_invalid_default_rejected() {
        let mut manager = ArgumentManager::new(CasePolicy::Insensitive);
        let err = manager
            .register(Argument::flag("preview").with_default(true))
            .unwrap_err();
        assert_eq!(err, RegistrationError::InvalidDefault("preview".into()));
    }
}
