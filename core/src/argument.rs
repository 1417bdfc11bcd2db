//! The argument model: one tagged type over the four argument kinds.
//!
//! Positional, named-optional, flag, and repeatable arguments share a common
//! descriptor ([`Argument`]) with kind-specific payload in [`ArgumentKind`].
//! Use the constructor methods ([`positional`](Argument::positional),
//! [`optional`](Argument::optional), [`flag`](Argument::flag),
//! [`repeatable`](Argument::repeatable)), then chain builder methods like
//! [`with_alias`](Argument::with_alias) and
//! [`with_validator`](Argument::with_validator).

use std::sync::Arc;

use crate::command::{Command, CommandSender};
use crate::manager::CasePolicy;
use crate::parse::{BoolParser, ValueParser};
use crate::validate::Validator;
use crate::value::ArgValue;

/// Kind-specific payload of an [`Argument`].
#[derive(Debug, Clone)]
pub enum ArgumentKind {
    /// Consumes un-prefixed tokens in declaration order.
    Positional {
        /// Required positionals left unfilled at end of input fail resolution.
        required: bool,
    },
    /// Prefix-triggered (`-name value` or `-name=value`), with an optional
    /// default applied when absent.
    Optional {
        /// Value bound when the argument is not supplied.
        default: Option<ArgValue>,
    },
    /// Named, zero-token: present binds `true`, absent binds `false`.
    Flag,
    /// Named, accumulates one value per occurrence, in supply order.
    /// Never positional.
    Repeatable {
        /// Fewer occurrences than this fail resolution as a missing argument.
        min_count: usize,
    },
}

/// Context handed to suggestion providers during tab completion.
pub struct CompletionContext<'a> {
    /// Who is completing.
    pub sender: &'a dyn CommandSender,
    /// The command whose argument is being completed.
    pub command: &'a Command,
    /// The argument whose value is being completed.
    pub argument: &'a Argument,
    /// The partial value typed so far (possibly empty).
    pub partial: &'a str,
}

/// Supplies completion candidates for an argument's value.
///
/// Any `Fn(&CompletionContext) -> Vec<String>` closure also qualifies.
pub trait SuggestionProvider: Send + Sync {
    /// Returns candidates, in the order they should be offered.
    fn suggest(&self, ctx: &CompletionContext<'_>) -> Vec<String>;
}

impl<F> SuggestionProvider for F
where
    F: Fn(&CompletionContext<'_>) -> Vec<String> + Send + Sync,
{
    fn suggest(&self, ctx: &CompletionContext<'_>) -> Vec<String> {
        self(ctx)
    }
}

/// A typed argument descriptor.
///
/// # Examples
///
/// ```
/// use command_console_core::{Argument, IntParser, StringParser, RangeValidator};
///
/// let blocks = Argument::positional("blocks", IntParser)
///     .with_summary("Number of blocks to move")
///     .with_validator(RangeValidator::between(0.0, 100.0));
/// assert!(blocks.is_positional());
/// assert!(blocks.is_required());
///
/// let player = Argument::repeatable("player", StringParser).with_alias("p");
/// assert!(!player.is_positional());
/// ```
pub struct Argument {
    name: String,
    aliases: Vec<String>,
    summary: String,
    kind: ArgumentKind,
    parser: Arc<dyn ValueParser>,
    validators: Vec<Arc<dyn Validator>>,
    suggestions: Option<Arc<dyn SuggestionProvider>>,
    invalid_default: bool,
}

impl Argument {
    fn new(name: impl Into<String>, kind: ArgumentKind, parser: Arc<dyn ValueParser>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            summary: String::new(),
            kind,
            parser,
            validators: Vec::new(),
            suggestions: None,
            invalid_default: false,
        }
    }

    /// Creates a required positional argument.
    pub fn positional(name: impl Into<String>, parser: impl ValueParser + 'static) -> Self {
        Self::new(
            name,
            ArgumentKind::Positional { required: true },
            Arc::new(parser),
        )
    }

    /// Creates an optional positional argument.
    pub fn optional_positional(
        name: impl Into<String>,
        parser: impl ValueParser + 'static,
    ) -> Self {
        Self::new(
            name,
            ArgumentKind::Positional { required: false },
            Arc::new(parser),
        )
    }

    /// Creates a named optional argument (`-name value` / `-name=value`).
    pub fn optional(name: impl Into<String>, parser: impl ValueParser + 'static) -> Self {
        Self::new(
            name,
            ArgumentKind::Optional { default: None },
            Arc::new(parser),
        )
    }

    /// Creates a flag: present binds `true`, absent binds `false`.
    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name, ArgumentKind::Flag, Arc::new(BoolParser))
    }

    /// Creates a repeatable named argument accumulating one value per
    /// occurrence. Optional by default; see
    /// [`with_min_count`](Self::with_min_count).
    pub fn repeatable(name: impl Into<String>, parser: impl ValueParser + 'static) -> Self {
        Self::new(
            name,
            ArgumentKind::Repeatable { min_count: 0 },
            Arc::new(parser),
        )
    }

    /// Adds an alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Sets the one-line summary shown in help output.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Appends a validator. Validators run in the order they were added.
    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Sets the default value bound when a named optional argument is absent.
    ///
    /// Only meaningful on [`Argument::optional`]; on any other kind the
    /// argument is rejected at registration time.
    pub fn with_default(mut self, default: impl Into<ArgValue>) -> Self {
        match &mut self.kind {
            ArgumentKind::Optional { default: slot } => *slot = Some(default.into()),
            _ => self.invalid_default = true,
        }
        self
    }

    /// Sets the minimum occurrence count for a repeatable argument.
    ///
    /// Ignored on other kinds.
    pub fn with_min_count(mut self, min: usize) -> Self {
        if let ArgumentKind::Repeatable { min_count } = &mut self.kind {
            *min_count = min;
        }
        self
    }

    /// Attaches a tab-completion suggestion provider for this argument's
    /// value.
    pub fn with_suggestions(mut self, provider: impl SuggestionProvider + 'static) -> Self {
        self.suggestions = Some(Arc::new(provider));
        self
    }

    /// The canonical argument name.
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

    /// Kind-specific payload.
    pub fn kind(&self) -> &ArgumentKind {
        &self.kind
    }

    /// Whether this argument consumes un-prefixed tokens.
    pub fn is_positional(&self) -> bool {
        matches!(self.kind, ArgumentKind::Positional { .. })
    }

    /// Whether resolution fails if this argument is left unfilled.
    pub fn is_required(&self) -> bool {
        match self.kind {
            ArgumentKind::Positional { required } => required,
            ArgumentKind::Repeatable { min_count } => min_count > 0,
            _ => false,
        }
    }

    /// The value parser.
    pub fn parser(&self) -> &dyn ValueParser {
        self.parser.as_ref()
    }

    /// Validators, in declaration order.
    pub fn validators(&self) -> impl Iterator<Item = &dyn Validator> {
        self.validators.iter().map(Arc::as_ref)
    }

    /// The suggestion provider, if one was attached.
    pub fn suggestion_provider(&self) -> Option<&dyn SuggestionProvider> {
        self.suggestions.as_deref()
    }

    /// Checks whether `name` matches this argument's name or an alias under
    /// the given case policy.
    pub fn matches(&self, name: &str, case: CasePolicy) -> bool {
        case.eq(&self.name, name) || self.aliases.iter().any(|a| case.eq(a, name))
    }

    pub(crate) fn has_invalid_default(&self) -> bool {
        self.invalid_default
    }
}

impl std::fmt::Debug for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argument")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("kind", &self.kind)
            .field("validators", &self.validators.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{IntParser, StringParser};

    #[test]
    fn test_constructors_set_kind() {
        assert!(matches!(
            Argument::positional("a", StringParser).kind(),
            ArgumentKind::Positional { required: true }
        ));
        assert!(matches!(
            Argument::optional_positional("a", StringParser).kind(),
            ArgumentKind::Positional { required: false }
        ));
        assert!(matches!(
            Argument::flag("verbose").kind(),
            ArgumentKind::Flag
        ));
        assert!(matches!(
            Argument::repeatable("player", StringParser).kind(),
            ArgumentKind::Repeatable { min_count: 0 }
        ));
    }

    #[test]
    fn test_repeatable_is_never_positional() {
        let arg = Argument::repeatable("player", StringParser).with_min_count(2);
        assert!(!arg.is_positional());
        assert!(arg.is_required());
    }

    #[test]
    fn test_default_only_on_optional() {
        let ok = Argument::optional("speed", IntParser).with_default(5i64);
        assert!(!ok.has_invalid_default());
        assert!(matches!(
            ok.kind(),
            ArgumentKind::Optional {
                default: Some(ArgValue::Int(5))
            }
        ));

        let bad = Argument::positional("speed", IntParser).with_default(5i64);
        assert!(bad.has_invalid_default());
    }

    #[test]
    fn test_matches_respects_case_policy() {
        let arg = Argument::optional("player", StringParser).with_alias("P");
        assert!(arg.matches("PLAYER", CasePolicy::Insensitive));
        assert!(!arg.matches("PLAYER", CasePolicy::Sensitive));
        assert!(arg.matches("p", CasePolicy::Insensitive));
        assert!(arg.matches("P", CasePolicy::Sensitive));
    }
}
