//! Value validators with static or dynamically computed bounds.
//!
//! A [`Validator`] accepts or rejects a converted value. Validators receive a
//! [`ValidationContext`] naming the invoking sender, the resolved command,
//! and the argument under validation, so bounds can be computed per sender
//! (e.g. an admin may create larger structures than a regular player).
//!
//! All range bounds are exclusive: a value exactly at a bound is rejected.

use crate::argument::Argument;
use crate::command::{Command, CommandSender};
use crate::value::ArgValue;

/// Context handed to validators and computed bounds.
pub struct ValidationContext<'a> {
    /// Who invoked the command.
    pub sender: &'a dyn CommandSender,
    /// The resolved command the value is being bound for.
    pub command: &'a Command,
    /// The argument under validation.
    pub argument: &'a Argument,
}

/// A violated bound, described for the caller's error message.
///
/// The description is carried verbatim into
/// [`ResolveError::ValidationFailed`](crate::error::ResolveError::ValidationFailed)
/// so hosts can localize around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundViolation {
    /// Human-readable description of the bound that was violated.
    pub bound: String,
}

impl BoundViolation {
    /// Creates a violation naming the violated bound.
    pub fn new(bound: impl Into<String>) -> Self {
        Self {
            bound: bound.into(),
        }
    }
}

/// Accepts or rejects a converted value.
///
/// Validators run in declaration order; the first rejection wins. Any
/// `Fn(&ArgValue, &ValidationContext) -> Result<(), BoundViolation>` closure
/// also qualifies.
pub trait Validator: Send + Sync {
    /// Checks `value`, returning the violated bound on rejection.
    fn validate(
        &self,
        value: &ArgValue,
        ctx: &ValidationContext<'_>,
    ) -> Result<(), BoundViolation>;
}

impl<F> Validator for F
where
    F: Fn(&ArgValue, &ValidationContext<'_>) -> Result<(), BoundViolation> + Send + Sync,
{
    fn validate(
        &self,
        value: &ArgValue,
        ctx: &ValidationContext<'_>,
    ) -> Result<(), BoundViolation> {
        self(value, ctx)
    }
}

/// One side of a numeric range.
pub enum Bound {
    /// No bound on this side.
    Unbounded,
    /// A fixed numeric bound.
    Fixed(f64),
    /// A bound computed from the validation context at check time.
    Computed(Box<dyn Fn(&ValidationContext<'_>) -> f64 + Send + Sync>),
}

impl Bound {
    fn resolve(&self, ctx: &ValidationContext<'_>) -> Option<f64> {
        match self {
            Self::Unbounded => None,
            Self::Fixed(b) => Some(*b),
            Self::Computed(f) => Some(f(ctx)),
        }
    }
}

impl std::fmt::Debug for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unbounded => write!(f, "Unbounded"),
            Self::Fixed(b) => write!(f, "Fixed({b})"),
            Self::Computed(_) => write!(f, "Computed(..)"),
        }
    }
}

/// Numeric range check with exclusive bounds.
///
/// Minimum and maximum checks are one-sided ranges. Non-numeric values are
/// rejected outright.
///
/// # Examples
///
/// ```
/// use command_console_core::RangeValidator;
///
/// // Accepts 11..=19, rejects 10 and 20 (bounds are exclusive).
/// let range = RangeValidator::between(10.0, 20.0);
///
/// // One-sided: anything strictly greater than 0.
/// let min = RangeValidator::minimum(0.0);
/// # let _ = (range, min);
/// ```
#[derive(Debug)]
pub struct RangeValidator {
    lower: Bound,
    upper: Bound,
}

impl RangeValidator {
    /// Both bounds fixed, both exclusive.
    pub fn between(lower: f64, upper: f64) -> Self {
        Self {
            lower: Bound::Fixed(lower),
            upper: Bound::Fixed(upper),
        }
    }

    /// Exclusive lower bound only.
    pub fn minimum(lower: f64) -> Self {
        Self {
            lower: Bound::Fixed(lower),
            upper: Bound::Unbounded,
        }
    }

    /// Exclusive upper bound only.
    pub fn maximum(upper: f64) -> Self {
        Self {
            lower: Bound::Unbounded,
            upper: Bound::Fixed(upper),
        }
    }

    /// Both bounds computed from the validation context at check time.
    pub fn between_computed<L, U>(lower: L, upper: U) -> Self
    where
        L: Fn(&ValidationContext<'_>) -> f64 + Send + Sync + 'static,
        U: Fn(&ValidationContext<'_>) -> f64 + Send + Sync + 'static,
    {
        Self {
            lower: Bound::Computed(Box::new(lower)),
            upper: Bound::Computed(Box::new(upper)),
        }
    }

    /// Computed lower bound only (e.g. scaled by sender rank).
    pub fn minimum_computed<L>(lower: L) -> Self
    where
        L: Fn(&ValidationContext<'_>) -> f64 + Send + Sync + 'static,
    {
        Self {
            lower: Bound::Computed(Box::new(lower)),
            upper: Bound::Unbounded,
        }
    }

    /// Computed upper bound only.
    pub fn maximum_computed<U>(upper: U) -> Self
    where
        U: Fn(&ValidationContext<'_>) -> f64 + Send + Sync + 'static,
    {
        Self {
            lower: Bound::Unbounded,
            upper: Bound::Computed(Box::new(upper)),
        }
    }

    fn describe(lower: Option<f64>, upper: Option<f64>) -> String {
        match (lower, upper) {
            (Some(lo), Some(hi)) => format!("between {lo} and {hi} (exclusive)"),
            (Some(lo), None) => format!("greater than {lo}"),
            (None, Some(hi)) => format!("less than {hi}"),
            (None, None) => "unbounded".to_string(),
        }
    }
}

impl Validator for RangeValidator {
    fn validate(
        &self,
        value: &ArgValue,
        ctx: &ValidationContext<'_>,
    ) -> Result<(), BoundViolation> {
        let lower = self.lower.resolve(ctx);
        let upper = self.upper.resolve(ctx);
        let bound = Self::describe(lower, upper);

        let Some(v) = value.as_float() else {
            return Err(BoundViolation::new(bound));
        };
        if let Some(lo) = lower {
            if v <= lo {
                return Err(BoundViolation::new(bound));
            }
        }
        if let Some(hi) = upper {
            if v >= hi {
                return Err(BoundViolation::new(bound));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Command, ConsoleSender};

    fn ctx<'a>(command: &'a Command, argument: &'a Argument) -> ValidationContext<'a> {
        ValidationContext {
            sender: &ConsoleSender,
            command,
            argument,
        }
    }

    fn fixture() -> (Command, Argument) {
        let command = Command::new("resize");
        let argument = Argument::positional("blocks", crate::parse::IntParser);
        (command, argument)
    }

    #[test]
    fn test_between_bounds_are_exclusive() {
        let (command, argument) = fixture();
        let ctx = ctx(&command, &argument);
        let range = RangeValidator::between(10.0, 20.0);

        assert!(range.validate(&ArgValue::Int(10), &ctx).is_err());
        assert!(range.validate(&ArgValue::Int(11), &ctx).is_ok());
        assert!(range.validate(&ArgValue::Int(19), &ctx).is_ok());
        assert!(range.validate(&ArgValue::Int(20), &ctx).is_err());
    }

    #[test]
    fn test_violation_names_the_bound() {
        let (command, argument) = fixture();
        let ctx = ctx(&command, &argument);
        let range = RangeValidator::between(10.0, 20.0);

        let violation = range.validate(&ArgValue::Int(20), &ctx).unwrap_err();
        assert_eq!(violation.bound, "between 10 and 20 (exclusive)");
    }

    #[test]
    fn test_one_sided_bounds() {
        let (command, argument) = fixture();
        let ctx = ctx(&command, &argument);

        let min = RangeValidator::minimum(0.0);
        assert!(min.validate(&ArgValue::Int(0), &ctx).is_err());
        assert!(min.validate(&ArgValue::Int(1), &ctx).is_ok());

        let max = RangeValidator::maximum(100.0);
        assert!(max.validate(&ArgValue::Float(99.9), &ctx).is_ok());
        assert!(max.validate(&ArgValue::Int(100), &ctx).is_err());
    }

    #[test]
    fn test_computed_bound_reads_context() {
        let (command, argument) = fixture();
        let ctx = ctx(&command, &argument);

        // Bound derived from the sender; ConsoleSender is named "console".
        let max = RangeValidator::maximum_computed(|ctx: &ValidationContext<'_>| {
            ctx.sender.name().len() as f64
        });
        assert!(max.validate(&ArgValue::Int(6), &ctx).is_ok());
        assert!(max.validate(&ArgValue::Int(7), &ctx).is_err());
    }

    #[test]
    fn test_non_numeric_value_is_rejected() {
        let (command, argument) = fixture();
        let ctx = ctx(&command, &argument);
        let range = RangeValidator::between(0.0, 10.0);

        assert!(range.validate(&ArgValue::Str("five".into()), &ctx).is_err());
    }
}
