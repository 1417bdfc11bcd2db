//! Diagnostic traces for resolution runs.
//!
//! Trace capture is gated by the registry's debug toggle
//! ([`CommandRegistry::set_debug`](command_console_core::CommandRegistry::set_debug))
//! and disabled by default, keeping the hot dispatch path free of the
//! per-step allocations.

use command_console_core::error::ResolveError;
use command_console_core::result::CommandResult;
use serde::Serialize;

/// One recorded resolution step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "step")]
pub enum TraceStep {
    /// A token matched a command name or alias.
    CommandMatched { name: String, depth: usize },
    /// The permission gate passed for the resolved command chain.
    PermissionGranted { command: String },
    /// A value was converted, validated, and bound.
    ArgumentBound { argument: String, raw: String },
    /// A flag was set by its presence.
    FlagSet { argument: String },
    /// A value was appended to a repeatable argument.
    ValueAppended { argument: String, raw: String },
    /// An un-prefixed token arrived after every positional slot was filled
    /// and was dropped.
    SurplusTokenIgnored { token: String },
    /// An absent argument fell back to its configured default.
    DefaultApplied { argument: String },
    /// Resolution aborted with the given error.
    Failed { error: String },
}

/// Ordered record of one resolution pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolutionTrace {
    /// Steps in the order they happened.
    pub steps: Vec<TraceStep>,
}

impl ResolutionTrace {
    /// Appends a step.
    pub fn record(&mut self, step: TraceStep) {
        self.steps.push(step);
    }

    /// Renders the trace as pretty-printed JSON for log sinks.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Result-plus-trace pairing returned by
/// [`resolve_line_with_trace`](crate::resolve_line_with_trace).
///
/// The trace is `None` unless the registry's debug toggle is on.
#[derive(Debug)]
pub struct ResolutionRun<'a> {
    /// The resolution outcome.
    pub result: Result<CommandResult<'a>, ResolveError>,
    /// The captured trace, when debug is enabled.
    pub trace: Option<ResolutionTrace>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_steps_serialize_snake_case() {
        let mut trace = ResolutionTrace::default();
        trace.record(TraceStep::CommandMatched {
            name: "bigdoors".to_string(),
            depth: 0,
        });
        trace.record(TraceStep::SurplusTokenIgnored {
            token: "extra".to_string(),
        });

        let json = trace.to_json();
        assert!(json.contains("\"step\": \"command_matched\""));
        assert!(json.contains("\"step\": \"surplus_token_ignored\""));
        assert!(json.contains("\"depth\": 0"));
    }
}
