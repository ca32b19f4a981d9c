//! Command dispatcher
//!
//! Applies a batch of commands in order, each against the result of the
//! previous one. A failing command is recorded and skipped; the batch always
//! runs to the end and nothing escapes as a panic or `Err`.

use crate::command::{decode_commands, GraphCommand};
use crate::config::{EngineConfig, ViolationPolicy};
use crate::error::{CommandFailure, FailureReason};
use crate::handlers::apply_op;
use crate::validator::{StructuralValidator, StructuralViolation};
use rationale_graph::Graph;
use serde::Serialize;
use serde_json::Value;

/// Result of applying a batch
///
/// Serializes as `{ "updatedGraph": ..., "errors": [...] }`; an empty
/// `errors` list means every command applied and the graph is valid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyOutcome {
    /// Graph after the batch (the input graph if the batch was rejected)
    pub updated_graph: Graph,

    /// Command failures followed by structural violations, as messages
    pub errors: Vec<String>,

    /// Whether [`ViolationPolicy::RejectBatch`] discarded the batch
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub rejected: bool,

    #[serde(skip)]
    failures: Vec<CommandFailure>,

    #[serde(skip)]
    violations: Vec<StructuralViolation>,
}

impl ApplyOutcome {
    /// Check if the batch applied cleanly and the graph is valid
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Per-command failures, in command order
    #[inline]
    #[must_use]
    pub fn command_failures(&self) -> &[CommandFailure] {
        &self.failures
    }

    /// Structural violations found after the batch
    #[inline]
    #[must_use]
    pub fn violations(&self) -> &[StructuralViolation] {
        &self.violations
    }
}

/// Applies command batches to graphs
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandProcessor {
    config: EngineConfig,
}

impl CommandProcessor {
    /// Create processor with configuration
    #[inline]
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Apply typed commands
    #[must_use]
    pub fn apply(&self, graph: &Graph, commands: &[GraphCommand]) -> ApplyOutcome {
        self.run(graph, commands.iter().map(Ok))
    }

    /// Apply raw JSON commands, decoding each one independently
    ///
    /// Elements that fail to decode are reported like handler failures and
    /// skipped; their neighbours still apply.
    #[must_use]
    pub fn apply_json(&self, graph: &Graph, commands: &[Value]) -> ApplyOutcome {
        let decoded = decode_commands(commands);
        self.run(graph, decoded.iter().map(Result::as_ref))
    }

    fn run<'a>(
        &self,
        graph: &Graph,
        commands: impl ExactSizeIterator<Item = Result<&'a GraphCommand, &'a CommandFailure>>,
    ) -> ApplyOutcome {
        let span = tracing::info_span!("apply_batch", commands = commands.len());
        let _guard = span.enter();

        let mut current = graph.clone();
        let mut failures = Vec::new();

        for command in commands {
            let command = match command {
                Ok(command) => command,
                Err(failure) => {
                    let failure = self.present(failure.clone());
                    tracing::warn!(command_id = %failure.command_id, error = %failure.reason, "command rejected");
                    failures.push(failure);
                    continue;
                }
            };

            match apply_op(&current, &command.op) {
                Ok(next) => {
                    tracing::debug!(command_id = %command.id, kind = %command.kind(), "command applied");
                    current = next;
                }
                Err(err) => {
                    tracing::warn!(command_id = %command.id, kind = %command.kind(), error = %err, "command failed");
                    failures.push(CommandFailure::new(
                        command.id.clone(),
                        command.kind().as_str(),
                        err,
                    ));
                }
            }
        }

        let violations = if self.config.validate {
            StructuralValidator::new().validate(&current)
        } else {
            Vec::new()
        };

        let errors: Vec<String> = failures
            .iter()
            .map(ToString::to_string)
            .chain(violations.iter().map(ToString::to_string))
            .collect();

        let rejected =
            self.config.violation_policy == ViolationPolicy::RejectBatch && !errors.is_empty();
        if rejected {
            current = graph.clone();
        }

        tracing::info!(
            failures = failures.len(),
            violations = violations.len(),
            rejected,
            "batch applied"
        );

        ApplyOutcome {
            updated_graph: current,
            errors,
            rejected,
            failures,
            violations,
        }
    }

    fn present(&self, failure: CommandFailure) -> CommandFailure {
        if self.config.remediation_hints {
            return failure;
        }
        match failure.reason {
            FailureReason::Decode(decode) => CommandFailure {
                reason: FailureReason::Decode(decode.without_hint()),
                ..failure
            },
            FailureReason::Handler(_) => failure,
        }
    }
}

/// Apply typed commands with the default configuration
#[must_use]
pub fn apply_commands(graph: &Graph, commands: &[GraphCommand]) -> ApplyOutcome {
    CommandProcessor::default().apply(graph, commands)
}
