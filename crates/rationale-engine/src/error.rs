//! Error types for the command engine
//!
//! Provides error handling for:
//! - Handler failures (node/edge lookups, type mismatches)
//! - Decode failures (unknown or malformed commands from untrusted input)
//! - Per-command attribution used in the returned error list

use rationale_graph::NodeId;
use std::fmt::{self, Display, Formatter};

/// Which end of an edge a missing node was named as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Edge source
    Source,
    /// Edge target
    Target,
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Recoverable failure of a single command handler
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    /// Node id does not exist
    #[error("node '{0}' not found")]
    NodeNotFound(NodeId),

    /// Node exists but is the statement, not a point
    #[error("node '{0}' is the statement node, not a point")]
    NotAPoint(NodeId),

    /// Edge endpoint does not exist
    #[error("{endpoint} node '{node_id}' not found")]
    MissingNode {
        /// Which endpoint was missing
        endpoint: Endpoint,
        /// The id that could not be resolved
        node_id: NodeId,
    },

    /// Graph has no statement node
    #[error("graph has no statement node")]
    MissingStatement,
}

impl CommandError {
    /// Create missing source endpoint error
    #[inline]
    #[must_use]
    pub fn missing_source(node_id: NodeId) -> Self {
        Self::MissingNode {
            endpoint: Endpoint::Source,
            node_id,
        }
    }

    /// Create missing target endpoint error
    #[inline]
    #[must_use]
    pub fn missing_target(node_id: NodeId) -> Self {
        Self::MissingNode {
            endpoint: Endpoint::Target,
            node_id,
        }
    }
}

/// Failure to turn one untrusted JSON value into a command
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// Command is not a JSON object
    #[error("command must be a JSON object")]
    NotAnObject,

    /// No string `type` field
    #[error("command is missing a string 'type' field")]
    MissingType,

    /// `type` outside the closed command set
    #[error("unknown command type '{kind}'{}", render_hint(.hint))]
    UnknownCommand {
        /// The offending type string
        kind: String,
        /// Remediation for known confusions
        hint: Option<&'static str>,
    },

    /// Payload does not fit the command kind
    #[error("malformed command: {0}")]
    Malformed(String),
}

impl DecodeError {
    /// Same error with any remediation hint removed
    #[must_use]
    pub fn without_hint(self) -> Self {
        match self {
            Self::UnknownCommand { kind, .. } => Self::UnknownCommand { kind, hint: None },
            other => other,
        }
    }
}

fn render_hint(hint: &Option<&'static str>) -> String {
    match hint {
        Some(hint) => format!("; {hint}"),
        None => String::new(),
    }
}

/// Why a command was discarded
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FailureReason {
    /// Rejected before reaching a handler
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Handler refused the command
    #[error(transparent)]
    Handler(#[from] CommandError),
}

/// A discarded command, attributed to its caller-supplied id
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("command {command_id} ({kind}): {reason}")]
pub struct CommandFailure {
    /// Caller-supplied command id (or `#<index>` when absent)
    pub command_id: String,
    /// Command type as given
    pub kind: String,
    /// Failure cause
    pub reason: FailureReason,
}

impl CommandFailure {
    /// Create failure record
    #[inline]
    #[must_use]
    pub fn new(
        command_id: impl Into<String>,
        kind: impl Into<String>,
        reason: impl Into<FailureReason>,
    ) -> Self {
        Self {
            command_id: command_id.into(),
            kind: kind.into(),
            reason: reason.into(),
        }
    }

    /// Check if the command never reached a handler
    #[inline]
    #[must_use]
    pub fn is_decode_failure(&self) -> bool {
        matches!(self.reason, FailureReason::Decode(_))
    }
}

/// Errors loading engine configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML could not be parsed into a configuration
    #[error("invalid engine configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
