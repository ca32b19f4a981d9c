//! Command wire model
//!
//! Commands arrive as a JSON array produced by a generative model. Each
//! element is decoded independently by [`decode_command`] into a typed
//! [`GraphCommand`], so one bad element never poisons the batch.

use crate::error::{CommandFailure, DecodeError};
use rationale_graph::{Cred, EdgeId, EdgeKind, NodeId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Closed set of command kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Create a point
    AddPoint,
    /// Partially update a point (adds it when missing)
    UpdatePoint,
    /// Remove a point and its edges
    DeletePoint,
    /// Create an edge
    AddEdge,
    /// Rewire an edge (adds it when missing)
    UpdateEdge,
    /// Remove an edge
    DeleteEdge,
    /// Retitle the statement
    UpdateStatement,
    /// Overwrite a point's cred
    SetCred,
    /// Flag a point as a relevance objection
    MarkObjection,
    /// Clear a point's objection flag
    UnmarkObjection,
}

impl CommandKind {
    /// Every kind, in wire-table order
    pub const ALL: [Self; 10] = [
        Self::AddPoint,
        Self::UpdatePoint,
        Self::DeletePoint,
        Self::AddEdge,
        Self::UpdateEdge,
        Self::DeleteEdge,
        Self::UpdateStatement,
        Self::SetCred,
        Self::MarkObjection,
        Self::UnmarkObjection,
    ];

    /// Wire name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddPoint => "add_point",
            Self::UpdatePoint => "update_point",
            Self::DeletePoint => "delete_point",
            Self::AddEdge => "add_edge",
            Self::UpdateEdge => "update_edge",
            Self::DeleteEdge => "delete_edge",
            Self::UpdateStatement => "update_statement",
            Self::SetCred => "set_cred",
            Self::MarkObjection => "mark_objection",
            Self::UnmarkObjection => "unmark_objection",
        }
    }
}

impl Display for CommandKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandKind {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DecodeError::UnknownCommand {
                kind: s.to_string(),
                hint: remediation_hint(s),
            })
    }
}

/// Remediation for node/edge kind words used as a command type
#[must_use]
pub fn remediation_hint(kind: &str) -> Option<&'static str> {
    match kind.trim().to_ascii_lowercase().as_str() {
        "point" => Some(
            "'point' is a node type, not a command; use 'add_point' to create a point \
             or 'update_point' to change one",
        ),
        "node" => Some(
            "'node' is not a command; use 'add_point' to create a point, 'update_point' \
             to change one, or 'delete_point' to remove one",
        ),
        "statement" => Some(
            "'statement' is a node type, not a command; use 'update_statement' to change \
             the topic, or 'add_edge' with edgeType 'statement' to attach a position",
        ),
        "negation" => Some(
            "'negation' is an edge type, not a command; use 'add_edge' with edgeType \
             'negation' to connect a negating point",
        ),
        "edge" => Some(
            "'edge' is not a command; use 'add_edge' with edgeType 'statement' or \
             'negation', 'update_edge' to rewire one, or 'delete_edge' to remove one",
        ),
        "objection" => Some(
            "'objection' is not a command; use 'mark_objection' on an existing point \
             or 'add_point' with isObjection set",
        ),
        _ => None,
    }
}

/// `add_point` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPoint {
    /// Desired id (suffixed on collision)
    pub node_id: NodeId,
    /// Claim text
    pub content: String,
    /// Initial cred (defaults to zero)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cred: Option<Cred>,
    /// Objection flag (defaults to false)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_objection: Option<bool>,
    /// Objection target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objection_target_id: Option<NodeId>,
    /// Objection context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objection_context_id: Option<NodeId>,
}

impl AddPoint {
    /// Plain point with default cred and no objection
    #[must_use]
    pub fn new(node_id: impl Into<NodeId>, content: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            content: content.into(),
            cred: None,
            is_objection: None,
            objection_target_id: None,
            objection_context_id: None,
        }
    }

    /// With initial cred
    #[must_use]
    pub fn with_cred(mut self, cred: Cred) -> Self {
        self.cred = Some(cred);
        self
    }
}

/// `update_point` payload; absent fields keep their value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePoint {
    /// Point to update
    pub node_id: NodeId,
    /// Replacement content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Replacement cred
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cred: Option<Cred>,
}

/// Payload naming a single node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRef {
    /// Target node
    pub node_id: NodeId,
}

/// `add_edge` / `update_edge` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeSpec {
    /// Desired edge id
    pub edge_id: EdgeId,
    /// Origin node
    pub source: NodeId,
    /// Destination node
    pub target: NodeId,
    /// Edge kind
    pub edge_type: EdgeKind,
}

/// `delete_edge` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRef {
    /// Target edge
    pub edge_id: EdgeId,
}

/// `update_statement` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatement {
    /// New topic title
    pub statement: String,
}

/// `set_cred` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCred {
    /// Target point
    pub node_id: NodeId,
    /// New cred
    pub cred: Cred,
}

/// `mark_objection` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkObjection {
    /// Point to flag
    pub node_id: NodeId,
    /// Point whose relevance is challenged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objection_target_id: Option<NodeId>,
    /// Context point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objection_context_id: Option<NodeId>,
}

/// Typed command payload, discriminated by `type` on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandOp {
    /// See [`CommandKind::AddPoint`]
    AddPoint(AddPoint),
    /// See [`CommandKind::UpdatePoint`]
    UpdatePoint(UpdatePoint),
    /// See [`CommandKind::DeletePoint`]
    DeletePoint(NodeRef),
    /// See [`CommandKind::AddEdge`]
    AddEdge(EdgeSpec),
    /// See [`CommandKind::UpdateEdge`]
    UpdateEdge(EdgeSpec),
    /// See [`CommandKind::DeleteEdge`]
    DeleteEdge(EdgeRef),
    /// See [`CommandKind::UpdateStatement`]
    UpdateStatement(UpdateStatement),
    /// See [`CommandKind::SetCred`]
    SetCred(SetCred),
    /// See [`CommandKind::MarkObjection`]
    MarkObjection(MarkObjection),
    /// See [`CommandKind::UnmarkObjection`]
    UnmarkObjection(NodeRef),
}

impl CommandOp {
    /// Kind of this payload
    #[must_use]
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::AddPoint(_) => CommandKind::AddPoint,
            Self::UpdatePoint(_) => CommandKind::UpdatePoint,
            Self::DeletePoint(_) => CommandKind::DeletePoint,
            Self::AddEdge(_) => CommandKind::AddEdge,
            Self::UpdateEdge(_) => CommandKind::UpdateEdge,
            Self::DeleteEdge(_) => CommandKind::DeleteEdge,
            Self::UpdateStatement(_) => CommandKind::UpdateStatement,
            Self::SetCred(_) => CommandKind::SetCred,
            Self::MarkObjection(_) => CommandKind::MarkObjection,
            Self::UnmarkObjection(_) => CommandKind::UnmarkObjection,
        }
    }
}

/// A command together with the caller-supplied id used for attribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphCommand {
    /// Attribution id; carries no graph meaning
    pub id: String,
    /// Payload
    #[serde(flatten)]
    pub op: CommandOp,
}

impl GraphCommand {
    /// Create command
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, op: CommandOp) -> Self {
        Self { id: id.into(), op }
    }

    /// Kind of the payload
    #[inline]
    #[must_use]
    pub fn kind(&self) -> CommandKind {
        self.op.kind()
    }
}

/// Attribution id for an untrusted command at `position` in its batch
fn attribution_id(value: &Value, position: usize) -> String {
    match value.get("id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => format!("#{position}"),
    }
}

/// Decode one untrusted command
///
/// # Errors
/// Returns a [`CommandFailure`] attributed to the command's `id` (or its
/// position) when the value is not an object, has no string `type`, names
/// an unknown kind, or carries a payload that does not fit its kind.
pub fn decode_command(value: &Value, position: usize) -> Result<GraphCommand, CommandFailure> {
    let id = attribution_id(value, position);

    if !value.is_object() {
        return Err(CommandFailure::new(id, "unknown", DecodeError::NotAnObject));
    }

    let Some(raw_kind) = value.get("type").and_then(Value::as_str) else {
        return Err(CommandFailure::new(id, "unknown", DecodeError::MissingType));
    };

    let kind = raw_kind
        .parse::<CommandKind>()
        .map_err(|err| CommandFailure::new(id.clone(), raw_kind, err))?;

    let op = CommandOp::deserialize(value)
        .map_err(|err| CommandFailure::new(id.clone(), kind.as_str(), DecodeError::Malformed(err.to_string())))?;

    Ok(GraphCommand { id, op })
}

/// Decode every element of a batch, preserving order
#[must_use]
pub fn decode_commands(values: &[Value]) -> Vec<Result<GraphCommand, CommandFailure>> {
    values
        .iter()
        .enumerate()
        .map(|(position, value)| decode_command(value, position))
        .collect()
}
