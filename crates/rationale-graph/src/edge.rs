//! Graph edges
//!
//! Statement edges declare a top-level position; negation edges declare that
//! `target` negates `source`.

use crate::id::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Edge kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Root statement to a position
    Statement,

    /// Point to the point that negates it
    Negation,
}

impl EdgeKind {
    /// Kind name as used on the wire
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Statement => "statement",
            Self::Negation => "negation",
        }
    }
}

impl Display for EdgeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render anchor on the negated point
#[inline]
#[must_use]
pub fn source_handle(source: &NodeId) -> String {
    format!("{source}-source-handle")
}

/// Render anchor on the negating point
#[inline]
#[must_use]
pub fn incoming_handle(target: &NodeId) -> String {
    format!("{target}-incoming-handle")
}

/// Directed edge between two nodes
///
/// Handle fields are only meaningful to the renderer; they are derived from
/// the endpoints for negation edges and absent for statement edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// Edge identifier
    pub id: EdgeId,

    /// Edge kind
    #[serde(rename = "type")]
    pub kind: EdgeKind,

    /// Origin node
    pub source: NodeId,

    /// Destination node
    pub target: NodeId,

    /// Renderer anchor on `source`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,

    /// Renderer anchor on `target`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

impl Edge {
    /// Create edge of the given kind, deriving handles where required
    #[must_use]
    pub fn new(
        id: impl Into<EdgeId>,
        kind: EdgeKind,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Self {
        let edge = Self {
            id: id.into(),
            kind,
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        };
        edge.with_derived_handles()
    }

    /// Create statement edge
    #[inline]
    #[must_use]
    pub fn statement(
        id: impl Into<EdgeId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Self {
        Self::new(id, EdgeKind::Statement, source, target)
    }

    /// Create negation edge (`target` negates `source`)
    #[inline]
    #[must_use]
    pub fn negation(
        id: impl Into<EdgeId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Self {
        Self::new(id, EdgeKind::Negation, source, target)
    }

    /// Same edge id with new endpoints and kind
    #[must_use]
    pub fn rewired(&self, kind: EdgeKind, source: NodeId, target: NodeId) -> Self {
        Self::new(self.id.clone(), kind, source, target)
    }

    /// Check if either endpoint is `node`
    #[inline]
    #[must_use]
    pub fn touches(&self, node: &NodeId) -> bool {
        &self.source == node || &self.target == node
    }

    fn with_derived_handles(mut self) -> Self {
        match self.kind {
            EdgeKind::Negation => {
                self.source_handle = Some(source_handle(&self.source));
                self.target_handle = Some(incoming_handle(&self.target));
            }
            EdgeKind::Statement => {
                self.source_handle = None;
                self.target_handle = None;
            }
        }
        self
    }
}
