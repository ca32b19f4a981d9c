//! Graph nodes
//!
//! Provides the [`Node`] union: the single root [`StatementNode`] and the
//! [`PointNode`] arguments hanging below it.

use crate::id::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Endorsed conviction of a point
///
/// # Invariants
/// - Always finite and non-negative
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Cred(f64);

impl Cred {
    /// Zero cred (the default for new points)
    pub const ZERO: Self = Self(0.0);

    /// Create cred, rejecting negative and non-finite values
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidCred`] if `value` is negative, NaN or infinite
    pub fn new(value: f64) -> Result<Self, GraphError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(GraphError::InvalidCred(value))
        }
    }

    /// Raw value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Cred {
    type Error = GraphError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Cred> for f64 {
    fn from(cred: Cred) -> Self {
        cred.0
    }
}

impl Display for Cred {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised by graph value constructors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Cred outside the allowed range
    #[error("cred must be a finite, non-negative number (got {0})")]
    InvalidCred(f64),
}

/// Neutral root describing the topic under discussion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementNode {
    /// Node identifier
    pub id: NodeId,

    /// Topic title
    pub title: String,
}

/// Argument node: a top-level position or a negation of another point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointNode {
    /// Node identifier
    pub id: NodeId,

    /// Free-text claim
    pub content: String,

    /// Endorsed conviction
    #[serde(default)]
    pub cred: Cred,

    /// Whether this point challenges relevance rather than truth
    #[serde(default)]
    pub is_objection: bool,

    /// Point whose relevance is challenged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objection_target_id: Option<NodeId>,

    /// Context point the relevance is judged against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objection_context_id: Option<NodeId>,
}

impl PointNode {
    /// Create a plain (non-objection) point
    #[must_use]
    pub fn new(id: impl Into<NodeId>, content: impl Into<String>, cred: Cred) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            cred,
            is_objection: false,
            objection_target_id: None,
            objection_context_id: None,
        }
    }

    /// Mark as objection, replacing both objection references
    #[must_use]
    pub fn marked_objection(mut self, target: Option<NodeId>, context: Option<NodeId>) -> Self {
        self.is_objection = true;
        self.objection_target_id = target;
        self.objection_context_id = context;
        self
    }

    /// Clear the objection flag and both references
    #[must_use]
    pub fn unmarked_objection(mut self) -> Self {
        self.is_objection = false;
        self.objection_target_id = None;
        self.objection_context_id = None;
        self
    }
}

/// Rationale graph node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// The single root
    Statement(StatementNode),

    /// Any argument below the root
    Point(PointNode),
}

impl Node {
    /// Create statement node
    #[inline]
    #[must_use]
    pub fn statement(id: impl Into<NodeId>, title: impl Into<String>) -> Self {
        Self::Statement(StatementNode {
            id: id.into(),
            title: title.into(),
        })
    }

    /// Create plain point node
    #[inline]
    #[must_use]
    pub fn point(id: impl Into<NodeId>, content: impl Into<String>, cred: Cred) -> Self {
        Self::Point(PointNode::new(id, content, cred))
    }

    /// Node identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> &NodeId {
        match self {
            Self::Statement(statement) => &statement.id,
            Self::Point(point) => &point.id,
        }
    }

    /// Kind name as used on the wire
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Statement(_) => "statement",
            Self::Point(_) => "point",
        }
    }

    /// Check if this is the statement root
    #[inline]
    #[must_use]
    pub fn is_statement(&self) -> bool {
        matches!(self, Self::Statement(_))
    }

    /// Point payload, if this is a point
    #[inline]
    #[must_use]
    pub fn as_point(&self) -> Option<&PointNode> {
        match self {
            Self::Point(point) => Some(point),
            Self::Statement(_) => None,
        }
    }

    /// Statement payload, if this is the root
    #[inline]
    #[must_use]
    pub fn as_statement(&self) -> Option<&StatementNode> {
        match self {
            Self::Statement(statement) => Some(statement),
            Self::Point(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn cred_rejects_negative_and_nan() {
        assert!(Cred::new(0.0).is_ok());
        assert!(Cred::new(12.5).is_ok());
        assert_eq!(Cred::new(-1.0), Err(GraphError::InvalidCred(-1.0)));
        assert!(Cred::new(f64::NAN).is_err());
        assert!(Cred::new(f64::INFINITY).is_err());
    }

    #[test]
    fn cred_deserialization_is_checked() {
        let ok: Cred = serde_json::from_value(json!(3)).unwrap();
        assert_eq!(ok.value(), 3.0);
        assert!(serde_json::from_value::<Cred>(json!(-2)).is_err());
    }

    #[test]
    fn point_wire_shape() {
        let node = Node::point("p1", "X", Cred::new(3.0).unwrap());
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({
                "type": "point",
                "id": "p1",
                "content": "X",
                "cred": 3.0,
                "isObjection": false
            })
        );
    }

    #[test]
    fn point_defaults_when_fields_missing() {
        let node: Node = serde_json::from_value(json!({
            "type": "point",
            "id": 7,
            "content": "bare"
        }))
        .unwrap();

        let point = node.as_point().unwrap();
        assert_eq!(point.id.as_str(), "7");
        assert_eq!(point.cred, Cred::ZERO);
        assert!(!point.is_objection);
        assert_eq!(point.objection_target_id, None);
    }

    #[test]
    fn objection_mark_then_unmark_clears_everything() {
        let point = PointNode::new("p1", "c", Cred::ZERO)
            .marked_objection(Some(NodeId::from("5")), Some(NodeId::from("9")));
        assert!(point.is_objection);

        let cleared = point.unmarked_objection();
        assert!(!cleared.is_objection);
        assert_eq!(cleared.objection_target_id, None);
        assert_eq!(cleared.objection_context_id, None);
    }

    #[test]
    fn statement_accessors() {
        let node = Node::statement("statement", "Topic");
        assert!(node.is_statement());
        assert_eq!(node.kind(), "statement");
        assert_eq!(node.as_statement().map(|s| s.title.as_str()), Some("Topic"));
        assert!(node.as_point().is_none());
    }
}
