//! Objection handlers
//!
//! An objection disputes the relevance of `objectionTargetId` with respect to
//! `objectionContextId`. The flag and both references always change together.

use super::{existing_point, replace_point};
use crate::command::{MarkObjection, NodeRef};
use crate::error::CommandError;
use rationale_graph::Graph;

/// Flag a point as an objection and set both references
///
/// # Errors
/// - [`CommandError::NodeNotFound`] if the id is absent
/// - [`CommandError::NotAPoint`] if the id names the statement
pub fn mark_objection(graph: &Graph, cmd: &MarkObjection) -> Result<Graph, CommandError> {
    let point = existing_point(graph, &cmd.node_id)?.clone().marked_objection(
        cmd.objection_target_id.clone(),
        cmd.objection_context_id.clone(),
    );
    replace_point(graph, point)
}

/// Clear the objection flag and both references
///
/// # Errors
/// - [`CommandError::NodeNotFound`] if the id is absent
/// - [`CommandError::NotAPoint`] if the id names the statement
pub fn unmark_objection(graph: &Graph, cmd: &NodeRef) -> Result<Graph, CommandError> {
    let point = existing_point(graph, &cmd.node_id)?
        .clone()
        .unmarked_objection();
    replace_point(graph, point)
}
