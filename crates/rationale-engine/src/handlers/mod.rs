//! Command handlers
//!
//! One pure function per command kind. Every handler takes the current
//! snapshot by reference and returns a new snapshot or a [`CommandError`];
//! the input is never modified, so a failed command leaves no trace.

mod edges;
mod objection;
mod points;
mod statement;

pub use edges::{add_edge, delete_edge, update_edge};
pub use objection::{mark_objection, unmark_objection};
pub use points::{add_point, delete_point, set_cred, update_point};
pub use statement::update_statement;

use crate::command::CommandOp;
use crate::error::CommandError;
use rationale_graph::{Graph, Node, NodeId, PointNode};

/// Route a payload to its handler
///
/// # Errors
/// Propagates the handler's [`CommandError`]
pub fn apply_op(graph: &Graph, op: &CommandOp) -> Result<Graph, CommandError> {
    match op {
        CommandOp::AddPoint(cmd) => add_point(graph, cmd),
        CommandOp::UpdatePoint(cmd) => update_point(graph, cmd),
        CommandOp::DeletePoint(cmd) => delete_point(graph, cmd),
        CommandOp::AddEdge(cmd) => add_edge(graph, cmd),
        CommandOp::UpdateEdge(cmd) => update_edge(graph, cmd),
        CommandOp::DeleteEdge(cmd) => delete_edge(graph, cmd),
        CommandOp::UpdateStatement(cmd) => update_statement(graph, cmd),
        CommandOp::SetCred(cmd) => set_cred(graph, cmd),
        CommandOp::MarkObjection(cmd) => mark_objection(graph, cmd),
        CommandOp::UnmarkObjection(cmd) => unmark_objection(graph, cmd),
    }
}

/// Resolve an existing point, distinguishing absent ids from the statement
fn existing_point<'g>(graph: &'g Graph, id: &NodeId) -> Result<&'g PointNode, CommandError> {
    let node = graph
        .node(id)
        .ok_or_else(|| CommandError::NodeNotFound(id.clone()))?;
    node.as_point()
        .ok_or_else(|| CommandError::NotAPoint(id.clone()))
}

/// Swap in an updated point, keeping its position
fn replace_point(graph: &Graph, point: PointNode) -> Result<Graph, CommandError> {
    let id = point.id.clone();
    graph
        .replace_node(Node::Point(point))
        .ok_or(CommandError::NodeNotFound(id))
}
