//! Statement handler

use crate::command::UpdateStatement;
use crate::error::CommandError;
use rationale_graph::{Graph, Node};

/// Replace the statement title
///
/// # Errors
/// [`CommandError::MissingStatement`] if the graph has no statement node
pub fn update_statement(graph: &Graph, cmd: &UpdateStatement) -> Result<Graph, CommandError> {
    let mut statement = graph
        .statement()
        .cloned()
        .ok_or(CommandError::MissingStatement)?;
    statement.title.clone_from(&cmd.statement);

    graph
        .replace_node(Node::Statement(statement))
        .ok_or(CommandError::MissingStatement)
}
