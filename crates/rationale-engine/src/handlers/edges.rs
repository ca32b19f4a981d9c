//! Edge handlers: add, update, delete

use crate::command::{EdgeRef, EdgeSpec};
use crate::error::CommandError;
use rationale_graph::{Edge, Graph};

/// Append an edge under a collision-safe id
///
/// Endpoints are never fabricated: a missing endpoint fails the command.
///
/// # Errors
/// [`CommandError::MissingNode`] naming the first missing endpoint
pub fn add_edge(graph: &Graph, cmd: &EdgeSpec) -> Result<Graph, CommandError> {
    if !graph.contains_node(&cmd.source) {
        return Err(CommandError::missing_source(cmd.source.clone()));
    }
    if !graph.contains_node(&cmd.target) {
        return Err(CommandError::missing_target(cmd.target.clone()));
    }

    let id = graph.allocate_edge_id(&cmd.edge_id);
    if id != cmd.edge_id {
        tracing::debug!(requested = %cmd.edge_id, allocated = %id, "edge id taken, suffixed");
    }

    let edge = Edge::new(id, cmd.edge_type, cmd.source.clone(), cmd.target.clone());
    Ok(graph.with_edge(edge))
}

/// Rewire an edge in place; a missing id is treated as `add_edge`
///
/// # Errors
/// [`CommandError::MissingNode`] when falling back to `add_edge` with a
/// missing endpoint
pub fn update_edge(graph: &Graph, cmd: &EdgeSpec) -> Result<Graph, CommandError> {
    let Some(existing) = graph.edge(&cmd.edge_id) else {
        tracing::debug!(edge_id = %cmd.edge_id, "update_edge on missing edge, adding instead");
        return add_edge(graph, cmd);
    };

    let rewired = existing.rewired(cmd.edge_type, cmd.source.clone(), cmd.target.clone());
    Ok(graph.replace_edge(rewired).unwrap_or_else(|| graph.clone()))
}

/// Remove an edge; absent ids are a no-op and nodes are untouched
///
/// # Errors
/// None
pub fn delete_edge(graph: &Graph, cmd: &EdgeRef) -> Result<Graph, CommandError> {
    if !graph.contains_edge(&cmd.edge_id) {
        return Ok(graph.clone());
    }
    Ok(graph.without_edge(&cmd.edge_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Endpoint;
    use pretty_assertions::assert_eq;
    use rationale_graph::{Cred, EdgeId, EdgeKind, Node, NodeId};

    fn base() -> Graph {
        Graph::with_statement("statement", "Topic")
            .with_node(Node::point("p1", "one", Cred::ZERO))
            .with_node(Node::point("p2", "two", Cred::ZERO))
            .with_edge(Edge::statement("e1", "statement", "p1"))
    }

    fn spec(edge_id: &str, source: &str, target: &str, edge_type: EdgeKind) -> EdgeSpec {
        EdgeSpec {
            edge_id: EdgeId::from(edge_id),
            source: NodeId::from(source),
            target: NodeId::from(target),
            edge_type,
        }
    }

    #[test]
    fn add_negation_edge_records_handles() {
        let graph = add_edge(&base(), &spec("e2", "p1", "p2", EdgeKind::Negation)).unwrap();
        let edge = graph.edge(&EdgeId::from("e2")).unwrap();

        assert_eq!(edge.source_handle.as_deref(), Some("p1-source-handle"));
        assert_eq!(edge.target_handle.as_deref(), Some("p2-incoming-handle"));
    }

    #[test]
    fn add_edge_suffixes_taken_id() {
        let graph = add_edge(&base(), &spec("e1", "p1", "p2", EdgeKind::Negation)).unwrap();
        assert!(graph.contains_edge(&EdgeId::from("e1-1")));
        assert_eq!(graph.edge(&EdgeId::from("e1")).unwrap().kind, EdgeKind::Statement);
    }

    #[test]
    fn add_edge_with_missing_endpoint_fails() {
        let err = add_edge(&base(), &spec("e2", "ghost", "p1", EdgeKind::Negation)).unwrap_err();
        assert_eq!(
            err,
            CommandError::MissingNode {
                endpoint: Endpoint::Source,
                node_id: NodeId::from("ghost"),
            }
        );

        let err = add_edge(&base(), &spec("e2", "p1", "ghost", EdgeKind::Negation)).unwrap_err();
        assert_eq!(err, CommandError::missing_target(NodeId::from("ghost")));
    }

    #[test]
    fn update_edge_rewires_in_place() {
        let graph = base().with_edge(Edge::negation("e2", "p1", "p2"));
        let updated = update_edge(&graph, &spec("e2", "statement", "p2", EdgeKind::Statement)).unwrap();

        let edge = updated.edge(&EdgeId::from("e2")).unwrap();
        assert_eq!(edge.kind, EdgeKind::Statement);
        assert_eq!(edge.source.as_str(), "statement");
        assert_eq!(edge.source_handle, None);
        assert_eq!(updated.edge_count(), 2);
    }

    #[test]
    fn update_missing_edge_adds_it() {
        let graph = update_edge(&base(), &spec("e9", "p1", "p2", EdgeKind::Negation)).unwrap();
        assert!(graph.contains_edge(&EdgeId::from("e9")));
    }

    #[test]
    fn update_missing_edge_still_checks_endpoints() {
        let err = update_edge(&base(), &spec("e9", "p1", "ghost", EdgeKind::Negation)).unwrap_err();
        assert_eq!(err, CommandError::missing_target(NodeId::from("ghost")));
    }

    #[test]
    fn delete_edge_keeps_nodes() {
        let graph = delete_edge(
            &base(),
            &EdgeRef {
                edge_id: EdgeId::from("e1"),
            },
        )
        .unwrap();
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn delete_missing_edge_is_noop() {
        let graph = base();
        let after = delete_edge(
            &graph,
            &EdgeRef {
                edge_id: EdgeId::from("nope"),
            },
        )
        .unwrap();
        assert_eq!(after, graph);
    }
}
