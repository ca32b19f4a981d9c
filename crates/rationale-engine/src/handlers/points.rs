//! Point handlers: add, update, delete, set cred

use super::{existing_point, replace_point};
use crate::command::{AddPoint, NodeRef, SetCred, UpdatePoint};
use crate::error::CommandError;
use rationale_graph::{Cred, Graph, Node, PointNode};

/// Append a point under a collision-safe id
///
/// Never fails; the `Result` keeps the handler signature uniform.
///
/// # Errors
/// None
pub fn add_point(graph: &Graph, cmd: &AddPoint) -> Result<Graph, CommandError> {
    let id = graph.allocate_node_id(&cmd.node_id);
    if id != cmd.node_id {
        tracing::debug!(requested = %cmd.node_id, allocated = %id, "node id taken, suffixed");
    }

    let point = PointNode {
        id,
        content: cmd.content.clone(),
        cred: cmd.cred.unwrap_or(Cred::ZERO),
        is_objection: cmd.is_objection.unwrap_or(false),
        objection_target_id: cmd.objection_target_id.clone(),
        objection_context_id: cmd.objection_context_id.clone(),
    };
    Ok(graph.with_node(Node::Point(point)))
}

/// Partially update a point; a missing id is treated as `add_point`
///
/// # Errors
/// [`CommandError::NotAPoint`] if the id names the statement
pub fn update_point(graph: &Graph, cmd: &UpdatePoint) -> Result<Graph, CommandError> {
    let Some(node) = graph.node(&cmd.node_id) else {
        tracing::debug!(node_id = %cmd.node_id, "update_point on missing node, adding instead");
        let add = AddPoint {
            node_id: cmd.node_id.clone(),
            content: cmd.content.clone().unwrap_or_default(),
            cred: cmd.cred,
            is_objection: None,
            objection_target_id: None,
            objection_context_id: None,
        };
        return add_point(graph, &add);
    };

    let Some(point) = node.as_point() else {
        return Err(CommandError::NotAPoint(cmd.node_id.clone()));
    };

    let mut updated = point.clone();
    if let Some(content) = &cmd.content {
        updated.content.clone_from(content);
    }
    if let Some(cred) = cmd.cred {
        updated.cred = cred;
    }
    replace_point(graph, updated)
}

/// Remove a node and every edge touching it; absent ids are a no-op
///
/// # Errors
/// None
pub fn delete_point(graph: &Graph, cmd: &NodeRef) -> Result<Graph, CommandError> {
    if !graph.contains_node(&cmd.node_id) {
        tracing::debug!(node_id = %cmd.node_id, "delete_point on missing node, nothing to do");
        return Ok(graph.clone());
    }
    Ok(graph.without_node(&cmd.node_id))
}

/// Overwrite a point's cred
///
/// # Errors
/// - [`CommandError::NodeNotFound`] if the id is absent
/// - [`CommandError::NotAPoint`] if the id names the statement
pub fn set_cred(graph: &Graph, cmd: &SetCred) -> Result<Graph, CommandError> {
    let mut point = existing_point(graph, &cmd.node_id)?.clone();
    point.cred = cmd.cred;
    replace_point(graph, point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rationale_graph::NodeId;

    fn base() -> Graph {
        Graph::with_statement("statement", "Topic")
            .with_node(Node::point("p1", "original", Cred::new(2.0).unwrap()))
            .with_edge(rationale_graph::Edge::statement("e1", "statement", "p1"))
    }

    fn cred(value: f64) -> Cred {
        Cred::new(value).unwrap()
    }

    #[test]
    fn add_point_defaults() {
        let graph = add_point(&base(), &AddPoint::new("p2", "new")).unwrap();
        let point = graph.point(&NodeId::from("p2")).unwrap();

        assert_eq!(point.cred, Cred::ZERO);
        assert!(!point.is_objection);
        assert_eq!(point.objection_target_id, None);
    }

    #[test]
    fn add_point_suffixes_taken_id() {
        let graph = add_point(&base(), &AddPoint::new("p1", "dup")).unwrap();

        assert_eq!(graph.point(&NodeId::from("p1")).unwrap().content, "original");
        assert_eq!(graph.point(&NodeId::from("p1-1")).unwrap().content, "dup");
    }

    #[test]
    fn update_point_applies_only_present_fields() {
        let cmd = UpdatePoint {
            node_id: NodeId::from("p1"),
            content: None,
            cred: Some(cred(9.0)),
        };
        let graph = update_point(&base(), &cmd).unwrap();
        let point = graph.point(&NodeId::from("p1")).unwrap();

        assert_eq!(point.content, "original");
        assert_eq!(point.cred, cred(9.0));
    }

    #[test]
    fn update_point_on_missing_id_adds_it() {
        let cmd = UpdatePoint {
            node_id: NodeId::from("y"),
            content: Some("C".to_string()),
            cred: None,
        };
        let graph = update_point(&base(), &cmd).unwrap();

        assert_eq!(graph.point(&NodeId::from("y")).unwrap().content, "C");
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn update_point_rejects_statement() {
        let cmd = UpdatePoint {
            node_id: NodeId::from("statement"),
            content: Some("nope".to_string()),
            cred: None,
        };
        assert_eq!(
            update_point(&base(), &cmd),
            Err(CommandError::NotAPoint(NodeId::from("statement")))
        );
    }

    #[test]
    fn delete_point_cascades() {
        let graph = delete_point(
            &base(),
            &NodeRef {
                node_id: NodeId::from("p1"),
            },
        )
        .unwrap();

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn delete_missing_point_is_noop() {
        let graph = base();
        let after = delete_point(
            &graph,
            &NodeRef {
                node_id: NodeId::from("ghost"),
            },
        )
        .unwrap();
        assert_eq!(after, graph);
    }

    #[test]
    fn set_cred_failures() {
        let missing = SetCred {
            node_id: NodeId::from("ghost"),
            cred: cred(1.0),
        };
        assert_eq!(
            set_cred(&base(), &missing),
            Err(CommandError::NodeNotFound(NodeId::from("ghost")))
        );

        let statement = SetCred {
            node_id: NodeId::from("statement"),
            cred: cred(1.0),
        };
        assert_eq!(
            set_cred(&base(), &statement),
            Err(CommandError::NotAPoint(NodeId::from("statement")))
        );
    }

    #[test]
    fn set_cred_overwrites() {
        let cmd = SetCred {
            node_id: NodeId::from("p1"),
            cred: cred(0.5),
        };
        let graph = set_cred(&base(), &cmd).unwrap();
        assert_eq!(graph.point(&NodeId::from("p1")).unwrap().cred, cred(0.5));
    }
}
