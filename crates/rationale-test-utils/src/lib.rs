//! Testing utilities for the rationale workspace
//!
//! Shared fixtures, command builders, and proptest strategies.

#![allow(missing_docs)]

use proptest::prelude::*;
use rationale_engine::command::{
    AddPoint, CommandOp, EdgeRef, EdgeSpec, GraphCommand, MarkObjection, NodeRef, SetCred,
    UpdatePoint, UpdateStatement,
};
use rationale_graph::{Cred, Edge, EdgeId, EdgeKind, Graph, Node, NodeId};
use serde_json::{json, Value};

pub const STATEMENT_ID: &str = "statement";

pub fn cred(value: f64) -> Cred {
    Cred::new(value).unwrap()
}

/// Graph holding only the statement node
pub fn statement_only(title: &str) -> Graph {
    Graph::with_statement(STATEMENT_ID, title)
}

/// Valid two-branch debate:
///
/// ```text
/// statement ─► a ─╳► a1 ─╳► a2
///           └► b ─╳► b1
/// ```
pub fn debate_graph() -> Graph {
    Graph::from_parts(
        [
            Node::statement(STATEMENT_ID, "Should cities ban cars?"),
            Node::point("a", "Yes, cars pollute", cred(3.0)),
            Node::point("b", "No, people need mobility", cred(2.0)),
            Node::point("a1", "EVs do not pollute locally", cred(1.0)),
            Node::point("a2", "Tyre wear still pollutes", Cred::ZERO),
            Node::point("b1", "Transit provides mobility", cred(4.0)),
        ],
        [
            Edge::statement("s-a", STATEMENT_ID, "a"),
            Edge::statement("s-b", STATEMENT_ID, "b"),
            Edge::negation("n-a1", "a", "a1"),
            Edge::negation("n-a2", "a1", "a2"),
            Edge::negation("n-b1", "b", "b1"),
        ],
    )
}

pub fn add_point_cmd(id: &str, node_id: &str, content: &str) -> GraphCommand {
    GraphCommand::new(id, CommandOp::AddPoint(AddPoint::new(node_id, content)))
}

pub fn add_point_with_cred_cmd(id: &str, node_id: &str, content: &str, value: f64) -> GraphCommand {
    GraphCommand::new(
        id,
        CommandOp::AddPoint(AddPoint::new(node_id, content).with_cred(cred(value))),
    )
}

pub fn update_point_cmd(
    id: &str,
    node_id: &str,
    content: Option<&str>,
    cred: Option<Cred>,
) -> GraphCommand {
    GraphCommand::new(
        id,
        CommandOp::UpdatePoint(UpdatePoint {
            node_id: NodeId::from(node_id),
            content: content.map(str::to_string),
            cred,
        }),
    )
}

pub fn delete_point_cmd(id: &str, node_id: &str) -> GraphCommand {
    GraphCommand::new(
        id,
        CommandOp::DeletePoint(NodeRef {
            node_id: NodeId::from(node_id),
        }),
    )
}

fn edge_spec(edge_id: &str, source: &str, target: &str, kind: EdgeKind) -> EdgeSpec {
    EdgeSpec {
        edge_id: EdgeId::from(edge_id),
        source: NodeId::from(source),
        target: NodeId::from(target),
        edge_type: kind,
    }
}

pub fn add_edge_cmd(id: &str, edge_id: &str, source: &str, target: &str, kind: EdgeKind) -> GraphCommand {
    GraphCommand::new(id, CommandOp::AddEdge(edge_spec(edge_id, source, target, kind)))
}

pub fn update_edge_cmd(
    id: &str,
    edge_id: &str,
    source: &str,
    target: &str,
    kind: EdgeKind,
) -> GraphCommand {
    GraphCommand::new(id, CommandOp::UpdateEdge(edge_spec(edge_id, source, target, kind)))
}

pub fn delete_edge_cmd(id: &str, edge_id: &str) -> GraphCommand {
    GraphCommand::new(
        id,
        CommandOp::DeleteEdge(EdgeRef {
            edge_id: EdgeId::from(edge_id),
        }),
    )
}

pub fn update_statement_cmd(id: &str, statement: &str) -> GraphCommand {
    GraphCommand::new(
        id,
        CommandOp::UpdateStatement(UpdateStatement {
            statement: statement.to_string(),
        }),
    )
}

pub fn set_cred_cmd(id: &str, node_id: &str, value: f64) -> GraphCommand {
    GraphCommand::new(
        id,
        CommandOp::SetCred(SetCred {
            node_id: NodeId::from(node_id),
            cred: cred(value),
        }),
    )
}

pub fn mark_objection_cmd(
    id: &str,
    node_id: &str,
    target: Option<&str>,
    context: Option<&str>,
) -> GraphCommand {
    GraphCommand::new(
        id,
        CommandOp::MarkObjection(MarkObjection {
            node_id: NodeId::from(node_id),
            objection_target_id: target.map(NodeId::from),
            objection_context_id: context.map(NodeId::from),
        }),
    )
}

pub fn unmark_objection_cmd(id: &str, node_id: &str) -> GraphCommand {
    GraphCommand::new(
        id,
        CommandOp::UnmarkObjection(NodeRef {
            node_id: NodeId::from(node_id),
        }),
    )
}

/// Raw JSON form of a typed batch, as a model would emit it
pub fn to_json_batch(commands: &[GraphCommand]) -> Vec<Value> {
    commands
        .iter()
        .map(|cmd| serde_json::to_value(cmd).unwrap())
        .collect()
}

/// JSON command with an arbitrary `type`, for unknown-kind tests
pub fn raw_command(id: &str, kind: &str) -> Value {
    json!({ "id": id, "type": kind })
}

/// Small id alphabet so generated commands collide often
pub fn arb_node_id() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(STATEMENT_ID.to_string()),
        "p[0-4]",
        "p[0-4]-1",
    ]
}

pub fn arb_edge_id() -> impl Strategy<Value = String> {
    "e[0-4]"
}

pub fn arb_edge_kind() -> impl Strategy<Value = EdgeKind> {
    prop_oneof![Just(EdgeKind::Statement), Just(EdgeKind::Negation)]
}

pub fn arb_cred() -> impl Strategy<Value = f64> {
    0.0..100.0f64
}

/// Any typed command over the small id alphabet
pub fn arb_command() -> impl Strategy<Value = GraphCommand> {
    let id = "c[0-9]{1,3}";
    prop_oneof![
        (id, arb_node_id(), "[a-z ]{0,12}")
            .prop_map(|(id, node, content)| add_point_cmd(&id, &node, &content)),
        (id, arb_node_id(), proptest::option::of("[a-z]{0,8}"), proptest::option::of(arb_cred()))
            .prop_map(|(id, node, content, value)| {
                update_point_cmd(&id, &node, content.as_deref(), value.map(cred))
            }),
        (id, arb_node_id()).prop_map(|(id, node)| delete_point_cmd(&id, &node)),
        (id, arb_edge_id(), arb_node_id(), arb_node_id(), arb_edge_kind())
            .prop_map(|(id, edge, s, t, k)| add_edge_cmd(&id, &edge, &s, &t, k)),
        (id, arb_edge_id(), arb_node_id(), arb_node_id(), arb_edge_kind())
            .prop_map(|(id, edge, s, t, k)| update_edge_cmd(&id, &edge, &s, &t, k)),
        (id, arb_edge_id()).prop_map(|(id, edge)| delete_edge_cmd(&id, &edge)),
        (id, "[A-Za-z ]{1,16}").prop_map(|(id, title)| update_statement_cmd(&id, &title)),
        (id, arb_node_id(), arb_cred()).prop_map(|(id, node, value)| set_cred_cmd(&id, &node, value)),
        (id, arb_node_id(), proptest::option::of(arb_node_id()), proptest::option::of(arb_node_id()))
            .prop_map(|(id, node, t, c)| mark_objection_cmd(&id, &node, t.as_deref(), c.as_deref())),
        (id, arb_node_id()).prop_map(|(id, node)| unmark_objection_cmd(&id, &node)),
    ]
}

pub fn arb_batch(max_len: usize) -> impl Strategy<Value = Vec<GraphCommand>> {
    proptest::collection::vec(arb_command(), 0..max_len)
}

/// Check the invariant that no two nodes (or two edges) share an id
pub fn ids_are_unique(graph: &Graph) -> bool {
    graph.node_ids().len() == graph.node_count() && graph.edge_ids().len() == graph.edge_count()
}
