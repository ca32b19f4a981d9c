//! Graph snapshots
//!
//! [`Graph`] is an immutable value: every mutator returns a new snapshot that
//! shares structure with the original through persistent vectors.

use crate::edge::{Edge, EdgeKind};
use crate::id::{allocate_id, EdgeId, NodeId};
use crate::node::{Node, PointNode, StatementNode};
use im::Vector;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Rationale graph snapshot
///
/// # Invariants
/// - Node ids are unique among nodes, edge ids unique among edges, provided
///   every insertion goes through [`Graph::allocate_node_id`] /
///   [`Graph::allocate_edge_id`]
///
/// Structural rules (single root, no orphans, ...) are not enforced here;
/// they are checked after the fact by the engine's validator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    nodes: Vector<Node>,

    #[serde(default)]
    edges: Vector<Edge>,
}

impl Graph {
    /// Empty graph (no statement)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph holding only a statement root
    #[must_use]
    pub fn with_statement(id: impl Into<NodeId>, title: impl Into<String>) -> Self {
        Self::new().with_node(Node::statement(id, title))
    }

    /// Build from node and edge lists, in order
    #[must_use]
    pub fn from_parts(
        nodes: impl IntoIterator<Item = Node>,
        edges: impl IntoIterator<Item = Edge>,
    ) -> Self {
        Self {
            nodes: nodes.into_iter().collect(),
            edges: edges.into_iter().collect(),
        }
    }

    /// Nodes in insertion order
    #[inline]
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Edges in insertion order
    #[inline]
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Point nodes in insertion order
    pub fn points(&self) -> impl Iterator<Item = &PointNode> {
        self.nodes.iter().filter_map(Node::as_point)
    }

    /// Statement nodes (a valid graph has exactly one)
    pub fn statements(&self) -> impl Iterator<Item = &StatementNode> {
        self.nodes.iter().filter_map(Node::as_statement)
    }

    /// First statement node
    #[must_use]
    pub fn statement(&self) -> Option<&StatementNode> {
        self.statements().next()
    }

    /// Number of nodes
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Look up node by id
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    /// Look up point by id (`None` for missing ids and the statement)
    #[must_use]
    pub fn point(&self, id: &NodeId) -> Option<&PointNode> {
        self.node(id).and_then(Node::as_point)
    }

    /// Look up edge by id
    #[must_use]
    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|edge| &edge.id == id)
    }

    /// Check if node exists
    #[inline]
    #[must_use]
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Check if edge exists
    #[inline]
    #[must_use]
    pub fn contains_edge(&self, id: &EdgeId) -> bool {
        self.edge(id).is_some()
    }

    /// Edges whose target is `id`
    pub fn incoming_edges<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |edge| &edge.target == id)
    }

    /// Edges whose source is `id`
    pub fn outgoing_edges<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |edge| &edge.source == id)
    }

    /// Points reached directly by a statement edge from the root
    pub fn positions(&self) -> impl Iterator<Item = &PointNode> {
        let root = self.statement().map(|s| s.id.clone());
        self.points().filter(move |point| {
            root.as_ref().is_some_and(|root| {
                self.edges.iter().any(|edge| {
                    edge.kind == EdgeKind::Statement
                        && &edge.source == root
                        && edge.target == point.id
                })
            })
        })
    }

    /// Occupied node ids
    #[must_use]
    pub fn node_ids(&self) -> HashSet<&str> {
        self.nodes.iter().map(|node| node.id().as_str()).collect()
    }

    /// Occupied edge ids
    #[must_use]
    pub fn edge_ids(&self) -> HashSet<&str> {
        self.edges.iter().map(|edge| edge.id.as_str()).collect()
    }

    /// Collision-free node id derived from `desired`
    #[must_use]
    pub fn allocate_node_id(&self, desired: &NodeId) -> NodeId {
        NodeId::new(allocate_id(desired.as_str(), &self.node_ids()))
    }

    /// Collision-free edge id derived from `desired`
    #[must_use]
    pub fn allocate_edge_id(&self, desired: &EdgeId) -> EdgeId {
        EdgeId::new(allocate_id(desired.as_str(), &self.edge_ids()))
    }

    /// New graph with `node` appended
    #[must_use]
    pub fn with_node(&self, node: Node) -> Self {
        let mut next = self.clone();
        next.nodes.push_back(node);
        next
    }

    /// New graph with `edge` appended
    #[must_use]
    pub fn with_edge(&self, edge: Edge) -> Self {
        let mut next = self.clone();
        next.edges.push_back(edge);
        next
    }

    /// New graph with the node of the same id replaced in place
    ///
    /// Returns `None` if no node carries that id.
    #[must_use]
    pub fn replace_node(&self, node: Node) -> Option<Self> {
        let index = self.nodes.iter().position(|n| n.id() == node.id())?;
        let mut next = self.clone();
        next.nodes.set(index, node);
        Some(next)
    }

    /// New graph with the edge of the same id replaced in place
    ///
    /// Returns `None` if no edge carries that id.
    #[must_use]
    pub fn replace_edge(&self, edge: Edge) -> Option<Self> {
        let index = self.edges.iter().position(|e| e.id == edge.id)?;
        let mut next = self.clone();
        next.edges.set(index, edge);
        Some(next)
    }

    /// New graph without the node and every edge touching it
    #[must_use]
    pub fn without_node(&self, id: &NodeId) -> Self {
        let mut next = self.clone();
        next.nodes.retain(|node| node.id() != id);
        next.edges.retain(|edge| !edge.touches(id));
        next
    }

    /// New graph without the edge; nodes are untouched
    #[must_use]
    pub fn without_edge(&self, id: &EdgeId) -> Self {
        let mut next = self.clone();
        next.edges.retain(|edge| &edge.id != id);
        next
    }
}
