//! Rationale Graph Model
//!
//! Immutable snapshots of a rationale graph: one neutral statement at the
//! root, points branching below it, and negation edges between points.
//!
//! # Core Concepts
//!
//! - [`Graph`]: Persistent (copy-on-write) snapshot of nodes and edges
//! - [`Node`]: Either the root [`StatementNode`] or a [`PointNode`]
//! - [`Edge`]: A statement edge (root to position) or a negation edge
//! - [`NodeId`] / [`EdgeId`]: Opaque identifiers, lenient on the wire
//! - [`allocate_id`]: Deterministic collision-safe identifier suffixing
//!
//! # Example
//!
//! ```rust
//! use rationale_graph::{Cred, Edge, Graph, Node};
//!
//! let graph = Graph::with_statement("statement", "Test Topic");
//! let graph = graph.with_node(Node::point("p1", "X", Cred::ZERO));
//! let graph = graph.with_edge(Edge::statement("e1", "statement", "p1"));
//!
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.positions().count(), 1);
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

mod edge;
mod graph;
mod id;
mod node;

pub use edge::{incoming_handle, source_handle, Edge, EdgeKind};
pub use graph::Graph;
pub use id::{allocate_id, EdgeId, IdSet, NodeId};
pub use node::{Cred, GraphError, Node, PointNode, StatementNode};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
