//! Rationale Command Engine
//!
//! Applies batches of model-generated commands to a rationale graph and
//! reports what went wrong, without ever failing the batch as a whole.
//!
//! # Core Operations
//!
//! - **Decode**: Turn untrusted JSON into typed [`GraphCommand`]s
//! - **Dispatch**: Apply commands in order, isolating each failure
//! - **Validate**: Check the resulting topology and annotate the result
//!
//! # Architecture
//!
//! ```text
//! JSON commands → decode_command → CommandProcessor → handlers → Graph'
//!                                        ↓
//!                              StructuralValidator → errors
//! ```
//!
//! # Example
//!
//! ```rust
//! use rationale_engine::CommandProcessor;
//! use rationale_graph::Graph;
//! use serde_json::json;
//!
//! let graph = Graph::with_statement("statement", "Test Topic");
//! let outcome = CommandProcessor::default().apply_json(
//!     &graph,
//!     &[
//!         json!({"id": "c1", "type": "add_point", "nodeId": "p1", "content": "X"}),
//!         json!({"id": "c2", "type": "add_edge", "edgeId": "e1",
//!                "source": "statement", "target": "p1", "edgeType": "statement"}),
//!     ],
//! );
//!
//! assert!(outcome.errors.is_empty());
//! assert_eq!(outcome.updated_graph.node_count(), 2);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod command;
pub mod config;
pub mod error;
pub mod handlers;
pub mod processor;
pub mod validator;

pub use command::{decode_command, decode_commands, remediation_hint, CommandKind, CommandOp, GraphCommand};
pub use config::{EngineConfig, ViolationPolicy};
pub use error::{CommandError, CommandFailure, ConfigError, DecodeError, Endpoint, FailureReason};
pub use processor::{apply_commands, ApplyOutcome, CommandProcessor};
pub use validator::{validate, StructuralValidator, StructuralViolation};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the engine
    pub use crate::command::{
        AddPoint, CommandOp, EdgeRef, EdgeSpec, GraphCommand, MarkObjection, NodeRef, SetCred,
        UpdatePoint, UpdateStatement,
    };
    pub use crate::config::{EngineConfig, ViolationPolicy};
    pub use crate::processor::{apply_commands, ApplyOutcome, CommandProcessor};
    pub use rationale_graph::{Cred, Edge, EdgeId, EdgeKind, Graph, Node, NodeId};
}
