//! Structural validation
//!
//! Scans a finished graph for topology violations. Findings are advisory:
//! they annotate the result, they never block it.
//!
//! # Rules
//! 1. Exactly one statement node (checked first; nothing else is checked
//!    without it)
//! 2. Every point has at least one incoming edge
//! 3. Every point that is not a position has an incoming negation edge
//! 4. Statement edges leave the statement and reach a point; negation edges
//!    join two points; no edge references a missing node

use indexmap::IndexMap;
use rationale_graph::{Edge, EdgeId, EdgeKind, Graph, Node, NodeId};

/// One structural rule broken by a graph
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructuralViolation {
    /// No statement node at all
    #[error("graph has no statement node")]
    MissingStatement,

    /// More than one statement node
    #[error("graph has {count} statement nodes; exactly one is required")]
    MultipleStatements {
        /// Number of statement nodes found
        count: usize,
    },

    /// Edge endpoint does not exist
    #[error("edge '{edge_id}' references missing node '{node_id}'")]
    DanglingEdge {
        /// Offending edge
        edge_id: EdgeId,
        /// Unresolved endpoint
        node_id: NodeId,
    },

    /// Statement edge that does not leave the statement node
    #[error("statement edge '{edge_id}' must originate at the statement node, not '{source_id}'")]
    StatementEdgeNotFromRoot {
        /// Offending edge
        edge_id: EdgeId,
        /// Actual source
        source_id: NodeId,
    },

    /// Statement edge whose target is not a point
    #[error("statement edge '{edge_id}' must target a point, not '{target_id}'")]
    StatementEdgeTargetNotPoint {
        /// Offending edge
        edge_id: EdgeId,
        /// Actual target
        target_id: NodeId,
    },

    /// Negation edge with the statement at either end
    #[error("negation edge '{edge_id}' touches statement node '{node_id}'; negation edges must join two points")]
    NegationTouchesStatement {
        /// Offending edge
        edge_id: EdgeId,
        /// The statement endpoint
        node_id: NodeId,
    },

    /// Point with no incoming edge
    #[error("point '{0}' is orphaned: it has no incoming edge")]
    OrphanedPoint(NodeId),

    /// Non-position point with no incoming negation edge
    #[error("point '{0}' is not a position and has no incoming negation edge")]
    MissingNegation(NodeId),
}

/// Incoming-edge summary for one point
#[derive(Debug, Default, Clone, Copy)]
struct Incoming {
    any: bool,
    negation: bool,
    position: bool,
}

/// Post-batch structural validator
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator;

impl StructuralValidator {
    /// Create validator
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Collect every violation, in deterministic order
    ///
    /// Root check first, then edges in graph order, then points in graph
    /// order.
    #[must_use]
    pub fn validate(&self, graph: &Graph) -> Vec<StructuralViolation> {
        let statements: Vec<&NodeId> = graph.statements().map(|s| &s.id).collect();
        let root = match statements.as_slice() {
            [] => return vec![StructuralViolation::MissingStatement],
            [root] => *root,
            many => {
                return vec![StructuralViolation::MultipleStatements { count: many.len() }];
            }
        };

        let mut violations = Vec::new();
        let mut incoming: IndexMap<&NodeId, Incoming> = graph
            .points()
            .map(|point| (&point.id, Incoming::default()))
            .collect();

        for edge in graph.edges() {
            violations.extend(Self::check_edge(graph, root, edge));

            if let Some(summary) = incoming.get_mut(&edge.target) {
                summary.any = true;
                match edge.kind {
                    EdgeKind::Negation => summary.negation = true,
                    EdgeKind::Statement if &edge.source == root => summary.position = true,
                    EdgeKind::Statement => {}
                }
            }
        }

        for (id, summary) in incoming {
            if !summary.any {
                violations.push(StructuralViolation::OrphanedPoint(id.clone()));
            } else if !summary.position && !summary.negation {
                violations.push(StructuralViolation::MissingNegation(id.clone()));
            }
        }

        violations
    }

    fn check_edge(graph: &Graph, root: &NodeId, edge: &Edge) -> Vec<StructuralViolation> {
        let source = graph.node(&edge.source);
        let target = graph.node(&edge.target);

        let mut found = Vec::new();
        if source.is_none() {
            found.push(StructuralViolation::DanglingEdge {
                edge_id: edge.id.clone(),
                node_id: edge.source.clone(),
            });
        }
        if target.is_none() {
            found.push(StructuralViolation::DanglingEdge {
                edge_id: edge.id.clone(),
                node_id: edge.target.clone(),
            });
        }
        if !found.is_empty() {
            return found;
        }

        match edge.kind {
            EdgeKind::Statement => {
                if &edge.source != root {
                    found.push(StructuralViolation::StatementEdgeNotFromRoot {
                        edge_id: edge.id.clone(),
                        source_id: edge.source.clone(),
                    });
                }
                if target.is_some_and(Node::is_statement) {
                    found.push(StructuralViolation::StatementEdgeTargetNotPoint {
                        edge_id: edge.id.clone(),
                        target_id: edge.target.clone(),
                    });
                }
            }
            EdgeKind::Negation => {
                for (node, id) in [(source, &edge.source), (target, &edge.target)] {
                    if node.is_some_and(Node::is_statement) {
                        found.push(StructuralViolation::NegationTouchesStatement {
                            edge_id: edge.id.clone(),
                            node_id: id.clone(),
                        });
                    }
                }
            }
        }
        found
    }
}

/// Validate a graph, rendering each violation as a message
#[must_use]
pub fn validate(graph: &Graph) -> Vec<String> {
    StructuralValidator::new()
        .validate(graph)
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rationale_graph::Cred;

    fn point(id: &str) -> Node {
        Node::point(id, id, Cred::ZERO)
    }

    #[test]
    fn valid_graph_has_no_violations() {
        let graph = Graph::with_statement("statement", "Topic")
            .with_node(point("p1"))
            .with_node(point("p2"))
            .with_node(point("p3"))
            .with_edge(Edge::statement("e1", "statement", "p1"))
            .with_edge(Edge::negation("e2", "p1", "p2"))
            .with_edge(Edge::negation("e3", "p2", "p3"))
            .with_edge(Edge::negation("e4", "p1", "p3"));

        assert!(StructuralValidator::new().validate(&graph).is_empty());
    }

    #[test]
    fn single_orphan_is_reported_once() {
        let graph = Graph::with_statement("statement", "Test Topic").with_node(point("p1"));
        let errors = validate(&graph);

        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("'p1'"));
        assert!(errors[0].contains("orphaned"));
    }

    #[test]
    fn missing_statement_halts_checking() {
        let graph = Graph::new()
            .with_node(point("p1"))
            .with_edge(Edge::negation("e1", "ghost", "p1"));

        assert_eq!(
            StructuralValidator::new().validate(&graph),
            vec![StructuralViolation::MissingStatement]
        );
    }

    #[test]
    fn multiple_statements_halt_checking() {
        let graph = Graph::with_statement("s1", "A")
            .with_node(Node::statement("s2", "B"))
            .with_node(point("p1"));

        assert_eq!(
            StructuralValidator::new().validate(&graph),
            vec![StructuralViolation::MultipleStatements { count: 2 }]
        );
    }

    #[test]
    fn statement_edge_from_a_point_is_not_a_position() {
        let graph = Graph::with_statement("statement", "Topic")
            .with_node(point("p1"))
            .with_node(point("p2"))
            .with_edge(Edge::statement("e1", "statement", "p1"))
            .with_edge(Edge::statement("e2", "p1", "p2"));

        assert_eq!(
            StructuralValidator::new().validate(&graph),
            vec![
                StructuralViolation::StatementEdgeNotFromRoot {
                    edge_id: EdgeId::from("e2"),
                    source_id: NodeId::from("p1"),
                },
                StructuralViolation::MissingNegation(NodeId::from("p2")),
            ]
        );
    }

    #[test]
    fn negation_into_statement_is_reported() {
        let graph = Graph::with_statement("statement", "Topic")
            .with_node(point("p1"))
            .with_edge(Edge::statement("e1", "statement", "p1"))
            .with_edge(Edge::negation("e2", "p1", "statement"));

        assert_eq!(
            StructuralValidator::new().validate(&graph),
            vec![StructuralViolation::NegationTouchesStatement {
                edge_id: EdgeId::from("e2"),
                node_id: NodeId::from("statement"),
            }]
        );
    }

    #[test]
    fn dangling_edge_is_reported() {
        let graph = Graph::with_statement("statement", "Topic")
            .with_node(point("p1"))
            .with_edge(Edge::statement("e1", "statement", "p1"))
            .with_edge(Edge::negation("e2", "p1", "gone"));

        assert_eq!(
            StructuralValidator::new().validate(&graph),
            vec![StructuralViolation::DanglingEdge {
                edge_id: EdgeId::from("e2"),
                node_id: NodeId::from("gone"),
            }]
        );
    }

    #[test]
    fn cross_branch_negation_is_legal() {
        let graph = Graph::with_statement("statement", "Topic")
            .with_node(point("a"))
            .with_node(point("b"))
            .with_node(point("c"))
            .with_edge(Edge::statement("e1", "statement", "a"))
            .with_edge(Edge::statement("e2", "statement", "b"))
            .with_edge(Edge::negation("e3", "a", "c"))
            .with_edge(Edge::negation("e4", "b", "c"))
            .with_edge(Edge::negation("e5", "c", "b"));

        assert!(validate(&graph).is_empty());
    }

    #[test]
    fn one_message_per_offending_point() {
        let graph = Graph::with_statement("statement", "Topic")
            .with_node(point("p1"))
            .with_node(point("p2"))
            .with_node(point("p3"));

        let errors = validate(&graph);
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|e| e.contains("orphaned")));
    }
}
