//! Property tests for the engine's algebraic laws.
//!
//! Every property starts from a graph produced by an arbitrary command batch
//! over a small, collision-heavy id alphabet, so the graphs under test are
//! as messy as real model output tends to be.

use proptest::prelude::*;
use rationale_engine::{apply_commands, CommandProcessor, EngineConfig, StructuralValidator};
use rationale_graph::{allocate_id, EdgeKind, Graph, NodeId};
use rationale_test_utils::{
    add_point_cmd, arb_batch, debate_graph, delete_point_cmd, ids_are_unique, set_cred_cmd,
    update_point_cmd,
};

fn arb_graph() -> impl Strategy<Value = Graph> {
    arb_batch(24).prop_map(|batch| apply_commands(&debate_graph(), &batch).updated_graph)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Tenet: no batch can ever produce duplicate node or edge ids.
    #[test]
    fn ids_stay_unique(batch in arb_batch(32)) {
        let outcome = apply_commands(&debate_graph(), &batch);
        prop_assert!(ids_are_unique(&outcome.updated_graph));
    }

    /// Tenet: adding a taken id suffixes it and leaves the original alone.
    #[test]
    fn idempotent_id(graph in arb_graph(), pick in any::<prop::sample::Index>()) {
        let ids: Vec<NodeId> = graph.points().map(|p| p.id.clone()).collect();
        prop_assume!(!ids.is_empty());
        let existing = ids[pick.index(ids.len())].clone();
        let before = graph.point(&existing).cloned();

        let expected = allocate_id(existing.as_str(), &graph.node_ids());
        let outcome = apply_commands(&graph, &[add_point_cmd("c1", existing.as_str(), "dup")]);
        let after = &outcome.updated_graph;

        prop_assert_ne!(expected.as_str(), existing.as_str());
        let prefix = format!("{existing}-");
        prop_assert!(expected.starts_with(&prefix));
        prop_assert_eq!(after.point(&NodeId::from(expected.as_str())).map(|p| p.content.as_str()), Some("dup"));
        prop_assert_eq!(after.point(&existing).cloned(), before);
        prop_assert!(outcome.command_failures().is_empty());
    }

    /// Tenet: a graph the validator accepts has no orphans and every
    /// non-position point negates something.
    #[test]
    fn orphan_law(graph in arb_graph()) {
        if !StructuralValidator::new().validate(&graph).is_empty() {
            return Ok(());
        }
        let root = graph.statement().map(|s| s.id.clone()).unwrap();

        for point in graph.points() {
            let incoming: Vec<_> = graph.incoming_edges(&point.id).collect();
            prop_assert!(!incoming.is_empty(), "{} is orphaned", point.id);

            let is_position = incoming
                .iter()
                .any(|e| e.kind == EdgeKind::Statement && e.source == root);
            let negates = incoming.iter().any(|e| e.kind == EdgeKind::Negation);
            prop_assert!(is_position || negates, "{} has no incoming negation", point.id);
        }
    }

    /// Tenet: deleting a point leaves no edge touching it.
    #[test]
    fn cascade_law(graph in arb_graph(), pick in any::<prop::sample::Index>()) {
        let ids: Vec<NodeId> = graph.points().map(|p| p.id.clone()).collect();
        prop_assume!(!ids.is_empty());
        let victim = ids[pick.index(ids.len())].clone();

        let outcome = apply_commands(&graph, &[delete_point_cmd("c1", victim.as_str())]);
        let after = &outcome.updated_graph;

        prop_assert!(!after.contains_node(&victim));
        prop_assert!(after.edges().all(|e| !e.touches(&victim)));
        prop_assert!(outcome.command_failures().is_empty());
    }

    /// Tenet: updating an absent point creates it without a command error.
    #[test]
    fn self_healing_law(graph in arb_graph(), content in "[a-z ]{0,16}") {
        let missing = "fresh-point";
        prop_assume!(!graph.contains_node(&NodeId::from(missing)));

        let processor = CommandProcessor::new(EngineConfig::new().with_validation(false));
        let outcome = processor.apply(&graph, &[update_point_cmd("c1", missing, Some(content.as_str()), None)]);

        prop_assert!(outcome.errors.is_empty());
        prop_assert_eq!(
            outcome.updated_graph.point(&NodeId::from(missing)).map(|p| p.content.clone()),
            Some(content)
        );
    }

    /// Tenet: a failing command changes nothing about its neighbours.
    #[test]
    fn isolation_law(
        before in arb_batch(12),
        after in arb_batch(12),
    ) {
        let failing = set_cred_cmd("boom", "no-such-node", 1.0);

        let mut with_failure = before.clone();
        with_failure.push(failing);
        with_failure.extend(after.iter().cloned());

        let mut without_failure = before;
        without_failure.extend(after);

        let failed = apply_commands(&debate_graph(), &with_failure);
        let clean = apply_commands(&debate_graph(), &without_failure);

        prop_assert_eq!(&failed.updated_graph, &clean.updated_graph);
        prop_assert_eq!(failed.violations(), clean.violations());
        prop_assert_eq!(failed.command_failures().len(), clean.command_failures().len() + 1);
    }
}
