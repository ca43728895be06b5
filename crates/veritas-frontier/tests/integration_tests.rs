//! Integration tests for veritas-frontier
//!
//! These tests feed generated candidates back into a store, the way an
//! orchestrator would.

use proptest::prelude::*;
use veritas_domain::{EntityId, Hypothesis, KnowledgeStore};
use veritas_frontier::FrontierEstimator;
use veritas_store::InMemoryStore;

fn hypothesis(id: &str, a: &str, rel: &str, b: &str) -> Hypothesis {
    Hypothesis::new(EntityId::new(id), format!("{} {} {}", a, rel, b), "d")
        .with_variable("cause", a)
        .with_variable("effect", b)
        .with_relationship(rel)
}

#[test]
fn test_frontier_never_repeats_existing_statements() {
    let mut store = InMemoryStore::default();
    store.admit_hypothesis(hypothesis("h1", "a", "affects", "b")).unwrap();
    store.admit_hypothesis(hypothesis("h2", "b", "affects", "c")).unwrap();
    // Same statement text as a candidate would render, under different variables.
    let mut decoy = hypothesis("h3", "x", "affects", "y");
    decoy.statement = "A affects C".to_string();
    store.admit_hypothesis(decoy).unwrap();

    let estimator = FrontierEstimator::default();
    let existing: Vec<String> = store
        .query_hypotheses(&Default::default())
        .unwrap()
        .iter()
        .map(|h| h.normalized_statement())
        .collect();

    for candidate in estimator.generate_frontier(&store, "d", 100).unwrap() {
        assert!(!existing.contains(&candidate.normalized_statement()));
    }
}

#[test]
fn test_admitting_candidates_drains_the_frontier() {
    let mut store = InMemoryStore::default();
    store.admit_hypothesis(hypothesis("h1", "a", "affects", "b")).unwrap();
    store.admit_hypothesis(hypothesis("h2", "c", "affects", "d")).unwrap();
    let estimator = FrontierEstimator::default();

    let mut rounds = 0;
    loop {
        let batch = estimator.generate_frontier(&store, "d", 2).unwrap();
        if batch.is_empty() {
            break;
        }
        for candidate in batch {
            store.admit_hypothesis(candidate).unwrap();
        }
        rounds += 1;
        assert!(rounds < 10, "frontier should drain");
    }

    // 6 concept pairs x 1 relationship, all now explored.
    assert_eq!(store.hypothesis_count(), 6);
    let snapshot = estimator.map_coverage(&store, "d").unwrap();
    assert_eq!(snapshot.total_estimated, 16);
}

proptest! {
    /// Property: coverage stays in [0, 1] and never drops while hypotheses
    /// over a fixed concept set are admitted
    #[test]
    fn test_coverage_bounded_and_monotone(n in 1usize..30) {
        let mut store = InMemoryStore::default();
        let estimator = FrontierEstimator::default();
        let mut previous = 0.0;

        for i in 0..n {
            let (a, b) = if i % 2 == 0 { ("p", "q") } else { ("q", "p") };
            store.admit_hypothesis(hypothesis(&format!("h{}", i), a, "affects", b)).unwrap();

            let snapshot = estimator.map_coverage(&store, "d").unwrap();
            prop_assert!(snapshot.coverage >= 0.0 && snapshot.coverage <= 1.0);
            prop_assert!(snapshot.coverage >= previous);
            previous = snapshot.coverage;
        }
    }
}
