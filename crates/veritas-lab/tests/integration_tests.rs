//! Integration tests for veritas-lab
//!
//! These tests run whole research cycles against an on-disk ledger, the
//! way an orchestrator would drive a lab.

use std::sync::Arc;
use tempfile::TempDir;
use veritas_domain::{
    EntityId, Evidence, EvidenceDirection, Experiment, Hypothesis, HypothesisQuery,
    HypothesisStatus, Payload, StrengthCategory, Theory,
};
use veritas_lab::{Lab, LabConfig, LabError};
use veritas_store::{StoreConfig, StoreError};

fn disk_config(dir: &TempDir) -> LabConfig {
    let path = dir.path().join("lab.db").to_string_lossy().to_string();
    LabConfig {
        store: StoreConfig::lenient(),
        ..Default::default()
    }
    .with_ledger_path(path)
}

fn hypothesis(id: &str, cause: &str, rel: &str, effect: &str) -> Hypothesis {
    Hypothesis::new(EntityId::new(id), format!("{} {} {}", cause, rel, effect), "perf")
        .with_variable("cause", cause)
        .with_variable("effect", effect)
        .with_relationship(rel)
}

#[test]
fn test_research_cycle_on_disk() {
    let dir = TempDir::new().unwrap();
    let lab = Lab::open(disk_config(&dir)).unwrap();

    let h = lab
        .admit_hypothesis(hypothesis("h1", "pooling", "reduces", "latency"))
        .unwrap();
    let e = lab
        .record_experiment(
            Experiment::new(EntityId::new("e1"), h.clone(), 120)
                .with_condition("pooled")
                .with_measurement("p99_ms"),
        )
        .unwrap();

    lab.transition_status(&h, HypothesisStatus::Testing).unwrap();
    lab.record_results(&e, Payload::from(-38.5), None).unwrap();

    let evidence = Evidence::new(EntityId::new("ev1"), h.clone(), e.as_str())
        .with_strength(StrengthCategory::Decisive)
        .with_quality(0.9, 0.9);
    lab.attach_evidence(evidence, EvidenceDirection::Supporting).unwrap();

    lab.transition_status(&h, HypothesisStatus::Supported).unwrap();
    lab.transition_status(&h, HypothesisStatus::WellSupported).unwrap();

    lab.record_theory(
        Theory::new(EntityId::new("t1"), "Resource reuse")
            .with_principle("reuse amortizes setup cost")
            .with_hypothesis(h.clone())
            .with_evidence(EntityId::new("ev1")),
    )
    .unwrap();

    // admit, experiment, testing, results, evidence, supported, well-supported, theory
    let report = lab.verify_report().unwrap();
    assert!(report.valid);
    assert_eq!(report.total_blocks, 8);

    let stored = lab.hypothesis(&h).unwrap().unwrap();
    assert_eq!(stored.status, HypothesisStatus::WellSupported);
    assert!(lab.experiment(&e).unwrap().unwrap().is_executed());
}

#[test]
fn test_rejections_leave_no_trace() {
    let dir = TempDir::new().unwrap();
    let lab = Lab::open(disk_config(&dir)).unwrap();
    let h = lab
        .admit_hypothesis(hypothesis("h1", "pooling", "reduces", "latency"))
        .unwrap();

    let err = lab
        .transition_status(&h, HypothesisStatus::Supported)
        .unwrap_err();
    assert!(matches!(err, LabError::Store(StoreError::IllegalTransition { .. })));

    let err = lab
        .record_experiment(Experiment::new(EntityId::new("e1"), EntityId::new("nope"), 10))
        .unwrap_err();
    assert!(matches!(err, LabError::Store(StoreError::UnknownHypothesis(_))));

    let contrary = Hypothesis::new(EntityId::new("h2"), "pooling does not reduce latency", "perf")
        .with_variable("cause", "pooling")
        .with_relationship("reduces");
    assert!(matches!(
        lab.admit_hypothesis(contrary),
        Err(LabError::Inconsistent { .. })
    ));

    assert_eq!(lab.ledger().len().unwrap(), 1);
    assert_eq!(
        lab.hypothesis(&h).unwrap().unwrap().status,
        HypothesisStatus::Proposed
    );
}

#[test]
fn test_reopened_ledger_continues_the_chain() {
    let dir = TempDir::new().unwrap();
    let config = disk_config(&dir);

    {
        let lab = Lab::open(config.clone()).unwrap();
        lab.admit_hypothesis(hypothesis("h1", "pooling", "reduces", "latency"))
            .unwrap();
        lab.record_event(&("session_closed", 1)).unwrap();
    }

    // The knowledge store is in-memory; only the ledger survives.
    let lab = Lab::open(config).unwrap();
    assert!(lab.hypothesis(&EntityId::new("h1")).unwrap().is_none());

    lab.admit_hypothesis(hypothesis("h1", "pooling", "reduces", "latency"))
        .unwrap();
    assert_eq!(lab.ledger().len().unwrap(), 3);
    assert!(lab.verify_chain());
    assert_eq!(lab.provenance(2).unwrap().len(), 3);
}

#[test]
fn test_frontier_candidates_feed_back() {
    let lab = Lab::in_memory(LabConfig::default()).unwrap();
    lab.admit_hypothesis(hypothesis("h1", "a", "affects", "b")).unwrap();
    lab.admit_hypothesis(hypothesis("h2", "c", "affects", "d")).unwrap();

    let before = lab.coverage("perf").unwrap();
    assert_eq!(before.total_estimated, 16);

    let candidates = lab.generate_frontier("perf", 3).unwrap();
    assert_eq!(candidates.len(), 3);
    for candidate in candidates {
        lab.admit_hypothesis(candidate).unwrap();
    }

    let after = lab.coverage("perf").unwrap();
    assert_eq!(after.explored_count, 5);
    assert!(after.coverage > before.coverage);
    assert!(!lab.high_value_regions("perf").unwrap().is_empty());
}

#[test]
fn test_concurrent_admissions() {
    let lab = Arc::new(Lab::in_memory(LabConfig::default()).unwrap());

    std::thread::scope(|scope| {
        for t in 0..4 {
            let lab = Arc::clone(&lab);
            scope.spawn(move || {
                for i in 0..10 {
                    let id = format!("h{}_{}", t, i);
                    let h = hypothesis(&id, &format!("c{}", i), "affects", &format!("t{}", t));
                    lab.admit_hypothesis(h).unwrap();
                }
            });
        }
    });

    let all = lab.query_hypotheses(&HypothesisQuery::default()).unwrap();
    assert_eq!(all.len(), 40);
    assert_eq!(lab.ledger().len().unwrap(), 40);
    assert!(lab.verify_chain());
}

#[tokio::test]
async fn test_auditor_worker_over_lab_ledger() {
    let lab = Lab::in_memory(LabConfig::default()).unwrap();
    lab.admit_hypothesis(hypothesis("h1", "pooling", "reduces", "latency"))
        .unwrap();

    let mut worker = lab.auditor_worker().unwrap();
    worker.run_cycles(1).await.unwrap();
    assert_eq!(worker.metrics().passed, 1);
    assert_eq!(worker.metrics().last_chain_length, 1);

    let mut auditor = lab.auditor();
    assert!(auditor.audit().unwrap().valid);
}
