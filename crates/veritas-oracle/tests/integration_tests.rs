//! Integration tests for veritas-oracle

use proptest::prelude::*;
use veritas_oracle::{ConsistencyOracle, OracleConfig};

#[test]
fn test_research_log_consistency() {
    let oracle = ConsistencyOracle::default();
    let log = [
        "Connection pooling reduces latency",
        "Larger batches increase throughput",
        "If retries are enabled, error rates decrease",
        "Compression lowers bandwidth usage",
    ];
    assert!(oracle.check_consistency(&log));

    let mut contradicted = log.to_vec();
    contradicted.push("Larger batches decrease throughput");
    assert!(!oracle.check_consistency(&contradicted));
}

#[test]
fn test_config_from_toml_drives_oracle() {
    let config = OracleConfig::from_toml("min_shared_subject_terms = 2").unwrap();
    let oracle = ConsistencyOracle::new(config);
    assert!(oracle.check_consistency(&["Heat increases pressure", "Heat lowers pressure"]));
}

proptest! {
    /// Property: a statement never conflicts with itself
    #[test]
    fn test_statement_consistent_with_itself(text in "[a-z ]{0,40}") {
        let oracle = ConsistencyOracle::default();
        prop_assert!(!oracle.conflicts_with(&text, &text));
    }

    /// Property: conflict detection is symmetric
    #[test]
    fn test_conflicts_symmetric(a in "(not )?[a-d]{1,3} (increases|decreases|grows) [a-d]{1,3}",
                                b in "(not )?[a-d]{1,3} (increases|decreases|grows) [a-d]{1,3}") {
        let oracle = ConsistencyOracle::default();
        prop_assert_eq!(oracle.conflicts_with(&a, &b), oracle.conflicts_with(&b, &a));
    }

    /// Property: a non-empty statement entails itself
    #[test]
    fn test_inference_reflexive(text in "[a-z]{3,8} (increases|reduces) [a-z]{3,8}") {
        let oracle = ConsistencyOracle::default();
        prop_assert!(oracle.validate_inference(&text, &text));
    }

    /// Property: the oracle never panics on arbitrary input
    #[test]
    fn test_never_panics(a in ".*", b in ".*") {
        let oracle = ConsistencyOracle::default();
        let _ = oracle.check_consistency(&[a.as_str(), b.as_str()]);
        let _ = oracle.validate_inference(&a, &b);
        let _ = oracle.derive_implications(&a);
    }
}
