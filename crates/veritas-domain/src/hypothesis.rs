//! Hypothesis - the fundamental unit tracked by Veritas

use crate::{in_unit_range, now_millis, EntityId, HypothesisStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The four scores attached to every hypothesis, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    /// Current belief that the hypothesis holds
    pub confidence: f64,
    /// How intricate the claimed mechanism is
    pub complexity: f64,
    /// How far the claim departs from existing knowledge
    pub novelty: f64,
    /// How readily the claim can be put to an experiment
    pub testability: f64,
}

impl Scores {
    /// Create scores, clamping each into [0, 1]
    ///
    /// NaN inputs become 0.0.
    ///
    /// # Examples
    ///
    /// ```
    /// use veritas_domain::Scores;
    ///
    /// let s = Scores::new(1.4, -0.2, 0.5, 0.9);
    /// assert_eq!(s.confidence, 1.0);
    /// assert_eq!(s.complexity, 0.0);
    /// ```
    pub fn new(confidence: f64, complexity: f64, novelty: f64, testability: f64) -> Self {
        Self {
            confidence: clamp_unit(confidence),
            complexity: clamp_unit(complexity),
            novelty: clamp_unit(novelty),
            testability: clamp_unit(testability),
        }
    }

    /// Whether every score lies in [0, 1]
    ///
    /// Fields are public, so a struct literal can bypass the clamping in `new`.
    pub fn is_valid(&self) -> bool {
        [self.confidence, self.complexity, self.novelty, self.testability]
            .iter()
            .all(|s| in_unit_range(*s))
    }
}

impl Default for Scores {
    fn default() -> Self {
        Self::new(0.5, 0.5, 0.5, 0.5)
    }
}

pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// A testable claim with scored attributes and a lifecycle status
///
/// The store sets `status` to `PROPOSED` on admission and owns it from then
/// on. Evidence is referenced by id, never owned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    /// Unique, immutable identifier
    pub id: EntityId,

    /// Natural-language claim
    pub statement: String,

    /// Named variables and their values (keys unique)
    pub variables: BTreeMap<String, String>,

    /// Relationship labels, in the order given
    pub relationships: Vec<String>,

    /// Research domain tag
    pub domain: String,

    /// Creation time (milliseconds since Unix epoch)
    pub created_at: u64,

    /// Confidence, complexity, novelty, testability
    pub scores: Scores,

    /// Lifecycle status
    pub status: HypothesisStatus,

    /// Evidence ids supporting the claim
    pub supporting_evidence: Vec<EntityId>,

    /// Evidence ids disconfirming the claim
    pub disconfirming_evidence: Vec<EntityId>,
}

impl Hypothesis {
    /// Create a new hypothesis with default scores and no variables
    pub fn new(id: EntityId, statement: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            id,
            statement: statement.into(),
            variables: BTreeMap::new(),
            relationships: Vec::new(),
            domain: domain.into(),
            created_at: now_millis(),
            scores: Scores::default(),
            status: HypothesisStatus::Proposed,
            supporting_evidence: Vec::new(),
            disconfirming_evidence: Vec::new(),
        }
    }

    /// Add a named variable
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Add a relationship label
    pub fn with_relationship(mut self, label: impl Into<String>) -> Self {
        self.relationships.push(label.into());
        self
    }

    /// Replace the scores
    pub fn with_scores(mut self, scores: Scores) -> Self {
        self.scores = scores;
        self
    }

    /// Override the creation timestamp
    pub fn with_created_at(mut self, created_at: u64) -> Self {
        self.created_at = created_at;
        self
    }

    /// Statement normalized for verbatim comparison (trimmed, lowercase)
    pub fn normalized_statement(&self) -> String {
        normalize_statement(&self.statement)
    }
}

/// Normalize a statement for verbatim comparison
pub fn normalize_statement(statement: &str) -> String {
    statement.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let h = Hypothesis::new(EntityId::new("h1"), "A affects B", "d")
            .with_variable("cause", "A")
            .with_variable("effect", "B")
            .with_relationship("affects");

        assert_eq!(h.variables.len(), 2);
        assert_eq!(h.relationships, vec!["affects".to_string()]);
        assert_eq!(h.status, HypothesisStatus::Proposed);
        assert!(h.supporting_evidence.is_empty());
    }

    #[test]
    fn test_variable_keys_unique() {
        let h = Hypothesis::new(EntityId::new("h1"), "s", "d")
            .with_variable("x", "1")
            .with_variable("x", "2");
        assert_eq!(h.variables.len(), 1);
        assert_eq!(h.variables["x"], "2");
    }

    #[test]
    fn test_scores_nan_clamps_to_zero() {
        let s = Scores::new(f64::NAN, 0.5, 0.5, 0.5);
        assert_eq!(s.confidence, 0.0);
        assert!(s.is_valid());
    }

    #[test]
    fn test_struct_literal_scores_can_be_invalid() {
        let s = Scores { confidence: 1.5, ..Scores::default() };
        assert!(!s.is_valid());
    }

    #[test]
    fn test_normalized_statement() {
        assert_eq!(normalize_statement("  Heat   Affects Rate "), "heat affects rate");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: constructed scores always land in [0, 1]
        #[test]
        fn test_scores_always_clamped(a: f64, b: f64, c: f64, d: f64) {
            let s = Scores::new(a, b, c, d);
            prop_assert!(s.is_valid());
        }

        /// Property: in-range inputs are preserved exactly
        #[test]
        fn test_in_range_scores_untouched(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let s = Scores::new(a, b, a, b);
            prop_assert_eq!(s.confidence, a);
            prop_assert_eq!(s.complexity, b);
        }
    }
}
