//! Theories aggregate hypotheses and the evidence behind them

use crate::hypothesis::clamp_unit;
use crate::{in_unit_range, EntityId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Quality scores of a theory, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TheoryScores {
    /// How well it predicts unseen outcomes
    pub predictive_power: f64,
    /// Economy of assumptions
    pub parsimony: f64,
    /// Internal consistency of its principles
    pub coherence: f64,
    /// Weight of evidence behind it
    pub empirical_support: f64,
}

impl TheoryScores {
    /// Create scores, clamping each into [0, 1]
    pub fn new(predictive_power: f64, parsimony: f64, coherence: f64, empirical_support: f64) -> Self {
        Self {
            predictive_power: clamp_unit(predictive_power),
            parsimony: clamp_unit(parsimony),
            coherence: clamp_unit(coherence),
            empirical_support: clamp_unit(empirical_support),
        }
    }

    /// Whether every score lies in [0, 1]
    pub fn is_valid(&self) -> bool {
        [
            self.predictive_power,
            self.parsimony,
            self.coherence,
            self.empirical_support,
        ]
        .iter()
        .all(|s| in_unit_range(*s))
    }
}

impl Default for TheoryScores {
    fn default() -> Self {
        Self::new(0.5, 0.5, 0.5, 0.5)
    }
}

/// A named aggregate over hypotheses and evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theory {
    /// Unique identifier
    pub id: EntityId,
    /// Human-readable name
    pub name: String,
    /// Core principles, in order
    pub core_principles: Vec<String>,
    /// Phenomena the theory claims to explain
    pub explanatory_scope: Vec<String>,
    /// Quality scores
    pub scores: TheoryScores,
    /// Aggregated hypotheses (at least one)
    pub hypotheses: BTreeSet<EntityId>,
    /// Aggregated evidence
    pub evidence: BTreeSet<EntityId>,
}

impl Theory {
    /// Create an empty theory
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            core_principles: Vec::new(),
            explanatory_scope: Vec::new(),
            scores: TheoryScores::default(),
            hypotheses: BTreeSet::new(),
            evidence: BTreeSet::new(),
        }
    }

    /// Add a core principle
    pub fn with_principle(mut self, principle: impl Into<String>) -> Self {
        self.core_principles.push(principle.into());
        self
    }

    /// Add an explanatory-scope label
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.explanatory_scope.push(scope.into());
        self
    }

    /// Aggregate a hypothesis
    pub fn with_hypothesis(mut self, id: impl Into<EntityId>) -> Self {
        self.hypotheses.insert(id.into());
        self
    }

    /// Aggregate a piece of evidence
    pub fn with_evidence(mut self, id: impl Into<EntityId>) -> Self {
        self.evidence.insert(id.into());
        self
    }

    /// Replace the scores
    pub fn with_scores(mut self, scores: TheoryScores) -> Self {
        self.scores = scores;
        self
    }
}
