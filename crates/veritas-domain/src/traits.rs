//! Trait definitions for the knowledge store boundary
//!
//! The store implementation lives in `veritas-store`. Everything that mutates
//! state goes through [`KnowledgeStore::apply`] with a [`Mutation`], which lets
//! an auditing wrapper record each change before it takes effect.

use crate::{
    EntityId, Evidence, EvidenceDirection, Experiment, Hypothesis, HypothesisStatus, Mutation,
    Payload, Theory,
};
use std::collections::BTreeSet;

/// Trait for storing and retrieving research entities
///
/// Implemented by the infrastructure layer (veritas-store)
pub trait KnowledgeStore {
    /// Error type for store operations
    type Error;

    /// Check that a mutation would succeed, without changing anything
    fn preflight(&self, mutation: &Mutation) -> Result<(), Self::Error>;

    /// Apply a mutation; on error the store is unchanged
    fn apply(&mut self, mutation: Mutation) -> Result<(), Self::Error>;

    /// Get a hypothesis by ID
    fn get_hypothesis(&self, id: &EntityId) -> Result<Option<Hypothesis>, Self::Error>;

    /// Get an experiment by ID
    fn get_experiment(&self, id: &EntityId) -> Result<Option<Experiment>, Self::Error>;

    /// Get a piece of evidence by ID
    fn get_evidence(&self, id: &EntityId) -> Result<Option<Evidence>, Self::Error>;

    /// Get a theory by ID
    fn get_theory(&self, id: &EntityId) -> Result<Option<Theory>, Self::Error>;

    /// Query hypotheses matching criteria, in admission order
    fn query_hypotheses(&self, query: &HypothesisQuery) -> Result<Vec<Hypothesis>, Self::Error>;

    /// Experiments designed for a hypothesis
    fn experiments_for(&self, hypothesis_id: &EntityId) -> Result<Vec<Experiment>, Self::Error>;

    /// Evidence attached to a hypothesis, optionally restricted to one direction
    fn evidence_for(
        &self,
        hypothesis_id: &EntityId,
        direction: Option<EvidenceDirection>,
    ) -> Result<Vec<Evidence>, Self::Error>;

    /// Every domain tag seen so far
    fn domains(&self) -> Result<BTreeSet<String>, Self::Error>;

    /// Admit a new hypothesis as `PROPOSED`
    fn admit_hypothesis(&mut self, hypothesis: Hypothesis) -> Result<EntityId, Self::Error> {
        let mut hypothesis = hypothesis;
        hypothesis.status = HypothesisStatus::Proposed;
        hypothesis.supporting_evidence.clear();
        hypothesis.disconfirming_evidence.clear();

        let id = hypothesis.id.clone();
        self.apply(Mutation::AdmitHypothesis { hypothesis })?;
        Ok(id)
    }

    /// Record an experiment design
    fn record_experiment(&mut self, experiment: Experiment) -> Result<EntityId, Self::Error> {
        let mut experiment = experiment;
        experiment.results = None;
        experiment.analysis = None;

        let id = experiment.id.clone();
        self.apply(Mutation::RecordExperiment { experiment })?;
        Ok(id)
    }

    /// Store the outcome of an executed experiment
    fn record_results(
        &mut self,
        experiment_id: &EntityId,
        results: Payload,
        analysis: Option<Payload>,
    ) -> Result<(), Self::Error> {
        self.apply(Mutation::RecordResults {
            experiment_id: experiment_id.clone(),
            results,
            analysis,
        })
    }

    /// Attach evidence to its hypothesis
    fn attach_evidence(
        &mut self,
        evidence: Evidence,
        direction: EvidenceDirection,
    ) -> Result<EntityId, Self::Error> {
        let id = evidence.id.clone();
        self.apply(Mutation::AttachEvidence { evidence, direction })?;
        Ok(id)
    }

    /// Move a hypothesis to a new status
    fn transition_status(
        &mut self,
        hypothesis_id: &EntityId,
        to: HypothesisStatus,
    ) -> Result<(), Self::Error> {
        self.apply(Mutation::TransitionStatus {
            hypothesis_id: hypothesis_id.clone(),
            to,
        })
    }

    /// Admit a theory
    fn record_theory(&mut self, theory: Theory) -> Result<EntityId, Self::Error> {
        let id = theory.id.clone();
        self.apply(Mutation::RecordTheory { theory })?;
        Ok(id)
    }
}

/// Query criteria for retrieving hypotheses
#[derive(Debug, Clone, Default)]
pub struct HypothesisQuery {
    /// Filter by exact domain tag
    pub domain: Option<String>,

    /// Filter by status
    pub status: Option<HypothesisStatus>,

    /// Only non-terminal hypotheses
    pub active_only: bool,

    /// Maximum results to return
    pub limit: Option<usize>,
}

impl HypothesisQuery {
    /// Everything in one domain
    pub fn in_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            ..Default::default()
        }
    }

    /// Only non-terminal hypotheses
    pub fn active(mut self) -> Self {
        self.active_only = true;
        self
    }

    /// Whether a hypothesis satisfies the criteria (ignores `limit`)
    pub fn matches(&self, hypothesis: &Hypothesis) -> bool {
        if let Some(domain) = &self.domain {
            if &hypothesis.domain != domain {
                return false;
            }
        }
        if let Some(status) = self.status {
            if hypothesis.status != status {
                return false;
            }
        }
        !(self.active_only && hypothesis.status.is_terminal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_matching() {
        let mut h = Hypothesis::new(EntityId::new("h1"), "A affects B", "d");
        assert!(HypothesisQuery::default().matches(&h));
        assert!(HypothesisQuery::in_domain("d").active().matches(&h));
        assert!(!HypothesisQuery::in_domain("other").matches(&h));

        h.status = HypothesisStatus::Refuted;
        assert!(!HypothesisQuery::in_domain("d").active().matches(&h));
    }
}
