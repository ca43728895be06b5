//! State changes to the knowledge store
//!
//! Every mutating store operation is expressed as one [`Mutation`]. The same
//! value is what gets appended to the provenance ledger, so the ledger holds
//! an exact, replayable record of each accepted change.

use crate::{
    EntityId, Evidence, EvidenceDirection, Experiment, Hypothesis, HypothesisStatus, Payload,
    Theory,
};
use serde::{Deserialize, Serialize};

/// A single change to the knowledge store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Mutation {
    /// Admit a new hypothesis
    AdmitHypothesis {
        /// The hypothesis as admitted (status `PROPOSED`)
        hypothesis: Hypothesis,
    },

    /// Record an experiment design
    RecordExperiment {
        /// The experiment
        experiment: Experiment,
    },

    /// Store the externally produced outcome of an experiment
    RecordResults {
        /// Target experiment
        experiment_id: EntityId,
        /// Raw results
        results: Payload,
        /// Optional interpretation
        analysis: Option<Payload>,
    },

    /// Attach evidence to its hypothesis
    AttachEvidence {
        /// The evidence
        evidence: Evidence,
        /// Supporting or disconfirming
        direction: EvidenceDirection,
    },

    /// Move a hypothesis along its lifecycle
    TransitionStatus {
        /// Target hypothesis
        hypothesis_id: EntityId,
        /// New status
        to: HypothesisStatus,
    },

    /// Admit a theory
    RecordTheory {
        /// The theory
        theory: Theory,
    },
}

impl Mutation {
    /// Short name of the event, as it appears in the ledger
    pub fn event_name(&self) -> &'static str {
        match self {
            Mutation::AdmitHypothesis { .. } => "admit_hypothesis",
            Mutation::RecordExperiment { .. } => "record_experiment",
            Mutation::RecordResults { .. } => "record_results",
            Mutation::AttachEvidence { .. } => "attach_evidence",
            Mutation::TransitionStatus { .. } => "transition_status",
            Mutation::RecordTheory { .. } => "record_theory",
        }
    }

    /// Id of the entity the change is primarily about
    pub fn subject_id(&self) -> &EntityId {
        match self {
            Mutation::AdmitHypothesis { hypothesis } => &hypothesis.id,
            Mutation::RecordExperiment { experiment } => &experiment.id,
            Mutation::RecordResults { experiment_id, .. } => experiment_id,
            Mutation::AttachEvidence { evidence, .. } => &evidence.id,
            Mutation::TransitionStatus { hypothesis_id, .. } => hypothesis_id,
            Mutation::RecordTheory { theory } => &theory.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_tag_matches_event_name() {
        let m = Mutation::TransitionStatus {
            hypothesis_id: EntityId::new("h1"),
            to: HypothesisStatus::Testing,
        };
        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(value["event"], m.event_name());
        assert_eq!(value["to"], "TESTING");
        assert_eq!(m.subject_id().as_str(), "h1");
    }
}
