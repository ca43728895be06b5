//! In-memory knowledge store

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use std::collections::{BTreeSet, HashMap};
use veritas_domain::{
    EntityId, Evidence, EvidenceDirection, Experiment, Hypothesis, HypothesisQuery,
    HypothesisStatus, KnowledgeStore, Mutation, Payload, SupportSummary, Theory,
};

/// The knowledge store
///
/// Owns every hypothesis, experiment, evidence and theory record. Each
/// mutation is fully validated by [`KnowledgeStore::preflight`] before any
/// field is touched, so a rejected call leaves the store unchanged.
///
/// # Examples
///
/// ```
/// use veritas_domain::{EntityId, Hypothesis, HypothesisStatus, KnowledgeStore};
/// use veritas_store::InMemoryStore;
///
/// let mut store = InMemoryStore::default();
/// let h = Hypothesis::new(EntityId::new("h1"), "Caching reduces latency", "perf")
///     .with_variable("cause", "caching")
///     .with_relationship("reduces");
/// let id = store.admit_hypothesis(h).unwrap();
///
/// store.transition_status(&id, HypothesisStatus::Testing).unwrap();
/// assert!(store.transition_status(&id, HypothesisStatus::WellSupported).is_err());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    config: StoreConfig,

    // Admission order is kept for queries.
    hypotheses: Vec<Hypothesis>,
    hypothesis_index: HashMap<EntityId, usize>,

    experiments: Vec<Experiment>,
    experiment_index: HashMap<EntityId, usize>,

    evidence: HashMap<EntityId, Evidence>,
    theories: HashMap<EntityId, Theory>,
}

impl InMemoryStore {
    /// Create an empty store with the given threshold configuration
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// The store's configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Number of admitted hypotheses
    pub fn hypothesis_count(&self) -> usize {
        self.hypotheses.len()
    }

    /// Summary of the evidence supporting a hypothesis
    pub fn support_summary(&self, hypothesis_id: &EntityId) -> Result<SupportSummary> {
        let hypothesis = self
            .hypothesis(hypothesis_id)
            .ok_or_else(|| StoreError::UnknownHypothesis(hypothesis_id.clone()))?;
        Ok(self.summarize(&hypothesis.supporting_evidence))
    }

    fn summarize(&self, ids: &[EntityId]) -> SupportSummary {
        SupportSummary::from_evidence(ids.iter().filter_map(|id| self.evidence.get(id)))
    }

    fn hypothesis(&self, id: &EntityId) -> Option<&Hypothesis> {
        self.hypothesis_index.get(id).map(|&i| &self.hypotheses[i])
    }

    fn experiment(&self, id: &EntityId) -> Option<&Experiment> {
        self.experiment_index.get(id).map(|&i| &self.experiments[i])
    }

    fn require_hypothesis(&self, id: &EntityId) -> Result<&Hypothesis> {
        self.hypothesis(id)
            .ok_or_else(|| StoreError::UnknownHypothesis(id.clone()))
    }

    fn check_hypothesis(&self, h: &Hypothesis) -> Result<()> {
        if h.id.is_blank() {
            return Err(StoreError::InvalidHypothesis("id is blank".to_string()));
        }
        if self.hypothesis_index.contains_key(&h.id) {
            return Err(StoreError::DuplicateId(h.id.clone()));
        }
        if h.statement.trim().is_empty() {
            return Err(StoreError::InvalidHypothesis("statement is empty".to_string()));
        }
        if !h.scores.is_valid() {
            return Err(StoreError::InvalidHypothesis(format!(
                "scores outside [0, 1]: {:?}",
                h.scores
            )));
        }
        if h.variables.is_empty() {
            return Err(StoreError::InvalidHypothesis(
                "at least one variable is required".to_string(),
            ));
        }
        if h.relationships.is_empty() {
            return Err(StoreError::InvalidHypothesis(
                "at least one relationship is required".to_string(),
            ));
        }
        Ok(())
    }

    fn check_experiment(&self, e: &Experiment) -> Result<()> {
        self.require_hypothesis(&e.hypothesis_id)?;
        if self.experiment_index.contains_key(&e.id) {
            return Err(StoreError::DuplicateId(e.id.clone()));
        }
        match e.validation_error() {
            Some(reason) => Err(StoreError::InvalidExperiment(reason)),
            None => Ok(()),
        }
    }

    fn check_results(
        &self,
        experiment_id: &EntityId,
        results: &Payload,
        analysis: Option<&Payload>,
    ) -> Result<()> {
        let experiment = self
            .experiment(experiment_id)
            .ok_or_else(|| StoreError::UnknownExperiment(experiment_id.clone()))?;
        if experiment.is_executed() {
            return Err(StoreError::InvalidExperiment(format!(
                "results already recorded for {}",
                experiment_id
            )));
        }
        if !results.is_finite() || analysis.is_some_and(|a| !a.is_finite()) {
            return Err(StoreError::InvalidExperiment(format!(
                "results for {} hold a non-finite number",
                experiment_id
            )));
        }
        Ok(())
    }

    fn check_evidence(&self, ev: &Evidence) -> Result<()> {
        self.require_hypothesis(&ev.hypothesis_id)?;
        if self.evidence.contains_key(&ev.id) {
            return Err(StoreError::DuplicateId(ev.id.clone()));
        }
        match ev.validation_error() {
            Some(reason) => Err(StoreError::InvalidEvidence(reason)),
            None => Ok(()),
        }
    }

    fn check_transition(&self, id: &EntityId, to: HypothesisStatus) -> Result<()> {
        let hypothesis = self.require_hypothesis(id)?;
        let from = hypothesis.status;
        let illegal = |reason: String| StoreError::IllegalTransition {
            id: id.clone(),
            from,
            to,
            reason,
        };

        if !from.can_transition_to(to) {
            let reason = if from.is_terminal() {
                format!("{} is terminal", from)
            } else {
                "not an edge of the lifecycle".to_string()
            };
            return Err(illegal(reason));
        }

        if to == HypothesisStatus::WellSupported {
            let summary = self.summarize(&hypothesis.supporting_evidence);
            if !self.config.is_met_by(&summary) {
                return Err(illegal(format!(
                    "supporting evidence below threshold: count {}, mean quality {:.2}, mean strength {:.2}",
                    summary.count, summary.mean_quality, summary.mean_strength
                )));
            }
        }
        Ok(())
    }

    fn check_theory(&self, t: &Theory) -> Result<()> {
        if t.id.is_blank() {
            return Err(StoreError::InvalidTheory("id is blank".to_string()));
        }
        if self.theories.contains_key(&t.id) {
            return Err(StoreError::DuplicateId(t.id.clone()));
        }
        if t.name.trim().is_empty() {
            return Err(StoreError::InvalidTheory("name is empty".to_string()));
        }
        if t.hypotheses.is_empty() {
            return Err(StoreError::InvalidTheory(
                "must reference at least one hypothesis".to_string(),
            ));
        }
        if !t.scores.is_valid() {
            return Err(StoreError::InvalidTheory(format!(
                "scores outside [0, 1]: {:?}",
                t.scores
            )));
        }
        for id in &t.hypotheses {
            self.require_hypothesis(id)?;
        }
        if let Some(missing) = t.evidence.iter().find(|id| !self.evidence.contains_key(*id)) {
            return Err(StoreError::InvalidTheory(format!("unknown evidence {}", missing)));
        }
        Ok(())
    }
}

impl KnowledgeStore for InMemoryStore {
    type Error = StoreError;

    fn preflight(&self, mutation: &Mutation) -> Result<()> {
        match mutation {
            Mutation::AdmitHypothesis { hypothesis } => self.check_hypothesis(hypothesis),
            Mutation::RecordExperiment { experiment } => self.check_experiment(experiment),
            Mutation::RecordResults {
                experiment_id,
                results,
                analysis,
            } => self.check_results(experiment_id, results, analysis.as_ref()),
            Mutation::AttachEvidence { evidence, .. } => self.check_evidence(evidence),
            Mutation::TransitionStatus { hypothesis_id, to } => {
                self.check_transition(hypothesis_id, *to)
            }
            Mutation::RecordTheory { theory } => self.check_theory(theory),
        }
    }

    fn apply(&mut self, mutation: Mutation) -> Result<()> {
        if let Err(e) = self.preflight(&mutation) {
            tracing::warn!("Rejected {} for {}: {}", mutation.event_name(), mutation.subject_id(), e);
            return Err(e);
        }

        // Lookups below cannot miss: preflight just checked every reference.
        match mutation {
            Mutation::AdmitHypothesis { hypothesis } => {
                tracing::info!("Admitted hypothesis {}", hypothesis.id);
                self.hypothesis_index
                    .insert(hypothesis.id.clone(), self.hypotheses.len());
                self.hypotheses.push(hypothesis);
            }
            Mutation::RecordExperiment { experiment } => {
                tracing::info!(
                    "Recorded experiment {} for {}",
                    experiment.id,
                    experiment.hypothesis_id
                );
                self.experiment_index
                    .insert(experiment.id.clone(), self.experiments.len());
                self.experiments.push(experiment);
            }
            Mutation::RecordResults {
                experiment_id,
                results,
                analysis,
            } => {
                if let Some(&i) = self.experiment_index.get(&experiment_id) {
                    tracing::info!("Recorded results for experiment {}", experiment_id);
                    self.experiments[i].results = Some(results);
                    self.experiments[i].analysis = analysis;
                }
            }
            Mutation::AttachEvidence {
                evidence,
                direction,
            } => {
                if let Some(&i) = self.hypothesis_index.get(&evidence.hypothesis_id) {
                    tracing::info!(
                        "Attached {} evidence {} to {}",
                        direction.as_str(),
                        evidence.id,
                        evidence.hypothesis_id
                    );
                    let hypothesis = &mut self.hypotheses[i];
                    match direction {
                        EvidenceDirection::Supporting => {
                            hypothesis.supporting_evidence.push(evidence.id.clone())
                        }
                        EvidenceDirection::Disconfirming => {
                            hypothesis.disconfirming_evidence.push(evidence.id.clone())
                        }
                    }
                    self.evidence.insert(evidence.id.clone(), evidence);
                }
            }
            Mutation::TransitionStatus { hypothesis_id, to } => {
                if let Some(&i) = self.hypothesis_index.get(&hypothesis_id) {
                    let from = self.hypotheses[i].status;
                    self.hypotheses[i].status = to;
                    tracing::info!("Hypothesis {}: {} -> {}", hypothesis_id, from, to);
                }
            }
            Mutation::RecordTheory { theory } => {
                tracing::info!(
                    "Recorded theory {} over {} hypotheses",
                    theory.id,
                    theory.hypotheses.len()
                );
                self.theories.insert(theory.id.clone(), theory);
            }
        }
        Ok(())
    }

    fn get_hypothesis(&self, id: &EntityId) -> Result<Option<Hypothesis>> {
        Ok(self.hypothesis(id).cloned())
    }

    fn get_experiment(&self, id: &EntityId) -> Result<Option<Experiment>> {
        Ok(self.experiment(id).cloned())
    }

    fn get_evidence(&self, id: &EntityId) -> Result<Option<Evidence>> {
        Ok(self.evidence.get(id).cloned())
    }

    fn get_theory(&self, id: &EntityId) -> Result<Option<Theory>> {
        Ok(self.theories.get(id).cloned())
    }

    fn query_hypotheses(&self, query: &HypothesisQuery) -> Result<Vec<Hypothesis>> {
        let matching = self.hypotheses.iter().filter(|h| query.matches(h)).cloned();
        Ok(match query.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        })
    }

    fn experiments_for(&self, hypothesis_id: &EntityId) -> Result<Vec<Experiment>> {
        Ok(self
            .experiments
            .iter()
            .filter(|e| &e.hypothesis_id == hypothesis_id)
            .cloned()
            .collect())
    }

    fn evidence_for(
        &self,
        hypothesis_id: &EntityId,
        direction: Option<EvidenceDirection>,
    ) -> Result<Vec<Evidence>> {
        let hypothesis = self.require_hypothesis(hypothesis_id)?;
        let ids: Vec<&EntityId> = match direction {
            Some(EvidenceDirection::Supporting) => hypothesis.supporting_evidence.iter().collect(),
            Some(EvidenceDirection::Disconfirming) => {
                hypothesis.disconfirming_evidence.iter().collect()
            }
            None => hypothesis
                .supporting_evidence
                .iter()
                .chain(hypothesis.disconfirming_evidence.iter())
                .collect(),
        };
        Ok(ids
            .into_iter()
            .filter_map(|id| self.evidence.get(id).cloned())
            .collect())
    }

    fn domains(&self) -> Result<BTreeSet<String>> {
        Ok(self.hypotheses.iter().map(|h| h.domain.clone()).collect())
    }
}
