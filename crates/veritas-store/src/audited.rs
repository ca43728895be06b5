//! Ledger-backed store wrapper

use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use veritas_domain::{
    EntityId, Evidence, EvidenceDirection, Experiment, Hypothesis, HypothesisQuery,
    HypothesisStatus, KnowledgeStore, Mutation, Theory,
};
use veritas_ledger::{BlockStore, Ledger, LedgerError, SqliteBlockStore};

/// What the ledger records for every accepted mutation
#[derive(Debug, Serialize)]
struct AuditRecord<'a> {
    mutation: &'a Mutation,
    // Status before a transition; the mutation only carries the target.
    #[serde(skip_serializing_if = "Option::is_none")]
    prior_status: Option<HypothesisStatus>,
}

/// A knowledge store whose every mutation is recorded in a ledger
///
/// A mutation is validated against the inner store, appended to the ledger,
/// and only then applied. A validation failure writes nothing; a ledger
/// failure leaves the store unchanged.
pub struct AuditedStore<S, B: BlockStore = SqliteBlockStore> {
    inner: S,
    ledger: Arc<Ledger<B>>,
}

impl<S, B> AuditedStore<S, B>
where
    S: KnowledgeStore,
    S::Error: From<LedgerError>,
    B: BlockStore,
{
    /// Wrap a store with a (possibly shared) ledger
    pub fn new(inner: S, ledger: Arc<Ledger<B>>) -> Self {
        Self { inner, ledger }
    }

    /// The wrapped store, for read access
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// The ledger mutations are recorded in
    pub fn ledger(&self) -> &Arc<Ledger<B>> {
        &self.ledger
    }

    /// Append an arbitrary domain event to the ledger
    pub fn record_event<T: Serialize + ?Sized>(&self, event: &T) -> Result<String, LedgerError> {
        self.ledger.append(event)
    }
}

impl<S, B> KnowledgeStore for AuditedStore<S, B>
where
    S: KnowledgeStore,
    S::Error: From<LedgerError>,
    B: BlockStore,
{
    type Error = S::Error;

    fn preflight(&self, mutation: &Mutation) -> Result<(), Self::Error> {
        self.inner.preflight(mutation)
    }

    fn apply(&mut self, mutation: Mutation) -> Result<(), Self::Error> {
        self.inner.preflight(&mutation)?;

        let prior_status = match &mutation {
            Mutation::TransitionStatus { hypothesis_id, .. } => {
                self.inner.get_hypothesis(hypothesis_id)?.map(|h| h.status)
            }
            _ => None,
        };

        let hash = self.ledger.append(&AuditRecord {
            mutation: &mutation,
            prior_status,
        })?;
        tracing::debug!("Recorded {} as block {}", mutation.event_name(), hash);

        self.inner.apply(mutation)
    }

    fn get_hypothesis(&self, id: &EntityId) -> Result<Option<Hypothesis>, Self::Error> {
        self.inner.get_hypothesis(id)
    }

    fn get_experiment(&self, id: &EntityId) -> Result<Option<Experiment>, Self::Error> {
        self.inner.get_experiment(id)
    }

    fn get_evidence(&self, id: &EntityId) -> Result<Option<Evidence>, Self::Error> {
        self.inner.get_evidence(id)
    }

    fn get_theory(&self, id: &EntityId) -> Result<Option<Theory>, Self::Error> {
        self.inner.get_theory(id)
    }

    fn query_hypotheses(&self, query: &HypothesisQuery) -> Result<Vec<Hypothesis>, Self::Error> {
        self.inner.query_hypotheses(query)
    }

    fn experiments_for(&self, hypothesis_id: &EntityId) -> Result<Vec<Experiment>, Self::Error> {
        self.inner.experiments_for(hypothesis_id)
    }

    fn evidence_for(
        &self,
        hypothesis_id: &EntityId,
        direction: Option<EvidenceDirection>,
    ) -> Result<Vec<Evidence>, Self::Error> {
        self.inner.evidence_for(hypothesis_id, direction)
    }

    fn domains(&self) -> Result<BTreeSet<String>, Self::Error> {
        self.inner.domains()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InMemoryStore, StoreError};
    use veritas_ledger::MemoryBlockStore;

    fn audited() -> AuditedStore<InMemoryStore, MemoryBlockStore> {
        AuditedStore::new(InMemoryStore::default(), Arc::new(Ledger::in_memory()))
    }

    fn hypothesis(id: &str) -> Hypothesis {
        Hypothesis::new(EntityId::new(id), "Load raises latency", "perf")
            .with_variable("cause", "load")
            .with_relationship("raises")
    }

    #[test]
    fn test_every_mutation_appends_one_block() {
        let mut store = audited();
        let id = store.admit_hypothesis(hypothesis("h1")).unwrap();
        store.transition_status(&id, HypothesisStatus::Testing).unwrap();

        assert_eq!(store.ledger().len().unwrap(), 2);
        assert!(store.ledger().verify_chain());
    }

    #[test]
    fn test_rejected_mutation_writes_nothing() {
        let mut store = audited();
        let id = store.admit_hypothesis(hypothesis("h1")).unwrap();

        let err = store
            .transition_status(&id, HypothesisStatus::Supported)
            .unwrap_err();
        assert!(matches!(err, StoreError::IllegalTransition { .. }));
        assert_eq!(store.ledger().len().unwrap(), 1);
    }

    #[test]
    fn test_transition_records_prior_status() {
        let mut store = audited();
        let id = store.admit_hypothesis(hypothesis("h1")).unwrap();
        store.transition_status(&id, HypothesisStatus::Testing).unwrap();

        let block = store.ledger().latest_block().unwrap().unwrap();
        let payload = block.payload_json().unwrap();
        assert_eq!(payload["mutation"]["event"], "transition_status");
        assert_eq!(payload["mutation"]["to"], "TESTING");
        assert_eq!(payload["prior_status"], "PROPOSED");
    }
}
