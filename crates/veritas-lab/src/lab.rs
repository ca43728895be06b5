//! The lab context

use crate::config::LabConfig;
use crate::error::{LabError, Result};
use serde::Serialize;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use veritas_auditor::{AuditorWorker, ChainAuditor};
use veritas_domain::{
    EntityId, Evidence, EvidenceDirection, Experiment, Hypothesis, HypothesisQuery,
    HypothesisStatus, KnowledgeStore, Mutation, Payload, SupportSummary, Theory,
};
use veritas_frontier::{CoverageSnapshot, FrontierEstimator, HighValueRegion};
use veritas_ledger::{Block, BlockStore, ChainReport, Ledger, MemoryBlockStore, SqliteBlockStore};
use veritas_oracle::ConsistencyOracle;
use veritas_store::{AuditedStore, InMemoryStore, StoreError};

type Store<B> = AuditedStore<InMemoryStore, B>;

/// Knowledge store, ledger, oracle and frontier estimator in one context
///
/// Mutations take the write lock and are recorded in the ledger before they
/// apply. Lookups, coverage and frontier queries share the read lock. The
/// ledger is reachable through an `Arc` so an auditor can verify it on its
/// own schedule.
///
/// # Examples
///
/// ```
/// use veritas_domain::{EntityId, Hypothesis};
/// use veritas_lab::{Lab, LabConfig, LabError};
///
/// let lab = Lab::in_memory(LabConfig::default()).unwrap();
///
/// let h = Hypothesis::new(EntityId::new("h1"), "Caching reduces latency", "perf")
///     .with_variable("cause", "caching")
///     .with_variable("effect", "latency")
///     .with_relationship("reduces");
/// lab.admit_hypothesis(h).unwrap();
///
/// let contrary = Hypothesis::new(EntityId::new("h2"), "Caching does not reduce latency", "perf")
///     .with_variable("cause", "caching")
///     .with_variable("effect", "latency")
///     .with_relationship("reduces");
/// assert!(matches!(lab.admit_hypothesis(contrary), Err(LabError::Inconsistent { .. })));
/// assert!(lab.verify_chain());
/// ```
pub struct Lab<B: BlockStore = SqliteBlockStore> {
    store: RwLock<Store<B>>,
    ledger: Arc<Ledger<B>>,
    oracle: ConsistencyOracle,
    frontier: FrontierEstimator,
    config: LabConfig,
}

impl Lab<SqliteBlockStore> {
    /// Open a lab whose ledger lives at `config.ledger.path`
    pub fn open(config: LabConfig) -> Result<Self> {
        config.validate()?;
        let ledger = Ledger::open(&config.ledger)?;
        tracing::info!("Opened lab with ledger at {}", config.ledger.path);
        Ok(Self::assemble(config, Arc::new(ledger)))
    }
}

impl Lab<MemoryBlockStore> {
    /// A lab with a volatile ledger
    pub fn in_memory(config: LabConfig) -> Result<Self> {
        Self::with_ledger(config, Arc::new(Ledger::in_memory()))
    }
}

impl<B: BlockStore> Lab<B> {
    /// Build a lab around an existing, possibly shared, ledger
    ///
    /// The knowledge store always starts empty.
    pub fn with_ledger(config: LabConfig, ledger: Arc<Ledger<B>>) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(config, ledger))
    }

    // Callers validate `config` first.
    fn assemble(config: LabConfig, ledger: Arc<Ledger<B>>) -> Self {
        let store = AuditedStore::new(InMemoryStore::new(config.store.clone()), ledger.clone());
        Self {
            store: RwLock::new(store),
            ledger,
            oracle: ConsistencyOracle::new(config.oracle.clone()),
            frontier: FrontierEstimator::new(config.frontier.clone()),
            config,
        }
    }

    /// The lab's configuration
    pub fn config(&self) -> &LabConfig {
        &self.config
    }

    /// The consistency oracle admissions are gated by
    pub fn oracle(&self) -> &ConsistencyOracle {
        &self.oracle
    }

    /// The provenance ledger
    pub fn ledger(&self) -> &Arc<Ledger<B>> {
        &self.ledger
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Store<B>>> {
        self.store.read().map_err(|_| LabError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Store<B>>> {
        self.store.write().map_err(|_| LabError::LockPoisoned)
    }

    // --- Mutations ---

    /// Admit a hypothesis as `PROPOSED`
    ///
    /// Store validation runs first, then the candidate is checked against
    /// every active hypothesis of its domain. A conflict rejects it with
    /// [`LabError::Inconsistent`] and nothing is written.
    pub fn admit_hypothesis(&self, hypothesis: Hypothesis) -> Result<EntityId> {
        let mut store = self.write()?;
        store.preflight(&Mutation::AdmitHypothesis {
            hypothesis: hypothesis.clone(),
        })?;

        let active = store.query_hypotheses(&HypothesisQuery::in_domain(&hypothesis.domain).active())?;
        let statements: Vec<&str> = active.iter().map(|h| h.statement.as_str()).collect();
        let conflicting: Vec<EntityId> = self
            .oracle
            .find_conflicts(&hypothesis.statement, &statements)
            .into_iter()
            .map(|i| active[i].id.clone())
            .collect();

        if !conflicting.is_empty() {
            tracing::warn!(
                "Rejected hypothesis {}: contradicts {} active hypotheses",
                hypothesis.id,
                conflicting.len()
            );
            return Err(LabError::Inconsistent {
                candidate: hypothesis.id,
                conflicting,
            });
        }

        Ok(store.admit_hypothesis(hypothesis)?)
    }

    /// Record an experiment design
    pub fn record_experiment(&self, experiment: Experiment) -> Result<EntityId> {
        Ok(self.write()?.record_experiment(experiment)?)
    }

    /// Store the externally produced outcome of an experiment
    pub fn record_results(
        &self,
        experiment_id: &EntityId,
        results: Payload,
        analysis: Option<Payload>,
    ) -> Result<()> {
        Ok(self.write()?.record_results(experiment_id, results, analysis)?)
    }

    /// Attach evidence for or against its hypothesis
    pub fn attach_evidence(&self, evidence: Evidence, direction: EvidenceDirection) -> Result<EntityId> {
        Ok(self.write()?.attach_evidence(evidence, direction)?)
    }

    /// Move a hypothesis through its lifecycle
    pub fn transition_status(&self, hypothesis_id: &EntityId, to: HypothesisStatus) -> Result<()> {
        Ok(self.write()?.transition_status(hypothesis_id, to)?)
    }

    /// Admit a theory
    pub fn record_theory(&self, theory: Theory) -> Result<EntityId> {
        Ok(self.write()?.record_theory(theory)?)
    }

    /// Append any other domain event worth auditing
    ///
    /// Ordered with store mutations: the write lock is held while appending.
    pub fn record_event<T: Serialize + ?Sized>(&self, event: &T) -> Result<String> {
        let store = self.write()?;
        Ok(store.record_event(event)?)
    }

    // --- Lookups ---

    /// Get a hypothesis by id
    pub fn hypothesis(&self, id: &EntityId) -> Result<Option<Hypothesis>> {
        Ok(self.read()?.get_hypothesis(id)?)
    }

    /// Get an experiment by id
    pub fn experiment(&self, id: &EntityId) -> Result<Option<Experiment>> {
        Ok(self.read()?.get_experiment(id)?)
    }

    /// Get an evidence record by id
    pub fn evidence(&self, id: &EntityId) -> Result<Option<Evidence>> {
        Ok(self.read()?.get_evidence(id)?)
    }

    /// Get a theory by id
    pub fn theory(&self, id: &EntityId) -> Result<Option<Theory>> {
        Ok(self.read()?.get_theory(id)?)
    }

    /// Hypotheses matching a query, in admission order
    pub fn query_hypotheses(&self, query: &HypothesisQuery) -> Result<Vec<Hypothesis>> {
        Ok(self.read()?.query_hypotheses(query)?)
    }

    /// Summary of the evidence supporting a hypothesis
    pub fn support_summary(&self, hypothesis_id: &EntityId) -> Result<SupportSummary> {
        Ok(self.read()?.inner().support_summary(hypothesis_id)?)
    }

    /// Statements implied by a stored hypothesis
    pub fn implications(&self, hypothesis_id: &EntityId) -> Result<Vec<String>> {
        let hypothesis = self
            .hypothesis(hypothesis_id)?
            .ok_or_else(|| StoreError::UnknownHypothesis(hypothesis_id.clone()))?;
        Ok(self.oracle.derive_implications(&hypothesis.statement))
    }

    // --- Frontier ---

    /// Coverage of one domain's hypothesis space
    pub fn coverage(&self, domain: &str) -> Result<CoverageSnapshot> {
        Ok(self.frontier.map_coverage(&*self.read()?, domain)?)
    }

    /// Candidate hypotheses for a domain; the caller decides what to admit
    pub fn generate_frontier(&self, domain: &str, count: usize) -> Result<Vec<Hypothesis>> {
        Ok(self.frontier.generate_frontier(&*self.read()?, domain, count)?)
    }

    /// Unexplored candidates grouped by priority
    pub fn high_value_regions(&self, domain: &str) -> Result<Vec<HighValueRegion>> {
        Ok(self.frontier.identify_high_value_regions(&*self.read()?, domain)?)
    }

    // --- Ledger ---

    /// Whether the whole ledger verifies
    pub fn verify_chain(&self) -> bool {
        self.ledger.verify_chain()
    }

    /// Detailed verification of the ledger
    pub fn verify_report(&self) -> Result<ChainReport> {
        Ok(self.ledger.verify_report()?)
    }

    /// Every block from the first through `sequence`
    pub fn provenance(&self, sequence: u64) -> Result<Vec<Block>> {
        Ok(self.ledger.provenance(sequence)?)
    }

    /// A one-shot auditor over this lab's ledger
    pub fn auditor(&self) -> ChainAuditor<B> {
        ChainAuditor::new(self.ledger.clone(), self.config.auditor.clone())
    }

    /// A background auditor over this lab's ledger
    pub fn auditor_worker(&self) -> Result<AuditorWorker<B>> {
        Ok(AuditorWorker::new(
            self.ledger.clone(),
            self.config.auditor.clone(),
        )?)
    }
}
