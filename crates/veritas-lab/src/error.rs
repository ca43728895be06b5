//! Error types for lab operations

use crate::config::ConfigError;
use thiserror::Error;
use veritas_auditor::AuditorError;
use veritas_domain::EntityId;
use veritas_ledger::LedgerError;
use veritas_store::StoreError;

/// Errors that can occur during lab operations
#[derive(Error, Debug)]
pub enum LabError {
    /// The knowledge store rejected the operation
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The ledger could not record or read
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// The candidate contradicts active hypotheses of its domain
    #[error(
        "Hypothesis {candidate} contradicts active hypotheses: {}",
        .conflicting.iter().map(|id| id.as_str()).collect::<Vec<_>>().join(", ")
    )]
    Inconsistent {
        /// Rejected hypothesis
        candidate: EntityId,
        /// Active hypotheses it conflicts with
        conflicting: Vec<EntityId>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The auditor could not be started
    #[error("Auditor error: {0}")]
    Auditor(#[from] AuditorError),

    /// A thread panicked while holding the store lock
    #[error("Lab state lock poisoned")]
    LockPoisoned,
}

/// Result alias for lab operations
pub type Result<T> = std::result::Result<T, LabError>;
