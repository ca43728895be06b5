//! Store error types

use thiserror::Error;
use veritas_domain::{EntityId, HypothesisStatus};
use veritas_ledger::LedgerError;

/// Errors that can occur during knowledge store operations
///
/// Every error leaves the store exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// An entity of the same kind already has this id
    #[error("Duplicate id: {0}")]
    DuplicateId(EntityId),

    /// Malformed hypothesis
    #[error("Invalid hypothesis: {0}")]
    InvalidHypothesis(String),

    /// Malformed experiment, or results recorded twice
    #[error("Invalid experiment: {0}")]
    InvalidExperiment(String),

    /// Malformed evidence
    #[error("Invalid evidence: {0}")]
    InvalidEvidence(String),

    /// Malformed theory
    #[error("Invalid theory: {0}")]
    InvalidTheory(String),

    /// Referenced hypothesis was never admitted
    #[error("Unknown hypothesis: {0}")]
    UnknownHypothesis(EntityId),

    /// Referenced experiment was never recorded
    #[error("Unknown experiment: {0}")]
    UnknownExperiment(EntityId),

    /// The lifecycle forbids this status change
    #[error("Illegal transition for {id}: {from} -> {to} ({reason})")]
    IllegalTransition {
        /// Hypothesis id
        id: EntityId,
        /// Current status
        from: HypothesisStatus,
        /// Requested status
        to: HypothesisStatus,
        /// Why it was refused
        reason: String,
    },

    /// The change could not be recorded in the ledger
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Result alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
