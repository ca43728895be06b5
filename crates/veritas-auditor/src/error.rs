//! Error types for chain audits

use thiserror::Error;
use veritas_ledger::LedgerError;

/// Errors that can occur while auditing the ledger
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuditorError {
    /// The ledger could not be read
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Verification found a bad block and the auditor is set to halt
    #[error("Ledger tampered at block {sequence}: {reason}")]
    Tampered {
        /// First block that failed verification
        sequence: u64,
        /// What was wrong with it
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
