//! Ledger error types

use thiserror::Error;

/// Errors that can occur during ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Storage could not be reached or rejected the write (retryable)
    #[error("Ledger storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The payload has no canonical encoding (fatal for that append)
    #[error("Payload cannot be serialized: {0}")]
    UnserializablePayload(String),
}

impl LedgerError {
    /// Whether retrying the same call may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, LedgerError::StorageUnavailable(_))
    }
}

impl From<rusqlite::Error> for LedgerError {
    fn from(err: rusqlite::Error) -> Self {
        LedgerError::StorageUnavailable(err.to_string())
    }
}

/// Result alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;
