//! Ledger blocks

use crate::canonical::{compute_block_hash, digest, GENESIS_HASH};
use crate::error::{LedgerError, Result};
use chrono::{SecondsFormat, Utc};

/// One hash-linked, append-only record of an auditable event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Position in the chain, starting at 0
    pub sequence: u64,

    /// Hash of the preceding block, or [`GENESIS_HASH`] for the first
    pub previous_hash: String,

    /// Digest of `payload`
    pub content_root: String,

    /// ISO-8601 (RFC 3339, UTC, nanosecond precision)
    pub timestamp: String,

    /// Canonical payload bytes
    pub payload: Vec<u8>,

    /// Digest over `(previous_hash, content_root, timestamp)`
    pub block_hash: String,
}

impl Block {
    /// Build a block and compute its hashes
    pub fn seal(
        sequence: u64,
        previous_hash: impl Into<String>,
        payload: Vec<u8>,
        timestamp: impl Into<String>,
    ) -> Self {
        let previous_hash = previous_hash.into();
        let timestamp = timestamp.into();
        let content_root = digest(&payload);
        let block_hash = compute_block_hash(&previous_hash, &content_root, &timestamp);

        Self {
            sequence,
            previous_hash,
            content_root,
            timestamp,
            payload,
            block_hash,
        }
    }

    /// Hash this block should carry given its other fields
    pub fn recompute_hash(&self) -> String {
        compute_block_hash(&self.previous_hash, &self.content_root, &self.timestamp)
    }

    /// Content root this block should carry given its payload
    pub fn recompute_content_root(&self) -> String {
        digest(&self.payload)
    }

    /// Whether this block links to the genesis sentinel
    pub fn links_to_genesis(&self) -> bool {
        self.previous_hash == GENESIS_HASH
    }

    /// Decode the payload as JSON
    pub fn payload_json(&self) -> Result<serde_json::Value> {
        serde_json::from_slice(&self.payload)
            .map_err(|e| LedgerError::UnserializablePayload(e.to_string()))
    }
}

/// Current time as a block timestamp
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true)
}
