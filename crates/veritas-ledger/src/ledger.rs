//! The provenance ledger

use crate::block::{timestamp_now, Block};
use crate::canonical::{canonical_bytes, GENESIS_HASH};
use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};
use crate::storage::{BlockStore, MemoryBlockStore, SqliteBlockStore};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};

/// Outcome of walking the whole chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainReport {
    /// Whether every block verified
    pub valid: bool,
    /// Blocks in storage
    pub total_blocks: u64,
    /// Blocks verified before the first failure
    pub verified_blocks: u64,
    /// Sequence of the first bad block
    pub first_invalid: Option<u64>,
    /// What was wrong with it
    pub reason: Option<String>,
}

impl ChainReport {
    fn invalid(total_blocks: u64, verified_blocks: u64, sequence: u64, reason: String) -> Self {
        Self {
            valid: false,
            total_blocks,
            verified_blocks,
            first_invalid: Some(sequence),
            reason: Some(reason),
        }
    }
}

/// Hash-chained, append-only log of auditable events
///
/// Payloads are opaque: the ledger only serializes and hashes them. All
/// access to the underlying [`BlockStore`] happens under one mutex, so an
/// append reads the tip and writes the next block without interleaving.
///
/// # Examples
///
/// ```
/// use veritas_ledger::Ledger;
/// use serde_json::json;
///
/// let ledger = Ledger::in_memory();
/// let hash = ledger.append(&json!({"event": "admit_hypothesis", "id": "h1"})).unwrap();
/// assert_eq!(hash.len(), 64);
/// assert!(ledger.verify_chain());
/// ```
pub struct Ledger<B: BlockStore = SqliteBlockStore> {
    store: Mutex<B>,
}

impl Ledger<SqliteBlockStore> {
    /// Open a SQLite-backed ledger
    pub fn open(config: &LedgerConfig) -> Result<Self> {
        let store = SqliteBlockStore::open(&config.path, config.storage_timeout())?;
        tracing::debug!("Opened ledger at {}", config.path);
        Ok(Self::new(store))
    }
}

impl Ledger<MemoryBlockStore> {
    /// Create a volatile ledger
    pub fn in_memory() -> Self {
        Self::new(MemoryBlockStore::new())
    }
}

impl<B: BlockStore> Ledger<B> {
    /// Wrap a block store
    pub fn new(store: B) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Take back the block store
    pub fn into_store(self) -> Result<B> {
        self.store
            .into_inner()
            .map_err(|_| LedgerError::StorageUnavailable("ledger lock poisoned".to_string()))
    }

    fn lock(&self) -> Result<MutexGuard<'_, B>> {
        self.store
            .lock()
            .map_err(|_| LedgerError::StorageUnavailable("ledger lock poisoned".to_string()))
    }

    /// Append a payload and return the new block's hash
    ///
    /// On error the chain tip does not move.
    pub fn append<T: Serialize + ?Sized>(&self, payload: &T) -> Result<String> {
        let bytes = canonical_bytes(payload)?;

        let mut store = self.lock()?;
        let (sequence, previous_hash) = match store.tip()? {
            Some(tip) => (tip.sequence + 1, tip.block_hash),
            None => (0, GENESIS_HASH.to_string()),
        };

        let block = Block::seal(sequence, previous_hash, bytes, timestamp_now());
        store.insert(&block)?;

        tracing::info!("Appended ledger block {} ({})", sequence, block.block_hash);
        Ok(block.block_hash)
    }

    /// Whether the whole chain verifies
    ///
    /// Fails closed: a storage error reads as `false`.
    pub fn verify_chain(&self) -> bool {
        match self.verify_report() {
            Ok(report) => report.valid,
            Err(e) => {
                tracing::error!("Chain verification could not read storage: {}", e);
                false
            }
        }
    }

    /// Walk the chain and report the first bad block, if any
    ///
    /// Recomputes each content root from the stored payload and each block
    /// hash from the stored fields, and checks sequence contiguity and
    /// linkage. The first block must link to [`GENESIS_HASH`].
    pub fn verify_report(&self) -> Result<ChainReport> {
        let blocks = self.lock()?.all()?;
        let total = blocks.len() as u64;
        let mut expected_previous = GENESIS_HASH.to_string();

        for (index, block) in blocks.iter().enumerate() {
            let index = index as u64;

            let problem = if block.sequence != index {
                Some(format!("expected sequence {}, found {}", index, block.sequence))
            } else if block.previous_hash != expected_previous {
                Some(format!(
                    "broken link: expected previous {}, found {}",
                    expected_previous, block.previous_hash
                ))
            } else if block.recompute_content_root() != block.content_root {
                Some("payload does not match content root".to_string())
            } else if block.recompute_hash() != block.block_hash {
                Some("block hash does not match contents".to_string())
            } else {
                None
            };

            if let Some(reason) = problem {
                tracing::warn!("Ledger block {} failed verification: {}", block.sequence, reason);
                return Ok(ChainReport::invalid(total, index, block.sequence, reason));
            }

            expected_previous = block.block_hash.clone();
        }

        Ok(ChainReport {
            valid: true,
            total_blocks: total,
            verified_blocks: total,
            first_invalid: None,
            reason: None,
        })
    }

    /// Get a block by sequence number
    pub fn block(&self, sequence: u64) -> Result<Option<Block>> {
        self.lock()?.get(sequence)
    }

    /// The most recent block
    pub fn latest_block(&self) -> Result<Option<Block>> {
        self.lock()?.tip()
    }

    /// Number of blocks in the chain
    pub fn len(&self) -> Result<u64> {
        self.lock()?.count()
    }

    /// Whether nothing has been appended yet
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Every block from the first through `sequence`
    ///
    /// Empty when no block has that sequence.
    pub fn provenance(&self, sequence: u64) -> Result<Vec<Block>> {
        let store = self.lock()?;
        if store.get(sequence)?.is_none() {
            return Ok(Vec::new());
        }
        store.range(0, sequence)
    }
}
