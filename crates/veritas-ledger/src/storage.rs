//! Block storage backends
//!
//! The ledger never touches storage directly. It drives a [`BlockStore`],
//! which only has to keep blocks keyed by sequence and hand them back in
//! order.

use crate::block::Block;
use crate::error::{LedgerError, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::time::Duration;

/// Trait for persisting ledger blocks
///
/// Implementations are only ever called from inside the ledger's critical
/// section, so they need `Send` but not `Sync`.
pub trait BlockStore: Send {
    /// The block with the highest sequence number
    fn tip(&self) -> Result<Option<Block>>;

    /// Persist a new block; fails if its sequence is already taken
    fn insert(&mut self, block: &Block) -> Result<()>;

    /// Get a block by sequence number
    fn get(&self, sequence: u64) -> Result<Option<Block>>;

    /// Blocks with `from <= sequence <= to`, ascending
    fn range(&self, from: u64, to: u64) -> Result<Vec<Block>>;

    /// Number of stored blocks
    fn count(&self) -> Result<u64>;

    /// Every block, ascending
    fn all(&self) -> Result<Vec<Block>> {
        self.range(0, u64::MAX)
    }
}

/// SQLite-backed block store
///
/// Use `:memory:` for a throwaway database.
///
/// # Examples
///
/// ```no_run
/// use veritas_ledger::SqliteBlockStore;
/// use std::time::Duration;
///
/// let store = SqliteBlockStore::open("ledger.db", Duration::from_secs(5)).unwrap();
/// ```
pub struct SqliteBlockStore {
    conn: Connection,
}

impl SqliteBlockStore {
    /// Open (or create) a ledger database
    ///
    /// `timeout` bounds how long a write waits on a locked database before
    /// failing with [`LedgerError::StorageUnavailable`].
    pub fn open<P: AsRef<Path>>(path: P, timeout: Duration) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(timeout)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn })
    }

    /// Open a private in-memory database
    pub fn in_memory() -> Result<Self> {
        Self::open(":memory:", Duration::from_secs(5))
    }

    fn row_to_block(row: &Row<'_>) -> rusqlite::Result<Block> {
        Ok(Block {
            sequence: row.get::<_, i64>(0)? as u64,
            previous_hash: row.get(1)?,
            content_root: row.get(2)?,
            timestamp: row.get(3)?,
            payload: row.get(4)?,
            block_hash: row.get(5)?,
        })
    }
}

// SQLite integers are signed; sequences past i64::MAX cannot exist.
fn to_sql_sequence(sequence: u64) -> i64 {
    i64::try_from(sequence).unwrap_or(i64::MAX)
}

const SELECT_BLOCK: &str =
    "SELECT sequence, previous_hash, content_root, timestamp, payload, block_hash FROM blocks";

impl BlockStore for SqliteBlockStore {
    fn tip(&self) -> Result<Option<Block>> {
        let block = self
            .conn
            .query_row(
                &format!("{} ORDER BY sequence DESC LIMIT 1", SELECT_BLOCK),
                [],
                Self::row_to_block,
            )
            .optional()?;
        Ok(block)
    }

    fn insert(&mut self, block: &Block) -> Result<()> {
        self.conn.execute(
            "INSERT INTO blocks (sequence, previous_hash, content_root, timestamp, payload, block_hash)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                to_sql_sequence(block.sequence),
                &block.previous_hash,
                &block.content_root,
                &block.timestamp,
                &block.payload,
                &block.block_hash,
            ],
        )?;
        Ok(())
    }

    fn get(&self, sequence: u64) -> Result<Option<Block>> {
        let block = self
            .conn
            .query_row(
                &format!("{} WHERE sequence = ?1", SELECT_BLOCK),
                params![to_sql_sequence(sequence)],
                Self::row_to_block,
            )
            .optional()?;
        Ok(block)
    }

    fn range(&self, from: u64, to: u64) -> Result<Vec<Block>> {
        let mut stmt = self.conn.prepare(&format!(
            "{} WHERE sequence >= ?1 AND sequence <= ?2 ORDER BY sequence ASC",
            SELECT_BLOCK
        ))?;
        let rows = stmt.query_map(
            params![to_sql_sequence(from), to_sql_sequence(to)],
            Self::row_to_block,
        )?;

        let mut blocks = Vec::new();
        for row in rows {
            blocks.push(row?);
        }
        Ok(blocks)
    }

    fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM blocks", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

/// Volatile block store, for tests and short-lived ledgers
#[derive(Debug, Clone, Default)]
pub struct MemoryBlockStore {
    blocks: Vec<Block>,
}

impl MemoryBlockStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing sequence of blocks, taken as-is
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Give back the stored blocks
    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}

impl BlockStore for MemoryBlockStore {
    fn tip(&self) -> Result<Option<Block>> {
        Ok(self.blocks.last().cloned())
    }

    fn insert(&mut self, block: &Block) -> Result<()> {
        let expected = self.blocks.len() as u64;
        if block.sequence != expected {
            return Err(LedgerError::StorageUnavailable(format!(
                "expected sequence {}, got {}",
                expected, block.sequence
            )));
        }
        self.blocks.push(block.clone());
        Ok(())
    }

    fn get(&self, sequence: u64) -> Result<Option<Block>> {
        Ok(self.blocks.iter().find(|b| b.sequence == sequence).cloned())
    }

    fn range(&self, from: u64, to: u64) -> Result<Vec<Block>> {
        Ok(self
            .blocks
            .iter()
            .filter(|b| b.sequence >= from && b.sequence <= to)
            .cloned()
            .collect())
    }

    fn count(&self) -> Result<u64> {
        Ok(self.blocks.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::GENESIS_HASH;

    fn block(sequence: u64) -> Block {
        Block::seal(sequence, GENESIS_HASH, b"{}".to_vec(), "2024-01-01T00:00:00Z")
    }

    #[test]
    fn test_sqlite_rejects_duplicate_sequence() {
        let mut store = SqliteBlockStore::in_memory().unwrap();
        store.insert(&block(0)).unwrap();

        let mut fork = block(0);
        fork.block_hash = "f".repeat(64);
        let err = store.insert(&fork).unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_sqlite_round_trip() {
        let mut store = SqliteBlockStore::in_memory().unwrap();
        assert!(store.tip().unwrap().is_none());

        let first = block(0);
        store.insert(&first).unwrap();
        assert_eq!(store.get(0).unwrap(), Some(first.clone()));
        assert_eq!(store.tip().unwrap(), Some(first));
        assert!(store.get(1).unwrap().is_none());
    }

    #[test]
    fn test_memory_rejects_gaps() {
        let mut store = MemoryBlockStore::new();
        assert!(store.insert(&block(1)).is_err());
        store.insert(&block(0)).unwrap();
        assert_eq!(store.all().unwrap().len(), 1);
    }
}
