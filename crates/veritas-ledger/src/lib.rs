//! Veritas Provenance Ledger
//!
//! A tamper-evident, append-only log of every auditable event in Veritas.
//!
//! ## Overview
//!
//! Each block carries the hash of its predecessor, a SHA-256 digest of its
//! canonically encoded payload (`content_root`), an RFC 3339 timestamp, and
//! its own hash over `(previous_hash, content_root, timestamp)`. Changing
//! any stored byte breaks either the block's own hash or the link from the
//! next block, which [`Ledger::verify_chain`] detects.
//!
//! ## Architecture
//!
//! - `canonical`: sorted-key JSON encoding and digests
//! - `block`: the block record
//! - `storage`: the [`BlockStore`] trait with SQLite and in-memory backends
//! - `ledger`: append, verification and provenance reads behind one mutex
//!
//! The ledger does not know the store's types. Anything `Serialize` can be
//! appended.
//!
//! ## Examples
//!
//! ```
//! use veritas_ledger::{Ledger, LedgerConfig};
//!
//! let ledger = Ledger::open(&LedgerConfig::default()).unwrap();
//! ledger.append(&("transition_status", "h1", "TESTING")).unwrap();
//! assert_eq!(ledger.len().unwrap(), 1);
//! ```

#![warn(missing_docs)]

mod block;
mod canonical;
mod config;
mod error;
mod ledger;
mod storage;

pub use block::{timestamp_now, Block};
pub use canonical::{canonical_bytes, compute_block_hash, digest, GENESIS_HASH};
pub use config::LedgerConfig;
pub use error::{LedgerError, Result};
pub use ledger::{ChainReport, Ledger};
pub use storage::{BlockStore, MemoryBlockStore, SqliteBlockStore};
