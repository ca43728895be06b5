//! Veritas Knowledge Store
//!
//! Implements the `KnowledgeStore` trait from `veritas-domain`.
//!
//! # Architecture
//!
//! - [`InMemoryStore`] owns hypotheses, experiments, evidence and theories
//!   and enforces identity, validation and lifecycle rules
//! - [`AuditedStore`] wraps any store and records each accepted mutation in
//!   a provenance ledger before applying it
//! - [`StoreConfig`] holds the `WELL_SUPPORTED` evidence threshold
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use veritas_domain::{EntityId, Hypothesis, KnowledgeStore};
//! use veritas_ledger::Ledger;
//! use veritas_store::{AuditedStore, InMemoryStore};
//!
//! let ledger = Arc::new(Ledger::in_memory());
//! let mut store = AuditedStore::new(InMemoryStore::default(), ledger.clone());
//!
//! let h = Hypothesis::new(EntityId::new("h1"), "Heat speeds reactions", "chem")
//!     .with_variable("cause", "heat")
//!     .with_relationship("speeds");
//! store.admit_hypothesis(h).unwrap();
//! assert_eq!(ledger.len().unwrap(), 1);
//! ```

#![warn(missing_docs)]

mod audited;
mod config;
mod error;
mod memory;

pub use audited::AuditedStore;
pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
