//! Veritas Chain Auditor
//!
//! Periodic integrity verification of the provenance ledger.
//!
//! # Overview
//!
//! The auditor re-walks the hash chain on its own schedule, independent of
//! the writers appending to it:
//! - **Single audits**: [`ChainAuditor::audit`] verifies once and reports
//!   the first bad block
//! - **Background worker**: [`AuditorWorker`] audits on a `tokio` interval
//!   until Ctrl+C
//! - **Metrics**: pass/tamper/failure counts in [`AuditMetrics`]
//!
//! # Usage
//!
//! ## One-time Audit
//!
//! ```
//! use std::sync::Arc;
//! use veritas_auditor::ChainAuditor;
//! use veritas_ledger::Ledger;
//!
//! let ledger = Arc::new(Ledger::in_memory());
//! ledger.append(&("record_experiment", "e1")).unwrap();
//!
//! let mut auditor = ChainAuditor::new(ledger, Default::default());
//! assert!(auditor.audit().unwrap().valid);
//! println!("{}", auditor.metrics().summary());
//! ```
//!
//! ## Background Worker
//!
//! ```no_run
//! use std::sync::Arc;
//! use veritas_auditor::{AuditorConfig, AuditorWorker};
//! use veritas_ledger::{Ledger, LedgerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ledger = Arc::new(Ledger::open(&LedgerConfig::at_path("veritas.db"))?);
//!     let mut worker = AuditorWorker::new(ledger, AuditorConfig::strict())?;
//!     worker.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [auditor]
//! interval_secs = 300
//! halt_on_tamper = true
//! ```

#![warn(missing_docs)]

mod auditor;
mod config;
mod error;
mod metrics;
mod worker;

pub use auditor::ChainAuditor;
pub use config::AuditorConfig;
pub use error::AuditorError;
pub use metrics::AuditMetrics;
pub use worker::AuditorWorker;
