//! Veritas Lab
//!
//! The explicitly constructed context an orchestrator drives: one
//! knowledge store, its provenance ledger, the consistency oracle gating
//! admissions, and the frontier estimator reading the store.
//!
//! # Architecture
//!
//! ```text
//!              ┌──────────────── Lab ────────────────┐
//!  mutations ─>│ RwLock<AuditedStore<InMemoryStore>> │──append──> Arc<Ledger>
//!              │ ConsistencyOracle (admission gate)  │               ▲
//!  queries ───>│ FrontierEstimator (read lock)       │               │
//!              └─────────────────────────────────────┘        AuditorWorker
//! ```
//!
//! Nothing here is a process-wide singleton: every lab owns its store and
//! holds its ledger by `Arc`.
//!
//! # Examples
//!
//! ```no_run
//! use veritas_lab::{init_tracing, Lab, LabConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! init_tracing("info");
//! let config = LabConfig::from_file("veritas.toml")?;
//! let lab = Lab::open(config)?;
//!
//! for candidate in lab.generate_frontier("biology", 5)? {
//!     lab.admit_hypothesis(candidate)?;
//! }
//! println!("coverage: {:.2}", lab.coverage("biology")?.coverage);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod lab;
mod telemetry;

pub use config::{ConfigError, LabConfig};
pub use error::{LabError, Result};
pub use lab::Lab;
pub use telemetry::init_tracing;
