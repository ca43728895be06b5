//! Veritas Consistency Oracle
//!
//! A heuristic gate that rejects statement sets containing obvious
//! contradictions, checks simple inferences, and derives the implications
//! of a hypothesis. It is not a theorem prover: it works over tokenized
//! statements with a fixed set of patterns.
//!
//! ## Patterns
//!
//! - **Negation**: one statement negates another ("X increases with Y" /
//!   "X does not increase with Y")
//! - **Opposed direction**: both talk about the same subject changing in
//!   opposite directions ("Load raises latency" / "Load lowers latency")
//! - **Conditionals**: "if P then Q" and "if P, Q"
//!
//! ## Examples
//!
//! ```
//! use veritas_oracle::ConsistencyOracle;
//!
//! let oracle = ConsistencyOracle::default();
//! assert!(oracle.conflicts_with("Caching reduces latency", "Caching does not reduce latency"));
//! assert!(oracle.validate_inference("If load rises, latency rises", "latency rises"));
//! ```

#![warn(missing_docs)]

mod config;
mod lexicon;
mod oracle;
mod statement;

pub use config::OracleConfig;
pub use lexicon::{stem, Family, Polarity};
pub use oracle::ConsistencyOracle;
pub use statement::tokenize;
