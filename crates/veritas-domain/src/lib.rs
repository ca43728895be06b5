//! Veritas Domain Layer
//!
//! This crate contains the domain model shared by every other Veritas crate:
//! the entities tracked by the knowledge store, their identifiers, the
//! hypothesis lifecycle, and the trait boundary the store implements.
//!
//! ## Key Concepts
//!
//! - **Hypothesis**: A testable claim with four scores and a lifecycle status
//! - **Evidence**: An observation supporting or disconfirming one hypothesis
//! - **Experiment**: A test design whose results are produced externally
//! - **Theory**: An aggregate over hypotheses and evidence
//! - **Mutation**: A single state change, also the payload recorded in the ledger
//!
//! ## Architecture
//!
//! - Pure domain logic, no I/O
//! - Only `uuid` (identifier generation) and `serde` (ledger payloads) as dependencies
//! - The store implementation lives in `veritas-store`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod evidence;
pub mod experiment;
pub mod hypothesis;
pub mod id;
pub mod mutation;
pub mod payload;
pub mod status;
pub mod support;
pub mod theory;
pub mod traits;

// Re-exports for convenience
pub use evidence::{Evidence, EvidenceDirection, EvidenceStrength, StrengthCategory};
pub use experiment::Experiment;
pub use hypothesis::{Hypothesis, Scores};
pub use id::EntityId;
pub use mutation::Mutation;
pub use payload::Payload;
pub use status::HypothesisStatus;
pub use support::SupportSummary;
pub use theory::{Theory, TheoryScores};
pub use traits::{HypothesisQuery, KnowledgeStore};

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Whether a score lies in the closed unit interval (NaN is rejected)
pub fn in_unit_range(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}
