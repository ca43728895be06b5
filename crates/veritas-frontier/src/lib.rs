//! Veritas Frontier Estimator
//!
//! Estimates how much of a domain's hypothesis space has been explored and
//! proposes new hypotheses from the combinations nobody has tried yet.
//!
//! ## Overview
//!
//! Concepts are the distinct variable values of a domain's hypotheses;
//! relationship types are their distinct relationship labels. The space is
//! estimated as `concepts² × relationships × domains observed`. Candidate
//! hypotheses come from (concept, relationship, concept) triples that no
//! existing hypothesis already covers.
//!
//! ## Examples
//!
//! ```
//! use veritas_domain::{EntityId, Hypothesis, KnowledgeStore};
//! use veritas_frontier::FrontierEstimator;
//! use veritas_store::InMemoryStore;
//!
//! let mut store = InMemoryStore::default();
//! store.admit_hypothesis(
//!     Hypothesis::new(EntityId::new("h1"), "A affects B", "d")
//!         .with_variable("cause", "A")
//!         .with_variable("effect", "B")
//!         .with_relationship("affects"),
//! ).unwrap();
//!
//! let snapshot = FrontierEstimator::default().map_coverage(&store, "d").unwrap();
//! assert_eq!(snapshot.total_estimated, 4);
//! ```

#![warn(missing_docs)]

mod config;
mod coverage;
mod estimator;
mod regions;

pub use config::FrontierConfig;
pub use coverage::{estimate_total, CoverageSnapshot};
pub use estimator::FrontierEstimator;
pub use regions::{HighValueRegion, PriorityBand, RegionKind, ScoredCandidate};
