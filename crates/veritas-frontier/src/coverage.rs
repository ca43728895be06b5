//! Coverage of the hypothesis space

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use veritas_domain::hypothesis::normalize_statement;
use veritas_domain::{Hypothesis, HypothesisQuery, KnowledgeStore};

/// How much of a domain's hypothesis space has been explored
///
/// Derived on request and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageSnapshot {
    /// Domain the snapshot describes
    pub domain: String,
    /// Hypotheses admitted in the domain, any status
    pub explored_count: usize,
    /// Distinct concepts in the domain
    pub concept_count: usize,
    /// Distinct relationship labels in the domain
    pub relationship_count: usize,
    /// Distinct domains across the whole store
    pub domains_observed: usize,
    /// `concepts² × relationships × domains_observed`
    pub total_estimated: u64,
    /// `explored / total`, capped at 1, and 0 when the total is 0
    pub coverage: f64,
}

impl CoverageSnapshot {
    /// Hypothesis slots not yet explored
    pub fn unexplored(&self) -> u64 {
        self.total_estimated
            .saturating_sub(self.explored_count as u64)
    }
}

/// Size of the hypothesis space for the given counts
pub fn estimate_total(concepts: usize, relationships: usize, domains: usize) -> u64 {
    let c = concepts as u64;
    c.saturating_mul(c)
        .saturating_mul(relationships as u64)
        .saturating_mul(domains as u64)
}

/// Everything the estimator reads from one domain
#[derive(Debug, Clone, Default)]
pub(crate) struct DomainView {
    pub domain: String,
    pub hypotheses: Vec<Hypothesis>,
    pub concepts: BTreeSet<String>,
    pub relationships: BTreeSet<String>,
    pub statements: BTreeSet<String>,
    pub domains_observed: usize,
}

impl DomainView {
    pub fn load<S: KnowledgeStore>(store: &S, domain: &str) -> Result<Self, S::Error> {
        let hypotheses = store.query_hypotheses(&HypothesisQuery::in_domain(domain))?;
        let domains_observed = store.domains()?.len();

        let mut view = DomainView {
            domain: domain.to_string(),
            domains_observed,
            ..Default::default()
        };
        for h in &hypotheses {
            view.concepts.extend(concepts_of(h));
            view.relationships.extend(
                h.relationships
                    .iter()
                    .map(|r| normalize_label(r))
                    .filter(|r| !r.is_empty()),
            );
            view.statements.insert(h.normalized_statement());
        }
        view.hypotheses = hypotheses;
        Ok(view)
    }

    pub fn snapshot(&self) -> CoverageSnapshot {
        let explored_count = self.hypotheses.len();
        let total_estimated = estimate_total(
            self.concepts.len(),
            self.relationships.len(),
            self.domains_observed,
        );
        let coverage = if total_estimated == 0 {
            0.0
        } else {
            (explored_count as f64 / total_estimated as f64).min(1.0)
        };

        CoverageSnapshot {
            domain: self.domain.clone(),
            explored_count,
            concept_count: self.concepts.len(),
            relationship_count: self.relationships.len(),
            domains_observed: self.domains_observed,
            total_estimated,
            coverage,
        }
    }

    /// Whether some hypothesis already pairs these concepts under this label
    pub fn has_triple(&self, a: &str, relationship: &str, b: &str) -> bool {
        self.hypotheses.iter().any(|h| {
            let concepts = concepts_of(h);
            concepts.contains(a)
                && concepts.contains(b)
                && h.relationships.iter().any(|r| normalize_label(r) == relationship)
        })
    }

    pub fn has_statement(&self, statement: &str) -> bool {
        self.statements.contains(&normalize_statement(statement))
    }
}

/// Concepts a hypothesis talks about: its normalized variable values
pub(crate) fn concepts_of(h: &Hypothesis) -> BTreeSet<String> {
    h.variables
        .values()
        .map(|v| normalize_label(v))
        .filter(|v| !v.is_empty())
        .collect()
}

pub(crate) fn normalize_label(label: &str) -> String {
    normalize_statement(label)
}
