//! The frontier estimator

use crate::config::FrontierConfig;
use crate::coverage::{concepts_of, CoverageSnapshot, DomainView};
use crate::regions::{bucket, rank, HighValueRegion, RegionKind, ScoredCandidate};
use std::collections::BTreeSet;
use veritas_domain::{EntityId, Hypothesis, HypothesisStatus, KnowledgeStore};

/// An untried (concept, relationship, concept) combination
#[derive(Debug, Clone, PartialEq, Eq)]
struct Triple {
    subject: String,
    relationship: String,
    object: String,
    statement: String,
}

/// Estimates coverage and proposes hypotheses from unexplored combinations
///
/// Reads store state only. Generated hypotheses are returned to the caller
/// and are never admitted here.
#[derive(Debug, Clone, Default)]
pub struct FrontierEstimator {
    config: FrontierConfig,
}

impl FrontierEstimator {
    /// Create an estimator with the given configuration
    pub fn new(config: FrontierConfig) -> Self {
        Self { config }
    }

    /// The estimator's configuration
    pub fn config(&self) -> &FrontierConfig {
        &self.config
    }

    /// Coverage of the hypothesis space in one domain
    pub fn map_coverage<S: KnowledgeStore>(
        &self,
        store: &S,
        domain: &str,
    ) -> Result<CoverageSnapshot, S::Error> {
        let snapshot = DomainView::load(store, domain)?.snapshot();
        tracing::info!(
            "Coverage of '{}': {}/{} ({:.2}%)",
            domain,
            snapshot.explored_count,
            snapshot.total_estimated,
            snapshot.coverage * 100.0
        );
        Ok(snapshot)
    }

    /// Up to `count` new `PROPOSED` hypotheses from unexplored triples
    ///
    /// A candidate never repeats an existing statement of the domain, and
    /// never restates a concept pair an existing hypothesis already links
    /// with the same relationship.
    pub fn generate_frontier<S: KnowledgeStore>(
        &self,
        store: &S,
        domain: &str,
        count: usize,
    ) -> Result<Vec<Hypothesis>, S::Error> {
        let view = DomainView::load(store, domain)?;
        let scores = self.config.placeholder_scores;

        let generated: Vec<Hypothesis> = self
            .unexplored_triples(&view)
            .into_iter()
            .take(count)
            .map(|t| {
                Hypothesis::new(EntityId::generate("h_frontier"), t.statement, domain)
                    .with_variable("subject", t.subject)
                    .with_variable("object", t.object)
                    .with_relationship(t.relationship)
                    .with_scores(scores)
            })
            .collect();

        tracing::info!("Generated {} frontier hypotheses for '{}'", generated.len(), domain);
        Ok(generated)
    }

    /// Promising regions of the unexplored space, best first
    ///
    /// Candidate triples are bucketed into priority bands. Two fixed-priority
    /// regions join them when they have members: terms found only inside
    /// relationship labels, and the negations of currently supported
    /// hypotheses.
    pub fn identify_high_value_regions<S: KnowledgeStore>(
        &self,
        store: &S,
        domain: &str,
    ) -> Result<Vec<HighValueRegion>, S::Error> {
        let view = DomainView::load(store, domain)?;
        let triples = self.unexplored_triples(&view);

        let mut scored = Vec::with_capacity(triples.len());
        for triple in triples {
            scored.push(self.score(store, &view, triple)?);
        }

        let mut regions = bucket(scored, self.config.region_sample_size);
        regions.extend(self.adjacent_region(&view));
        regions.extend(self.contradiction_region(&view));

        let regions = rank(regions, self.config.max_regions);
        tracing::debug!("Identified {} high-value regions in '{}'", regions.len(), domain);
        Ok(regions)
    }

    fn adjacent_region(&self, view: &DomainView) -> Option<HighValueRegion> {
        let adjacent = adjacent_concepts(view);
        if adjacent.is_empty() {
            return None;
        }

        Some(HighValueRegion::fixed(
            RegionKind::AdjacentConcepts,
            format!(
                "Terms named in relationships but never studied as concepts ({} terms)",
                adjacent.len()
            ),
            self.config.adjacent_priority,
            adjacent.len().saturating_mul(view.concepts.len().max(1)),
            adjacent
                .into_iter()
                .take(self.config.region_sample_size)
                .collect(),
        ))
    }

    fn contradiction_region(&self, view: &DomainView) -> Option<HighValueRegion> {
        let supported: Vec<&Hypothesis> = view
            .hypotheses
            .iter()
            .filter(|h| {
                matches!(
                    h.status,
                    HypothesisStatus::Supported | HypothesisStatus::WellSupported
                )
            })
            .collect();
        if supported.is_empty() {
            return None;
        }

        Some(HighValueRegion::fixed(
            RegionKind::ContradictionSpace,
            format!(
                "Negations of supported hypotheses ({} hypotheses)",
                supported.len()
            ),
            self.config.contradiction_priority,
            supported.len(),
            supported
                .iter()
                .take(self.config.region_sample_size)
                .map(|h| h.statement.clone())
                .collect(),
        ))
    }

    fn unexplored_triples(&self, view: &DomainView) -> Vec<Triple> {
        let concepts: Vec<&String> = view.concepts.iter().take(self.config.max_concepts).collect();
        let mut seen = BTreeSet::new();
        let mut triples = Vec::new();

        'outer: for (i, subject) in concepts.iter().enumerate() {
            for object in &concepts[i + 1..] {
                for relationship in &view.relationships {
                    if triples.len() >= self.config.max_candidates {
                        break 'outer;
                    }
                    let statement =
                        format!("{} {} {}", subject, relationship.replace('_', " "), object);
                    if view.has_statement(&statement)
                        || view.has_triple(subject, relationship, object)
                        || !seen.insert(statement.clone())
                    {
                        continue;
                    }
                    triples.push(Triple {
                        subject: subject.to_string(),
                        relationship: relationship.clone(),
                        object: object.to_string(),
                        statement,
                    });
                }
            }
        }
        triples
    }

    fn score<S: KnowledgeStore>(
        &self,
        store: &S,
        view: &DomainView,
        triple: Triple,
    ) -> Result<ScoredCandidate, S::Error> {
        let mut either = 0usize;
        let mut both = 0usize;
        let mut testability_sum = 0.0;
        let mut experiments = 0usize;

        for h in &view.hypotheses {
            let concepts = concepts_of(h);
            let has_subject = concepts.contains(&triple.subject);
            let has_object = concepts.contains(&triple.object);
            if !(has_subject || has_object) {
                continue;
            }
            either += 1;
            if has_subject && has_object {
                both += 1;
            }
            testability_sum += h.scores.testability;
            experiments += store.experiments_for(&h.id)?.len();
        }

        let (testability, novelty) = if either == 0 {
            (self.config.placeholder_scores.testability, 1.0)
        } else {
            (
                testability_sum / either as f64,
                1.0 - both as f64 / either as f64,
            )
        };
        let resources = (experiments as f64 / self.config.resource_saturation as f64).min(1.0);
        let priority = self.config.testability_weight * testability
            + self.config.novelty_weight * novelty
            + self.config.resource_weight * resources;

        Ok(ScoredCandidate {
            statement: triple.statement,
            testability,
            novelty,
            resources,
            priority,
        })
    }
}

/// Words of multi-word relationship labels that are neither a concept nor a
/// label of their own; words of three letters or fewer are skipped
fn adjacent_concepts(view: &DomainView) -> BTreeSet<String> {
    view.relationships
        .iter()
        .flat_map(|label| {
            let words: Vec<&str> = label.split(|c: char| c == '_' || c.is_whitespace()).collect();
            let compound = words.iter().filter(|w| !w.is_empty()).count() > 1;
            words
                .into_iter()
                .filter(move |w| compound && w.chars().count() > 3)
        })
        .filter(|w| !view.concepts.contains(*w) && !view.relationships.contains(*w))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::PriorityBand;
    use veritas_domain::Scores;
    use veritas_store::InMemoryStore;

    fn h1() -> Hypothesis {
        Hypothesis::new(EntityId::new("h1"), "A affects B", "d")
            .with_variable("cause", "A")
            .with_variable("effect", "B")
            .with_relationship("affects")
    }

    #[test]
    fn test_h1_scenario() {
        let mut store = InMemoryStore::default();
        store.admit_hypothesis(h1()).unwrap();
        let estimator = FrontierEstimator::default();

        let snapshot = estimator.map_coverage(&store, "d").unwrap();
        assert_eq!(snapshot.explored_count, 1);
        assert_eq!(snapshot.total_estimated, 4);
        assert_eq!(snapshot.coverage, 0.25);

        let h2 = Hypothesis::new(EntityId::new("h2"), "C affects A", "d")
            .with_variable("cause", "C")
            .with_variable("effect", "A")
            .with_relationship("affects");
        store.admit_hypothesis(h2).unwrap();

        let snapshot = estimator.map_coverage(&store, "d").unwrap();
        assert_eq!(snapshot.explored_count, 2);
        assert_eq!(snapshot.total_estimated, 9);
        assert!((snapshot.coverage - 2.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_domain_has_zero_coverage() {
        let store = InMemoryStore::default();
        let snapshot = FrontierEstimator::default().map_coverage(&store, "d").unwrap();
        assert_eq!(snapshot.total_estimated, 0);
        assert_eq!(snapshot.coverage, 0.0);
    }

    #[test]
    fn test_other_domains_widen_the_space() {
        let mut store = InMemoryStore::default();
        store.admit_hypothesis(h1()).unwrap();
        let mut elsewhere = h1();
        elsewhere.id = EntityId::new("h9");
        elsewhere.domain = "e".to_string();
        store.admit_hypothesis(elsewhere).unwrap();

        let snapshot = FrontierEstimator::default().map_coverage(&store, "d").unwrap();
        assert_eq!(snapshot.domains_observed, 2);
        assert_eq!(snapshot.total_estimated, 8);
    }

    #[test]
    fn test_generated_candidates() {
        let mut store = InMemoryStore::default();
        store.admit_hypothesis(h1()).unwrap();
        let h2 = Hypothesis::new(EntityId::new("h2"), "B influences C", "d")
            .with_variable("cause", "B")
            .with_variable("effect", "C")
            .with_relationship("influences");
        store.admit_hypothesis(h2).unwrap();

        let generated = FrontierEstimator::default()
            .generate_frontier(&store, "d", 10)
            .unwrap();
        let statements: Vec<&str> = generated.iter().map(|h| h.statement.as_str()).collect();

        // (a, b) already linked by "affects"; (b, c) already linked by "influences".
        assert_eq!(
            statements,
            vec![
                "a influences b",
                "a affects c",
                "a influences c",
                "b affects c",
            ]
        );
        for h in &generated {
            assert_eq!(h.status, HypothesisStatus::Proposed);
            assert_eq!(h.domain, "d");
            assert_eq!(h.scores, Scores::new(0.3, 0.5, 0.9, 0.7));
            assert!(h.id.as_str().starts_with("h_frontier_"));
        }
    }

    #[test]
    fn test_generate_respects_count() {
        let mut store = InMemoryStore::default();
        store.admit_hypothesis(h1()).unwrap();
        let h2 = Hypothesis::new(EntityId::new("h2"), "C affects D", "d")
            .with_variable("cause", "C")
            .with_variable("effect", "D")
            .with_relationship("affects");
        store.admit_hypothesis(h2).unwrap();

        let estimator = FrontierEstimator::default();
        assert_eq!(estimator.generate_frontier(&store, "d", 2).unwrap().len(), 2);
        assert!(estimator.generate_frontier(&store, "d", 0).unwrap().is_empty());
    }

    #[test]
    fn test_regions() {
        let mut store = InMemoryStore::default();
        store.admit_hypothesis(h1()).unwrap();
        let h2 = Hypothesis::new(EntityId::new("h2"), "C affects D", "d")
            .with_variable("cause", "C")
            .with_variable("effect", "D")
            .with_relationship("affects");
        store.admit_hypothesis(h2).unwrap();

        let estimator = FrontierEstimator::default();
        let regions = estimator.identify_high_value_regions(&store, "d").unwrap();
        assert!(!regions.is_empty());

        let total: usize = regions
            .iter()
            .filter(|r| r.kind == RegionKind::UnexploredCombinations)
            .map(|r| r.candidate_count)
            .sum();
        assert_eq!(total, 4);
        // Single-word labels name no adjacent terms; nothing is supported yet.
        assert!(regions
            .iter()
            .all(|r| r.kind == RegionKind::UnexploredCombinations));
        for region in &regions {
            assert!(region.sample.len() <= estimator.config().region_sample_size);
            assert!(region.mean_priority >= 0.0 && region.mean_priority <= 1.0);
        }
    }

    #[test]
    fn test_adjacent_concepts_region() {
        let mut store = InMemoryStore::default();
        let h = Hypothesis::new(EntityId::new("h1"), "Load depends on temperature", "d")
            .with_variable("cause", "load")
            .with_variable("effect", "throughput")
            .with_relationship("depends_on_temperature")
            .with_relationship("limits");
        store.admit_hypothesis(h).unwrap();

        let regions = FrontierEstimator::default()
            .identify_high_value_regions(&store, "d")
            .unwrap();
        let adjacent = regions
            .iter()
            .find(|r| r.kind == RegionKind::AdjacentConcepts)
            .unwrap();

        // "on" is too short; single-word labels name nothing adjacent.
        assert_eq!(adjacent.sample, vec!["depends".to_string(), "temperature".to_string()]);
        assert_eq!(adjacent.candidate_count, 4);
        assert_eq!(adjacent.mean_priority, 0.7);
    }

    #[test]
    fn test_contradiction_space_region() {
        let mut store = InMemoryStore::default();
        store.admit_hypothesis(h1()).unwrap();
        let estimator = FrontierEstimator::default();

        let regions = estimator.identify_high_value_regions(&store, "d").unwrap();
        assert!(!regions.iter().any(|r| r.kind == RegionKind::ContradictionSpace));

        let id = EntityId::new("h1");
        store.transition_status(&id, HypothesisStatus::Testing).unwrap();
        store.transition_status(&id, HypothesisStatus::Supported).unwrap();

        let regions = estimator.identify_high_value_regions(&store, "d").unwrap();
        let contradiction = regions
            .iter()
            .find(|r| r.kind == RegionKind::ContradictionSpace)
            .unwrap();
        assert_eq!(contradiction.candidate_count, 1);
        assert_eq!(contradiction.sample, vec!["A affects B".to_string()]);
        assert_eq!(contradiction.band, PriorityBand::Medium);
    }

    #[test]
    fn test_regions_capped_and_ranked() {
        let mut store = InMemoryStore::default();
        store.admit_hypothesis(h1()).unwrap();
        let h2 = Hypothesis::new(EntityId::new("h2"), "C affects D", "d")
            .with_variable("cause", "C")
            .with_variable("effect", "D")
            .with_relationship("affects");
        store.admit_hypothesis(h2).unwrap();
        let id = EntityId::new("h2");
        store.transition_status(&id, HypothesisStatus::Testing).unwrap();
        store.transition_status(&id, HypothesisStatus::Supported).unwrap();

        let estimator = FrontierEstimator::new(FrontierConfig {
            max_regions: 1,
            ..Default::default()
        });

        let regions = estimator.identify_high_value_regions(&store, "d").unwrap();
        assert_eq!(regions.len(), 1);

        let all = FrontierEstimator::default()
            .identify_high_value_regions(&store, "d")
            .unwrap();
        assert!(all.len() > 1);
        assert!(all
            .windows(2)
            .all(|w| w[0].mean_priority >= w[1].mean_priority));
    }
}
