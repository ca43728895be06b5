//! Priority scoring of candidate triples and the regions built from them

use serde::{Deserialize, Serialize};
use std::fmt;
use veritas_domain::EntityId;

/// Priority bucket of a frontier region
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityBand {
    /// Priority at least 0.75
    High,
    /// Priority at least 0.5
    Medium,
    /// Everything else
    Low,
}

impl PriorityBand {
    /// Band for a priority score
    pub fn for_priority(priority: f64) -> Self {
        if priority >= 0.75 {
            PriorityBand::High
        } else if priority >= 0.5 {
            PriorityBand::Medium
        } else {
            PriorityBand::Low
        }
    }

    /// Get the band name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityBand::High => "high",
            PriorityBand::Medium => "medium",
            PriorityBand::Low => "low",
        }
    }

    fn summary(&self) -> &'static str {
        match self {
            PriorityBand::High => "Testable, little-explored pairings with experimental capacity",
            PriorityBand::Medium => "Promising pairings held back by testability or resources",
            PriorityBand::Low => "Speculative pairings with little to test them against",
        }
    }
}

impl fmt::Display for PriorityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a frontier region is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    /// Untried (concept, relationship, concept) triples of one priority band
    UnexploredCombinations,
    /// Terms that appear inside relationship labels but never as a concept
    AdjacentConcepts,
    /// Negations of hypotheses the evidence currently supports
    ContradictionSpace,
}

impl RegionKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RegionKind::UnexploredCombinations => "unexplored_combinations",
            RegionKind::AdjacentConcepts => "adjacent_concepts",
            RegionKind::ContradictionSpace => "contradiction_space",
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scored (concept, relationship, concept) candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// Rendered statement
    pub statement: String,
    /// Mean testability of hypotheses touching either concept
    pub testability: f64,
    /// One minus the share of those hypotheses touching both concepts
    pub novelty: f64,
    /// Experiments already run on either concept, relative to saturation
    pub resources: f64,
    /// Weighted sum of the three estimates
    pub priority: f64,
}

/// A promising area of the unexplored space
///
/// Advisory only: nothing is admitted from a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighValueRegion {
    /// Region identifier
    pub id: EntityId,
    /// What the region is made of
    pub kind: RegionKind,
    /// Priority band
    pub band: PriorityBand,
    /// Human-readable summary
    pub description: String,
    /// Mean priority of the candidates in the region
    pub mean_priority: f64,
    /// Number of candidates in the region
    pub candidate_count: usize,
    /// Representative statements or terms, best first
    pub sample: Vec<String>,
}

impl HighValueRegion {
    /// Region with a fixed priority, outside the banded candidate buckets
    pub(crate) fn fixed(
        kind: RegionKind,
        description: String,
        priority: f64,
        candidate_count: usize,
        sample: Vec<String>,
    ) -> Self {
        Self {
            id: EntityId::generate("hvr"),
            kind,
            band: PriorityBand::for_priority(priority),
            description,
            mean_priority: priority,
            candidate_count,
            sample,
        }
    }
}

/// Group scored candidates into regions, best band first
pub(crate) fn bucket(
    mut candidates: Vec<ScoredCandidate>,
    sample_size: usize,
) -> Vec<HighValueRegion> {
    candidates.sort_by(|a, b| {
        b.priority
            .total_cmp(&a.priority)
            .then_with(|| a.statement.cmp(&b.statement))
    });

    let mut regions = Vec::new();
    for band in [PriorityBand::High, PriorityBand::Medium, PriorityBand::Low] {
        let members: Vec<&ScoredCandidate> = candidates
            .iter()
            .filter(|c| PriorityBand::for_priority(c.priority) == band)
            .collect();
        if members.is_empty() {
            continue;
        }

        let mean_priority = members.iter().map(|c| c.priority).sum::<f64>() / members.len() as f64;
        regions.push(HighValueRegion {
            id: EntityId::generate("hvr"),
            kind: RegionKind::UnexploredCombinations,
            band,
            description: format!("{} ({} candidates)", band.summary(), members.len()),
            mean_priority,
            candidate_count: members.len(),
            sample: members
                .iter()
                .take(sample_size)
                .map(|c| c.statement.clone())
                .collect(),
        });
    }

    regions
}

/// Order regions by priority, best first, and keep at most `max_regions`
pub(crate) fn rank(mut regions: Vec<HighValueRegion>, max_regions: usize) -> Vec<HighValueRegion> {
    regions.sort_by(|a, b| b.mean_priority.total_cmp(&a.mean_priority));
    regions.truncate(max_regions);
    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(statement: &str, priority: f64) -> ScoredCandidate {
        ScoredCandidate {
            statement: statement.to_string(),
            testability: 0.0,
            novelty: 0.0,
            resources: 0.0,
            priority,
        }
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(PriorityBand::for_priority(0.75), PriorityBand::High);
        assert_eq!(PriorityBand::for_priority(0.749), PriorityBand::Medium);
        assert_eq!(PriorityBand::for_priority(0.5), PriorityBand::Medium);
        assert_eq!(PriorityBand::for_priority(0.1), PriorityBand::Low);
    }

    #[test]
    fn test_bucket_orders_bands_and_samples() {
        let regions = bucket(
            vec![
                candidate("c low", 0.2),
                candidate("b high", 0.8),
                candidate("a high", 0.9),
                candidate("d high", 0.8),
            ],
            2,
        );

        assert_eq!(regions.len(), 2);
        assert!(regions
            .iter()
            .all(|r| r.kind == RegionKind::UnexploredCombinations));
        assert_eq!(regions[0].band, PriorityBand::High);
        assert_eq!(regions[0].candidate_count, 3);
        assert_eq!(regions[0].sample, vec!["a high".to_string(), "b high".to_string()]);
        assert_eq!(regions[1].band, PriorityBand::Low);
    }

    #[test]
    fn test_rank_interleaves_fixed_regions() {
        let mut regions = bucket(
            vec![candidate("a", 0.9), candidate("b", 0.6), candidate("c", 0.1)],
            3,
        );
        regions.push(HighValueRegion::fixed(
            RegionKind::ContradictionSpace,
            "negations".to_string(),
            0.65,
            1,
            vec!["a affects b".to_string()],
        ));

        let ranked = rank(regions, 3);
        let kinds: Vec<RegionKind> = ranked.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RegionKind::UnexploredCombinations,
                RegionKind::ContradictionSpace,
                RegionKind::UnexploredCombinations,
            ]
        );
        assert_eq!(ranked[1].band, PriorityBand::Medium);
        assert_eq!(ranked[2].band, PriorityBand::Medium);
    }

    #[test]
    fn test_rank_respects_max_regions() {
        let regions = bucket(
            vec![candidate("a", 0.9), candidate("b", 0.6), candidate("c", 0.1)],
            3,
        );
        let ranked = rank(regions, 1);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].band, PriorityBand::High);
    }
}
