//! Aggregate view over the evidence supporting a hypothesis

use crate::Evidence;
use serde::{Deserialize, Serialize};

/// Count and means over a set of evidence
///
/// Means are 0.0 when `count` is zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SupportSummary {
    /// Number of pieces of evidence
    pub count: usize,
    /// Mean `quality_score`
    pub mean_quality: f64,
    /// Mean normalized strength
    pub mean_strength: f64,
    /// Mean `replicability`
    pub mean_replicability: f64,
}

impl SupportSummary {
    /// Summarize a set of evidence
    ///
    /// # Examples
    ///
    /// ```
    /// use veritas_domain::{Evidence, EntityId, SupportSummary};
    ///
    /// let ev = Evidence::new(EntityId::new("ev1"), EntityId::new("h1"), "exp1")
    ///     .with_quality(0.8, 0.6);
    /// let summary = SupportSummary::from_evidence([&ev]);
    /// assert_eq!(summary.count, 1);
    /// assert_eq!(summary.mean_quality, 0.8);
    /// ```
    pub fn from_evidence<'a, I>(evidence: I) -> Self
    where
        I: IntoIterator<Item = &'a Evidence>,
    {
        let mut summary = SupportSummary::default();
        let (mut quality, mut strength, mut replicability) = (0.0, 0.0, 0.0);

        for ev in evidence {
            summary.count += 1;
            quality += ev.quality_score;
            strength += ev.strength.normalized();
            replicability += ev.replicability;
        }

        if summary.count > 0 {
            let n = summary.count as f64;
            summary.mean_quality = quality / n;
            summary.mean_strength = strength / n;
            summary.mean_replicability = replicability / n;
        }

        summary
    }
}
