//! Knowledge store configuration

use serde::{Deserialize, Serialize};
use veritas_domain::{in_unit_range, SupportSummary};

/// Threshold a `SUPPORTED` hypothesis must exceed to become `WELL_SUPPORTED`
///
/// Applied to the supporting evidence only. Every comparison is strict: a
/// summary sitting exactly on a threshold does not pass.
///
/// # Examples
///
/// ```
/// use veritas_domain::SupportSummary;
/// use veritas_store::StoreConfig;
///
/// let config = StoreConfig::default();
/// let summary = SupportSummary {
///     count: 3,
///     mean_quality: 0.8,
///     mean_strength: 0.7,
///     mean_replicability: 0.5,
/// };
/// assert!(config.is_met_by(&summary));
/// assert!(!config.is_met_by(&SupportSummary { count: 2, ..summary }));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Number of supporting evidence records that must be exceeded
    pub supporting_evidence_threshold: usize,

    /// Mean quality score the supporting evidence must exceed
    pub quality_threshold: f64,

    /// Mean normalized strength the supporting evidence must exceed
    pub strength_threshold: f64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            supporting_evidence_threshold: 2,
            quality_threshold: 0.6,
            strength_threshold: 0.5,
        }
    }
}

impl StoreConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        // A mean can never exceed 1.0, so that threshold would be unreachable.
        if !in_unit_range(self.quality_threshold) || self.quality_threshold >= 1.0 {
            return Err("quality_threshold must be in [0, 1)".to_string());
        }
        if !in_unit_range(self.strength_threshold) || self.strength_threshold >= 1.0 {
            return Err("strength_threshold must be in [0, 1)".to_string());
        }
        Ok(())
    }

    /// Create a strict configuration (more evidence, higher quality)
    pub fn strict() -> Self {
        Self {
            supporting_evidence_threshold: 4,
            quality_threshold: 0.75,
            strength_threshold: 0.75,
        }
    }

    /// Create a lenient configuration (single good observation suffices)
    pub fn lenient() -> Self {
        Self {
            supporting_evidence_threshold: 0,
            quality_threshold: 0.3,
            strength_threshold: 0.25,
        }
    }

    /// Whether a support summary exceeds the threshold
    pub fn is_met_by(&self, summary: &SupportSummary) -> bool {
        summary.count > self.supporting_evidence_threshold
            && summary.mean_quality > self.quality_threshold
            && summary.mean_strength > self.strength_threshold
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
