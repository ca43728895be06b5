//! Frontier estimator configuration

use serde::{Deserialize, Serialize};
use veritas_domain::{in_unit_range, Scores};

/// Limits, placeholder scores and priority weights for frontier work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontierConfig {
    /// Concepts considered when enumerating candidate triples
    pub max_concepts: usize,

    /// Upper bound on candidate triples considered per call
    pub max_candidates: usize,

    /// Scores given to generated hypotheses
    pub placeholder_scores: Scores,

    /// Weight of estimated testability in region priority
    pub testability_weight: f64,

    /// Weight of estimated novelty in region priority
    pub novelty_weight: f64,

    /// Weight of estimated resource availability in region priority
    pub resource_weight: f64,

    /// Statements shown per region
    pub region_sample_size: usize,

    /// Regions returned at most
    pub max_regions: usize,

    /// Experiments on a concept pair at which resources count as fully available
    pub resource_saturation: usize,

    /// Priority of the adjacent-concepts region
    pub adjacent_priority: f64,

    /// Priority of the contradiction-space region
    pub contradiction_priority: f64,
}

impl Default for FrontierConfig {
    fn default() -> Self {
        Self {
            max_concepts: 10,
            max_candidates: 50,
            placeholder_scores: Scores::new(0.3, 0.5, 0.9, 0.7),
            testability_weight: 0.40,
            novelty_weight: 0.35,
            resource_weight: 0.25,
            region_sample_size: 3,
            max_regions: 3,
            resource_saturation: 5,
            adjacent_priority: 0.7,
            contradiction_priority: 0.6,
        }
    }
}

impl FrontierConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concepts < 2 {
            return Err("max_concepts must be at least 2".to_string());
        }
        if self.max_candidates == 0 {
            return Err("max_candidates must be greater than 0".to_string());
        }
        if !self.placeholder_scores.is_valid() {
            return Err("placeholder_scores must be in [0, 1]".to_string());
        }
        let weights = [self.testability_weight, self.novelty_weight, self.resource_weight];
        if !weights.iter().all(|w| in_unit_range(*w)) {
            return Err("priority weights must be in [0, 1]".to_string());
        }
        if (weights.iter().sum::<f64>() - 1.0).abs() > 1e-6 {
            return Err("priority weights must sum to 1".to_string());
        }
        if self.region_sample_size == 0 || self.max_regions == 0 {
            return Err("region_sample_size and max_regions must be greater than 0".to_string());
        }
        if self.resource_saturation == 0 {
            return Err("resource_saturation must be greater than 0".to_string());
        }
        if !in_unit_range(self.adjacent_priority) || !in_unit_range(self.contradiction_priority) {
            return Err("region priorities must be in [0, 1]".to_string());
        }
        Ok(())
    }

    /// Explore wider: more concepts and more candidates per call
    pub fn aggressive() -> Self {
        Self {
            max_concepts: 25,
            max_candidates: 500,
            ..Default::default()
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(FrontierConfig::default().validate().is_ok());
        assert!(FrontierConfig::aggressive().validate().is_ok());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let config = FrontierConfig {
            resource_weight: 0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_region_priorities_in_range() {
        let config = FrontierConfig {
            contradiction_priority: 1.2,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = FrontierConfig::default();
        let toml_str = config.to_toml().unwrap();
        assert_eq!(FrontierConfig::from_toml(&toml_str).unwrap(), config);
    }
}
