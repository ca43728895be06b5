//! Oracle configuration

use serde::{Deserialize, Serialize};

/// Tuning for the consistency checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Subject terms two opposed statements must share to conflict
    pub min_shared_subject_terms: usize,

    /// Extra negation tokens on top of the built-in list
    pub extra_negations: Vec<String>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            min_shared_subject_terms: 1,
            extra_negations: Vec::new(),
        }
    }
}

impl OracleConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.min_shared_subject_terms == 0 {
            return Err("min_shared_subject_terms must be greater than 0".to_string());
        }
        if let Some(bad) = self
            .extra_negations
            .iter()
            .find(|n| n.trim().is_empty() || n.chars().any(char::is_whitespace))
        {
            return Err(format!("extra negation {:?} must be a single word", bad));
        }
        Ok(())
    }

    /// Require more overlap before flagging opposed statements
    pub fn lenient() -> Self {
        Self {
            min_shared_subject_terms: 2,
            extra_negations: Vec::new(),
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
        assert!(OracleConfig::default().validate().is_ok());
        assert!(OracleConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_multiword_negation_rejected() {
        let config = OracleConfig {
            extra_negations: vec!["by no means".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml() {
        let config = OracleConfig::from_toml("extra_negations = [\"nein\"]").unwrap();
        assert_eq!(config.min_shared_subject_terms, 1);
        assert_eq!(config.extra_negations, vec!["nein".to_string()]);
    }
}
