//! Ledger configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the ledger lives and how long storage may block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// SQLite database path (`:memory:` for a private in-memory database)
    pub path: String,

    /// Maximum wait on a locked database, in milliseconds
    pub storage_timeout_ms: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: ":memory:".to_string(),
            storage_timeout_ms: 5_000,
        }
    }
}

impl LedgerConfig {
    /// Persist to a file
    pub fn at_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Storage timeout as a `Duration`
    pub fn storage_timeout(&self) -> Duration {
        Duration::from_millis(self.storage_timeout_ms)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("path must not be empty".to_string());
        }
        if self.storage_timeout_ms == 0 {
            return Err("storage_timeout_ms must be greater than 0".to_string());
        }
        Ok(())
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
        let config = LedgerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.storage_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = LedgerConfig {
            storage_timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = LedgerConfig::from_toml("path = \"veritas.db\"").unwrap();
        assert_eq!(config.path, "veritas.db");
        assert_eq!(config.storage_timeout_ms, 5_000);

        let round = LedgerConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(round, config);
    }
}
