//! Configuration file parsing for the lab
//!
//! One TOML file with a section per subsystem. Every section is optional
//! and falls back to its defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use veritas_auditor::AuditorConfig;
use veritas_frontier::FrontierConfig;
use veritas_ledger::LedgerConfig;
use veritas_oracle::OracleConfig;
use veritas_store::StoreConfig;

/// Lab configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A section holds an out-of-range value
    #[error("Invalid [{section}] configuration: {message}")]
    Invalid {
        /// Offending section
        section: &'static str,
        /// What is wrong with it
        message: String,
    },
}

/// Configuration for every subsystem of a lab
///
/// # Examples
///
/// ```
/// use veritas_lab::LabConfig;
///
/// let config = LabConfig::from_toml(r#"
///     [store]
///     supporting_evidence_threshold = 5
///
///     [auditor]
///     interval_secs = 60
/// "#).unwrap();
///
/// assert_eq!(config.store.supporting_evidence_threshold, 5);
/// assert_eq!(config.ledger.path, ":memory:");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// `WELL_SUPPORTED` threshold
    pub store: StoreConfig,

    /// Ledger location and storage timeout
    pub ledger: LedgerConfig,

    /// Consistency heuristics
    pub oracle: OracleConfig,

    /// Coverage and candidate generation
    pub frontier: FrontierConfig,

    /// Periodic chain verification
    pub auditor: AuditorConfig,
}

impl LabConfig {
    /// Load and validate configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: LabConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid =
            |section: &'static str| move |message: String| ConfigError::Invalid { section, message };

        self.store.validate().map_err(invalid("store"))?;
        self.ledger.validate().map_err(invalid("ledger"))?;
        self.oracle.validate().map_err(invalid("oracle"))?;
        self.frontier.validate().map_err(invalid("frontier"))?;
        self.auditor.validate().map_err(invalid("auditor"))?;
        Ok(())
    }

    /// Same configuration with the ledger persisted at `path`
    pub fn with_ledger_path(mut self, path: impl Into<String>) -> Self {
        self.ledger.path = path.into();
        self
    }
}
