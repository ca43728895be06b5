//! Configuration for chain audits

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How often the ledger is verified and what a failed verification does
///
/// # Examples
///
/// ```
/// use veritas_auditor::AuditorConfig;
///
/// let config = AuditorConfig::default();
/// assert_eq!(config.interval_secs, 300);
/// assert!(config.halt_on_tamper);
///
/// let config = AuditorConfig::strict();
/// assert_eq!(config.interval_secs, 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditorConfig {
    /// Seconds between verifications
    /// Default: 300 (five minutes)
    pub interval_secs: u64,

    /// Stop the worker with an error at the first failed verification
    /// Default: true
    pub halt_on_tamper: bool,
}

impl Default for AuditorConfig {
    fn default() -> Self {
        Self {
            interval_secs: 300,
            halt_on_tamper: true,
        }
    }
}

impl AuditorConfig {
    /// Verify every minute and halt on tampering
    pub fn strict() -> Self {
        Self {
            interval_secs: 60,
            halt_on_tamper: true,
        }
    }

    /// Verify hourly and keep running after tampering is reported
    pub fn lenient() -> Self {
        Self {
            interval_secs: 3_600,
            halt_on_tamper: false,
        }
    }

    /// Verification interval as a `Duration`
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.interval_secs == 0 {
            return Err("interval_secs must be greater than 0".to_string());
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
