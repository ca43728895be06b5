//! Entity identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for any stored entity
///
/// Identifiers are plain strings so that callers may bring their own naming
/// scheme (`"h_timeout_fix"`). Generated identifiers are a short prefix
/// followed by a UUIDv7, which keeps them chronologically sortable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Wrap an existing identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use veritas_domain::EntityId;
    ///
    /// let id = EntityId::new("h_1");
    /// assert_eq!(id.as_str(), "h_1");
    /// ```
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generate a fresh identifier with the given prefix
    ///
    /// # Examples
    ///
    /// ```
    /// use veritas_domain::EntityId;
    ///
    /// let id = EntityId::generate("h");
    /// assert!(id.as_str().starts_with("h_"));
    /// ```
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{}_{}", prefix, uuid::Uuid::now_v7().simple()))
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
