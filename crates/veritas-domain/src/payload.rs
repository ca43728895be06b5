//! Opaque, domain-specific values carried by entities
//!
//! Evidence content, experiment designs and experiment results are free-form
//! in the domain. They are modelled as an explicitly tagged union so the
//! store can carry anything a caller needs while its own logic stays typed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A free-form value with explicit tagging on the wire
///
/// Maps use `BTreeMap` so that two logically equal payloads always
/// serialize to the same bytes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Payload {
    /// No value
    #[default]
    Null,

    /// Boolean flag
    Bool(bool),

    /// Signed integer
    Integer(i64),

    /// Floating point number
    Float(f64),

    /// UTF-8 text
    Text(String),

    /// Ordered list of values
    List(Vec<Payload>),

    /// String-keyed record
    Map(BTreeMap<String, Payload>),
}

impl Payload {
    /// Build a map payload from key/value pairs
    ///
    /// # Examples
    ///
    /// ```
    /// use veritas_domain::Payload;
    ///
    /// let p = Payload::map([("success_rate", Payload::Float(0.92))]);
    /// assert_eq!(p.get("success_rate"), Some(&Payload::Float(0.92)));
    /// ```
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Payload)>,
    {
        Payload::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Look up a key if this is a map
    pub fn get(&self, key: &str) -> Option<&Payload> {
        match self {
            Payload::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Payload::Integer(i) => Some(*i as f64),
            Payload::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Whether the payload carries no value
    pub fn is_null(&self) -> bool {
        matches!(self, Payload::Null)
    }

    /// Whether every number in the payload is finite
    ///
    /// NaN and the infinities have no JSON form, so a payload holding one
    /// cannot be recorded faithfully.
    ///
    /// # Examples
    ///
    /// ```
    /// use veritas_domain::Payload;
    ///
    /// assert!(Payload::from(0.5).is_finite());
    /// assert!(!Payload::from(vec![1.0, f64::NAN]).is_finite());
    /// ```
    pub fn is_finite(&self) -> bool {
        match self {
            Payload::Float(f) => f.is_finite(),
            Payload::List(items) => items.iter().all(Payload::is_finite),
            Payload::Map(map) => map.values().all(Payload::is_finite),
            _ => true,
        }
    }
}

impl From<bool> for Payload {
    fn from(value: bool) -> Self {
        Payload::Bool(value)
    }
}

impl From<i64> for Payload {
    fn from(value: i64) -> Self {
        Payload::Integer(value)
    }
}

impl From<f64> for Payload {
    fn from(value: f64) -> Self {
        Payload::Float(value)
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::Text(value.to_string())
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::Text(value)
    }
}

impl<T: Into<Payload>> From<Vec<T>> for Payload {
    fn from(values: Vec<T>) -> Self {
        Payload::List(values.into_iter().map(Into::into).collect())
    }
}
