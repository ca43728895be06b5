//! Experiment designs and their externally produced outcomes

use crate::{EntityId, Payload};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A test design for one hypothesis
///
/// Veritas never runs experiments. `results` and `analysis` stay `None`
/// until the execution environment reports back through the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    /// Unique identifier
    pub id: EntityId,

    /// The hypothesis under test
    pub hypothesis_id: EntityId,

    /// Free-form keyed configuration
    pub design: BTreeMap<String, Payload>,

    /// Condition labels
    pub conditions: Vec<String>,

    /// Control-variable labels
    pub controls: Vec<String>,

    /// Measurement names
    pub measurements: Vec<String>,

    /// Number of samples (must be positive)
    pub sample_size: u32,

    /// Randomization procedure
    pub randomization: String,

    /// Statistical tests to be applied
    pub statistical_tests: Vec<String>,

    /// Raw results, once executed
    pub results: Option<Payload>,

    /// Interpretation of the results, once executed
    pub analysis: Option<Payload>,
}

impl Experiment {
    /// Create an experiment with no conditions or measurements yet
    pub fn new(id: EntityId, hypothesis_id: EntityId, sample_size: u32) -> Self {
        Self {
            id,
            hypothesis_id,
            design: BTreeMap::new(),
            conditions: Vec::new(),
            controls: Vec::new(),
            measurements: Vec::new(),
            sample_size,
            randomization: "simple".to_string(),
            statistical_tests: Vec::new(),
            results: None,
            analysis: None,
        }
    }

    /// Add a design entry
    pub fn with_design(mut self, key: impl Into<String>, value: impl Into<Payload>) -> Self {
        self.design.insert(key.into(), value.into());
        self
    }

    /// Add a condition label
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.conditions.push(condition.into());
        self
    }

    /// Add a control-variable label
    pub fn with_control(mut self, control: impl Into<String>) -> Self {
        self.controls.push(control.into());
        self
    }

    /// Add a measurement name
    pub fn with_measurement(mut self, measurement: impl Into<String>) -> Self {
        self.measurements.push(measurement.into());
        self
    }

    /// Add a statistical test name
    pub fn with_statistical_test(mut self, test: impl Into<String>) -> Self {
        self.statistical_tests.push(test.into());
        self
    }

    /// Whether results have been reported
    pub fn is_executed(&self) -> bool {
        self.results.is_some()
    }

    /// Explain why this design is malformed, if it is
    pub fn validation_error(&self) -> Option<String> {
        if self.id.is_blank() {
            Some("experiment id is blank".to_string())
        } else if self.sample_size == 0 {
            Some("sample_size must be positive".to_string())
        } else if self.conditions.is_empty() {
            Some("at least one condition is required".to_string())
        } else if self.measurements.is_empty() {
            Some("at least one measurement is required".to_string())
        } else if let Some((key, _)) = self.design.iter().find(|(_, v)| !v.is_finite()) {
            Some(format!("design entry {} holds a non-finite number", key))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation() {
        let base = Experiment::new(EntityId::new("e1"), EntityId::new("h1"), 30);
        assert!(base.validation_error().is_some());

        let complete = base
            .clone()
            .with_condition("treatment")
            .with_measurement("latency_ms");
        assert_eq!(complete.validation_error(), None);

        let mut zero = complete.clone();
        zero.sample_size = 0;
        assert!(zero.validation_error().unwrap().contains("sample_size"));

        let unbounded = complete.with_design("alpha", f64::INFINITY);
        assert!(unbounded.validation_error().unwrap().contains("alpha"));
    }

    #[test]
    fn test_not_executed_until_results() {
        let mut e = Experiment::new(EntityId::new("e1"), EntityId::new("h1"), 10)
            .with_design("arms", 2i64);
        assert!(!e.is_executed());
        e.results = Some(Payload::from(0.92));
        assert!(e.is_executed());
    }
}
