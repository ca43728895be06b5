//! Evidence attached to hypotheses

use crate::{in_unit_range, now_millis, EntityId, Payload};
use serde::{Deserialize, Serialize};

/// Ordinal evidence strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthCategory {
    /// Suggestive at best
    Weak,
    /// Consistent with the claim
    Moderate,
    /// Clearly favours one reading
    Strong,
    /// Settles the question on its own
    Decisive,
}

impl StrengthCategory {
    /// Canonical numeric value for the category
    pub fn score(&self) -> f64 {
        match self {
            StrengthCategory::Weak => 0.25,
            StrengthCategory::Moderate => 0.5,
            StrengthCategory::Strong => 0.75,
            StrengthCategory::Decisive => 1.0,
        }
    }

    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthCategory::Weak => "weak",
            StrengthCategory::Moderate => "moderate",
            StrengthCategory::Strong => "strong",
            StrengthCategory::Decisive => "decisive",
        }
    }

    /// Parse a category from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "weak" => Some(StrengthCategory::Weak),
            "moderate" => Some(StrengthCategory::Moderate),
            "strong" => Some(StrengthCategory::Strong),
            "decisive" => Some(StrengthCategory::Decisive),
            _ => None,
        }
    }
}

/// Strength as supplied by the caller
///
/// Callers may use either representation. Comparisons always go through
/// [`EvidenceStrength::normalized`], so the two are never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum EvidenceStrength {
    /// One of the fixed ordinal categories
    Category(StrengthCategory),
    /// A numeric strength in [0, 1]
    Score(f64),
}

impl EvidenceStrength {
    /// Canonical numeric strength
    pub fn normalized(&self) -> f64 {
        match self {
            EvidenceStrength::Category(c) => c.score(),
            EvidenceStrength::Score(s) => *s,
        }
    }

    /// Whether a numeric strength lies in [0, 1]
    pub fn is_valid(&self) -> bool {
        match self {
            EvidenceStrength::Category(_) => true,
            EvidenceStrength::Score(s) => in_unit_range(*s),
        }
    }
}

impl From<StrengthCategory> for EvidenceStrength {
    fn from(category: StrengthCategory) -> Self {
        EvidenceStrength::Category(category)
    }
}

/// Which side of a hypothesis a piece of evidence lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceDirection {
    /// Favours the hypothesis
    Supporting,
    /// Counts against the hypothesis
    Disconfirming,
}

impl EvidenceDirection {
    /// Get the direction name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceDirection::Supporting => "supporting",
            EvidenceDirection::Disconfirming => "disconfirming",
        }
    }
}

/// An observation about exactly one hypothesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    /// Unique identifier
    pub id: EntityId,

    /// The hypothesis this evidence bears on
    pub hypothesis_id: EntityId,

    /// Opaque observation content
    pub content: Payload,

    /// Observation time (milliseconds since Unix epoch)
    pub timestamp: u64,

    /// How strongly it bears on the hypothesis
    pub strength: EvidenceStrength,

    /// Where it came from, commonly an experiment id
    pub source: String,

    /// Quality of the observation, in [0, 1]
    pub quality_score: f64,

    /// How readily it replicates, in [0, 1]
    pub replicability: f64,

    /// Non-negative effect size, when one was measured
    pub effect_size: Option<f64>,
}

impl Evidence {
    /// Create evidence with moderate strength and mid-range quality
    pub fn new(id: EntityId, hypothesis_id: EntityId, source: impl Into<String>) -> Self {
        Self {
            id,
            hypothesis_id,
            content: Payload::Null,
            timestamp: now_millis(),
            strength: EvidenceStrength::Category(StrengthCategory::Moderate),
            source: source.into(),
            quality_score: 0.5,
            replicability: 0.5,
            effect_size: None,
        }
    }

    /// Set the content payload
    pub fn with_content(mut self, content: Payload) -> Self {
        self.content = content;
        self
    }

    /// Set the strength
    pub fn with_strength(mut self, strength: impl Into<EvidenceStrength>) -> Self {
        self.strength = strength.into();
        self
    }

    /// Set quality and replicability
    pub fn with_quality(mut self, quality_score: f64, replicability: f64) -> Self {
        self.quality_score = quality_score;
        self.replicability = replicability;
        self
    }

    /// Set the effect size
    pub fn with_effect_size(mut self, effect_size: f64) -> Self {
        self.effect_size = Some(effect_size);
        self
    }

    /// Explain why this evidence is malformed, if it is
    pub fn validation_error(&self) -> Option<String> {
        if self.id.is_blank() {
            return Some("evidence id is blank".to_string());
        }
        if !self.content.is_finite() {
            return Some("content holds a non-finite number".to_string());
        }
        if !self.strength.is_valid() {
            return Some(format!(
                "strength {} outside [0, 1]",
                self.strength.normalized()
            ));
        }
        if !in_unit_range(self.quality_score) {
            return Some(format!("quality_score {} outside [0, 1]", self.quality_score));
        }
        if !in_unit_range(self.replicability) {
            return Some(format!("replicability {} outside [0, 1]", self.replicability));
        }
        match self.effect_size {
            Some(e) if !e.is_finite() || e < 0.0 => {
                Some(format!("effect_size {} must be finite and non-negative", e))
            }
            _ => None,
        }
    }
}
