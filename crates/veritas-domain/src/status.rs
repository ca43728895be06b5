//! Hypothesis lifecycle

use serde::{Deserialize, Serialize};

/// Status of a hypothesis in its validation lifecycle
///
/// ```text
/// PROPOSED -> TESTING -> SUPPORTED -> WELL_SUPPORTED
///                    \-> REFUTED
/// any non-terminal   --> DISCARDED
/// ```
///
/// `REFUTED` and `DISCARDED` are terminal. A hypothesis must be tested
/// before it can be judged, so nothing leaves `PROPOSED` except `TESTING`
/// and `DISCARDED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HypothesisStatus {
    /// Admitted, not yet under test
    Proposed,

    /// Under active experimental test
    Testing,

    /// Test results favour the hypothesis
    Supported,

    /// Supported, and accumulated evidence meets the store's threshold
    WellSupported,

    /// Test results contradict the hypothesis (terminal)
    Refuted,

    /// Withdrawn without a verdict (terminal)
    Discarded,
}

impl HypothesisStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            HypothesisStatus::Proposed => "PROPOSED",
            HypothesisStatus::Testing => "TESTING",
            HypothesisStatus::Supported => "SUPPORTED",
            HypothesisStatus::WellSupported => "WELL_SUPPORTED",
            HypothesisStatus::Refuted => "REFUTED",
            HypothesisStatus::Discarded => "DISCARDED",
        }
    }

    /// Parse a status from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PROPOSED" => Some(HypothesisStatus::Proposed),
            "TESTING" => Some(HypothesisStatus::Testing),
            "SUPPORTED" => Some(HypothesisStatus::Supported),
            "WELL_SUPPORTED" => Some(HypothesisStatus::WellSupported),
            "REFUTED" => Some(HypothesisStatus::Refuted),
            "DISCARDED" => Some(HypothesisStatus::Discarded),
            _ => None,
        }
    }

    /// Whether no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, HypothesisStatus::Refuted | HypothesisStatus::Discarded)
    }

    /// Whether the hypothesis still counts as live knowledge
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// Whether the edge `self -> next` exists in the state machine
    ///
    /// This only checks the graph. The evidence threshold guarding
    /// `SUPPORTED -> WELL_SUPPORTED` is enforced by the store.
    pub fn can_transition_to(&self, next: HypothesisStatus) -> bool {
        use HypothesisStatus::*;

        if self.is_terminal() {
            return false;
        }
        if next == Discarded {
            return true;
        }

        matches!(
            (self, next),
            (Proposed, Testing)
                | (Testing, Supported)
                | (Testing, Refuted)
                | (Supported, WellSupported)
        )
    }

    /// All statuses, in lifecycle order
    pub fn all() -> [HypothesisStatus; 6] {
        use HypothesisStatus::*;
        [Proposed, Testing, Supported, WellSupported, Refuted, Discarded]
    }
}

impl std::fmt::Display for HypothesisStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HypothesisStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid hypothesis status: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use HypothesisStatus::*;

    #[test]
    fn test_must_test_before_judging() {
        assert!(Proposed.can_transition_to(Testing));
        assert!(!Proposed.can_transition_to(Supported));
        assert!(!Proposed.can_transition_to(Refuted));
        assert!(!Proposed.can_transition_to(WellSupported));
    }

    #[test]
    fn test_verdicts_from_testing() {
        assert!(Testing.can_transition_to(Supported));
        assert!(Testing.can_transition_to(Refuted));
        assert!(!Testing.can_transition_to(WellSupported));
        assert!(!Testing.can_transition_to(Proposed));
    }

    #[test]
    fn test_well_supported_only_from_supported() {
        assert!(Supported.can_transition_to(WellSupported));
        for from in [Proposed, Testing, WellSupported, Refuted, Discarded] {
            assert!(!from.can_transition_to(WellSupported), "{} -> WELL_SUPPORTED", from);
        }
    }

    #[test]
    fn test_discard_from_any_live_state() {
        for from in [Proposed, Testing, Supported, WellSupported] {
            assert!(from.can_transition_to(Discarded));
        }
    }

    #[test]
    fn test_parse_round_trip() {
        for status in HypothesisStatus::all() {
            assert_eq!(HypothesisStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(HypothesisStatus::parse("well_supported"), Some(WellSupported));
        assert!("bogus".parse::<HypothesisStatus>().is_err());
    }
}
