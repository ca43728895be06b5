//! The consistency oracle

use crate::config::OracleConfig;
use crate::lexicon::{Family, Polarity, NEGATIONS};
use crate::statement::{split_conditional, Statement};
use std::collections::HashSet;

/// Heuristic gate over natural-language statements
///
/// Stateless apart from its configuration. Every check is a pure function
/// of its inputs and returns a plain value; nothing here fails.
///
/// Two statements conflict when either:
/// - exactly one is negated and the smaller set of content terms is
///   contained in the larger (at least two terms), or
/// - neither is negated, their first direction words point opposite ways,
///   they share at least `min_shared_subject_terms` subject terms, and their
///   objects overlap (or one has none).
#[derive(Debug, Clone)]
pub struct ConsistencyOracle {
    config: OracleConfig,
    negations: HashSet<String>,
}

impl Default for ConsistencyOracle {
    fn default() -> Self {
        Self::new(OracleConfig::default())
    }
}

impl ConsistencyOracle {
    /// Create an oracle with the given configuration
    pub fn new(config: OracleConfig) -> Self {
        let negations = NEGATIONS
            .iter()
            .map(|n| n.to_string())
            .chain(config.extra_negations.iter().map(|n| n.to_lowercase()))
            .collect();
        Self { config, negations }
    }

    /// The oracle's configuration
    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    fn parse(&self, text: &str) -> Statement {
        Statement::parse(text, &self.negations)
    }

    /// Whether a set of statements is free of detectable contradictions
    ///
    /// Empty and unparsable statements are vacuously consistent.
    ///
    /// # Examples
    ///
    /// ```
    /// use veritas_oracle::ConsistencyOracle;
    ///
    /// let oracle = ConsistencyOracle::default();
    /// assert!(!oracle.check_consistency(&["X increases with Y", "X does not increase with Y"]));
    /// assert!(oracle.check_consistency(&["X increases with Y", "Z decreases with W"]));
    /// ```
    pub fn check_consistency<S: AsRef<str>>(&self, statements: &[S]) -> bool {
        let parsed: Vec<Statement> = statements.iter().map(|s| self.parse(s.as_ref())).collect();

        for (i, a) in parsed.iter().enumerate() {
            for (j, b) in parsed.iter().enumerate().skip(i + 1) {
                if self.pair_conflicts(a, b) {
                    tracing::warn!(
                        "Contradiction detected: {:?} vs {:?}",
                        statements[i].as_ref(),
                        statements[j].as_ref()
                    );
                    return false;
                }
            }
        }

        tracing::debug!("{} statements consistent", statements.len());
        true
    }

    /// Whether two statements contradict each other
    pub fn conflicts_with(&self, a: &str, b: &str) -> bool {
        self.pair_conflicts(&self.parse(a), &self.parse(b))
    }

    /// Indices of the existing statements that contradict `candidate`
    pub fn find_conflicts<S: AsRef<str>>(&self, candidate: &str, existing: &[S]) -> Vec<usize> {
        let candidate = self.parse(candidate);
        existing
            .iter()
            .enumerate()
            .filter(|(_, s)| self.pair_conflicts(&candidate, &self.parse(s.as_ref())))
            .map(|(i, _)| i)
            .collect()
    }

    fn pair_conflicts(&self, a: &Statement, b: &Statement) -> bool {
        if a.is_empty() || b.is_empty() {
            return false;
        }
        if a.negated != b.negated {
            return Self::negation_conflict(a, b);
        }
        !a.negated && self.directional_conflict(a, b)
    }

    fn negation_conflict(a: &Statement, b: &Statement) -> bool {
        let (a, b) = (a.core_set(), b.core_set());
        let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
        small.len() >= 2 && small.is_subset(&large)
    }

    fn directional_conflict(&self, a: &Statement, b: &Statement) -> bool {
        let (Some(da), Some(db)) = (a.direction, b.direction) else {
            return false;
        };
        if da.polarity != db.polarity.opposite() {
            return false;
        }

        let shared_subject = a.subject().intersection(&b.subject()).count();
        if shared_subject < self.config.min_shared_subject_terms {
            return false;
        }

        let (oa, ob) = (a.object(), b.object());
        oa.is_empty() || ob.is_empty() || !oa.is_disjoint(&ob)
    }

    /// Whether `conclusion` follows from `premise`
    ///
    /// True when the premise is a conditional whose consequent has the same
    /// content terms as the conclusion, or when the conclusion's terms are
    /// a subset of the premise's and both agree on negation. Empty input is
    /// never a valid inference.
    pub fn validate_inference(&self, premise: &str, conclusion: &str) -> bool {
        let (p, c) = (self.parse(premise), self.parse(conclusion));
        if p.is_empty() || c.is_empty() {
            return false;
        }

        if let Some((_, consequent)) = split_conditional(premise) {
            let q = self.parse(&consequent);
            if q.negated == c.negated && q.core_set() == c.core_set() {
                tracing::debug!("Inference by modus ponens: {:?} -> {:?}", premise, conclusion);
                return true;
            }
        }

        let valid = p.negated == c.negated && c.core_set().is_subset(&p.core_set());
        tracing::debug!("Inference {:?} -> {:?}: {}", premise, conclusion, valid);
        valid
    }

    /// Statements implied by a hypothesis
    ///
    /// Produces the contrapositive of a conditional, a baseline comparison
    /// for magnitude language, and a metric direction for performance
    /// language. Direction words count even under a negation, so "X does
    /// not increase Y" still names the magnitude comparison to test.
    pub fn derive_implications(&self, hypothesis: &str) -> Vec<String> {
        let mut implications = Vec::new();

        if let Some((antecedent, consequent)) = split_conditional(hypothesis) {
            implications.push(format!("If not ({}) then not ({})", consequent, antecedent));
        }

        let parsed = self.parse(hypothesis);
        if parsed.has_family(Family::Magnitude, Polarity::Up) {
            implications.push("Magnitude will be greater than baseline".to_string());
        } else if parsed.has_family(Family::Magnitude, Polarity::Down) {
            implications.push("Magnitude will be less than baseline".to_string());
        }

        if parsed.has_family(Family::Performance, Polarity::Up) {
            implications.push("Performance metric will increase".to_string());
        } else if parsed.has_family(Family::Performance, Polarity::Down) {
            implications.push("Performance metric will decrease".to_string());
        }

        tracing::debug!("Derived {} implications", implications.len());
        implications
    }
}
