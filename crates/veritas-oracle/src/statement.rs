//! Tokenized statements

use crate::lexicon::{direction_of, stem, Family, Polarity, STOPWORDS};
use std::collections::{BTreeSet, HashSet};

/// Split text into lowercase word tokens
///
/// Letters, digits and apostrophes are kept together; everything else
/// separates tokens. Curly apostrophes are folded to `'`.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .replace('\u{2019}', "'")
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|t| t.trim_matches('\''))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// A direction word found in a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Direction {
    /// Index into `core`
    pub position: usize,
    pub polarity: Polarity,
}

/// What the oracle sees of a statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Statement {
    /// Odd number of negation tokens
    pub negated: bool,
    /// Stemmed content tokens, in order (no stopwords, no negations)
    pub core: Vec<String>,
    /// First direction word, if any
    pub direction: Option<Direction>,
}

impl Statement {
    pub fn parse(text: &str, negations: &HashSet<String>) -> Self {
        let mut negation_count = 0usize;
        let mut core = Vec::new();

        for token in tokenize(text) {
            if negations.contains(&token) {
                negation_count += 1;
            } else if !STOPWORDS.contains(&token.as_str()) {
                core.push(stem(&token));
            }
        }

        let direction = core.iter().enumerate().find_map(|(position, token)| {
            direction_of(token).map(|(polarity, _)| Direction { position, polarity })
        });

        Self {
            negated: negation_count % 2 == 1,
            core,
            direction,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }

    pub fn core_set(&self) -> BTreeSet<&str> {
        self.core.iter().map(String::as_str).collect()
    }

    /// Content tokens before the direction word
    pub fn subject(&self) -> BTreeSet<&str> {
        match self.direction {
            Some(d) => self.core[..d.position].iter().map(String::as_str).collect(),
            None => BTreeSet::new(),
        }
    }

    /// Content tokens after the direction word
    pub fn object(&self) -> BTreeSet<&str> {
        match self.direction {
            Some(d) => self.core[d.position + 1..]
                .iter()
                .map(String::as_str)
                .collect(),
            None => BTreeSet::new(),
        }
    }

    pub fn has_family(&self, family: Family, polarity: Polarity) -> bool {
        self.core.iter().any(|t| direction_of(t) == Some((polarity, family)))
    }
}

/// Split "if P then Q" or "if P, Q" into `(P, Q)`
pub(crate) fn split_conditional(text: &str) -> Option<(String, String)> {
    let lower = text.trim().trim_end_matches(['.', '!', '?']).to_lowercase();
    let rest = lower.strip_prefix("if ")?;

    let (antecedent, consequent) = match rest.split_once(" then ") {
        Some(parts) => parts,
        None => rest.split_once(',')?,
    };

    let antecedent = antecedent.trim().trim_end_matches(',').trim();
    let consequent = consequent.trim();
    let consequent = consequent
        .strip_prefix("then ")
        .unwrap_or(consequent)
        .trim();

    if antecedent.is_empty() || consequent.is_empty() {
        None
    } else {
        Some((antecedent.to_string(), consequent.to_string()))
    }
}
