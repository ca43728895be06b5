//! Word lists and stemming
//!
//! Every lexicon entry is stored in its stemmed form, so lookups must go
//! through [`stem`] first.

/// Words with no bearing on what a statement claims
pub(crate) const STOPWORDS: &[&str] = &[
    "a", "an", "the", "of", "to", "in", "on", "at", "by", "for", "with", "from", "as", "and",
    "or", "is", "are", "was", "were", "be", "been", "being", "do", "does", "did", "will",
    "would", "shall", "should", "can", "could", "may", "might", "must", "has", "have", "had",
    "that", "this", "these", "those", "it", "its", "if", "then", "than", "when", "while",
];

/// Tokens that negate the clause they appear in
pub(crate) const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nor", "neither", "cannot", "can't", "don't", "doesn't",
    "didn't", "isn't", "aren't", "wasn't", "weren't", "won't", "wouldn't", "shouldn't",
    "couldn't",
];

/// Upward change in a quantity
const MAGNITUDE_UP: &[&str] = &[
    "increase", "raise", "rise", "grow", "elevate", "accelerate", "expand",
];

/// Downward change in a quantity
const MAGNITUDE_DOWN: &[&str] = &[
    "decrease", "lower", "decline", "drop", "shrink", "diminish", "slow", "fall",
];

/// Change for the better
const PERFORMANCE_UP: &[&str] = &["improve", "better", "enhance", "boost"];

/// Change for the worse
const PERFORMANCE_DOWN: &[&str] = &["degrade", "worse", "reduce", "impair", "worsen"];

/// Which way a direction word points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// More, higher, better
    Up,
    /// Less, lower, worse
    Down,
}

impl Polarity {
    /// The opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Polarity::Up => Polarity::Down,
            Polarity::Down => Polarity::Up,
        }
    }
}

/// Whether a direction word talks about size or about quality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// increase, decrease, ...
    Magnitude,
    /// improve, degrade, ...
    Performance,
}

/// Classify a stemmed token as a direction word
pub(crate) fn direction_of(stemmed: &str) -> Option<(Polarity, Family)> {
    let lists = [
        (MAGNITUDE_UP, Polarity::Up, Family::Magnitude),
        (MAGNITUDE_DOWN, Polarity::Down, Family::Magnitude),
        (PERFORMANCE_UP, Polarity::Up, Family::Performance),
        (PERFORMANCE_DOWN, Polarity::Down, Family::Performance),
    ];
    lists
        .iter()
        .find(|(words, _, _)| words.iter().any(|w| stem(w) == stemmed))
        .map(|(_, polarity, family)| (*polarity, *family))
}

/// Reduce a lowercase word to a crude stem
///
/// Strips one of `ing`, `ed`, `es`, `s`, then a doubled final consonant
/// left behind by `ing`/`ed`, then a trailing `e`. A stem never drops below
/// three characters, and `ss` endings are kept.
pub fn stem(word: &str) -> String {
    const MIN: usize = 3;
    let mut s = word.to_string();

    let mut stripped_suffix = false;
    for suffix in ["ing", "ed", "es", "s"] {
        if suffix == "s" && s.ends_with("ss") {
            break;
        }
        if s.len() >= suffix.len() + MIN && s.ends_with(suffix) {
            s.truncate(s.len() - suffix.len());
            stripped_suffix = suffix == "ing" || suffix == "ed";
            break;
        }
    }

    if stripped_suffix && s.len() > MIN {
        let bytes = s.as_bytes();
        let (last, prev) = (bytes[bytes.len() - 1], bytes[bytes.len() - 2]);
        if last == prev && !matches!(last, b'l' | b's' | b'z') && last.is_ascii_alphabetic() {
            s.pop();
        }
    }

    if s.len() > MIN && s.ends_with('e') {
        s.pop();
    }
    s
}
