//! Shared value types for morphological lookups and concordance tables.
//!
//! An [`Analysis`] is one reading of a surface token: the normal form it
//! reduces to plus its part-of-speech tag. Two analyses are considered the
//! same word when their `normalized_form` values are equal; nothing else is
//! compared. Analyses live in a dictionary arena and are referenced by
//! [`AnalysisId`].
//!
//! ```rust
//! use morph_types::{Analysis, Side, uppercase};
//!
//! let unk = Analysis::unknown(uppercase("Кот"));
//! assert_eq!(unk.normalized_form, "КОТ");
//! assert!(unk.is_unknown());
//! assert_eq!(Side::Left.to_string(), "Left");
//! ```

use std::fmt;

/// Part-of-speech tag attached to analyses synthesized for unseen tokens.
pub const UNKNOWN_POS: &str = "UNKW";

/// Case folding applied to every token before it touches the dictionary.
pub type Normalizer = fn(&str) -> String;

/// Default [`Normalizer`]: full Unicode uppercasing, independent of locale.
pub fn uppercase(token: &str) -> String {
    token.to_uppercase()
}

/// One morphological reading of a token.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Analysis {
    pub normalized_form: String,
    pub part_of_speech: String,
}

impl Analysis {
    pub fn new(normalized_form: impl Into<String>, part_of_speech: impl Into<String>) -> Self {
        Self {
            normalized_form: normalized_form.into(),
            part_of_speech: part_of_speech.into(),
        }
    }

    /// Placeholder reading for a token the dictionary has never seen.
    pub fn unknown(normalized_form: impl Into<String>) -> Self {
        Self::new(normalized_form, UNKNOWN_POS)
    }

    pub fn is_unknown(&self) -> bool {
        self.part_of_speech == UNKNOWN_POS
    }

    /// Equivalence used for matching and deduplication.
    pub fn same_form(&self, other: &Analysis) -> bool {
        self.normalized_form == other.normalized_form
    }
}

/// Stable index of an [`Analysis`] inside its owning dictionary.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct AnalysisId(pub u32);

impl AnalysisId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which side of a matched phrase a context was captured on.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Left => "Left",
            Side::Right => "Right",
        })
    }
}
