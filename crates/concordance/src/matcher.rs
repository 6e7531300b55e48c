//! Phrase matching over a token stream using morphological equivalence.

use morph_dict::Dictionary;

/// Whether two normalized tokens have at least one reading with the same
/// normal form. Unseen keys are resolved (and cached) as `UNKW`.
pub fn share_common_form(dict: &mut Dictionary, a: &str, b: &str) -> bool {
    dict.resolve(a);
    dict.resolve(b);
    let (Some(left), Some(right)) = (dict.get(a), dict.get(b)) else {
        return false;
    };
    left.iter().any(|l| {
        right
            .iter()
            .any(|r| dict.analysis(*l).same_form(dict.analysis(*r)))
    })
}

/// Outcome of feeding one token to a [`PhraseMatcher`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchEvent {
    /// No match in progress and the token does not start one.
    Idle,
    /// The token extended a partial match.
    Advanced,
    /// The token completed the phrase; the matcher is back at position 0.
    Completed,
    /// A partial match broke off on this token.
    Abandoned,
}

/// Forward-only state machine over the target phrase. Never backtracks: the
/// token that breaks a partial match is not retried against the first
/// phrase token.
#[derive(Clone, Debug)]
pub struct PhraseMatcher {
    phrase: Vec<String>,
    position: usize,
}

impl PhraseMatcher {
    /// `phrase` holds normalized keys and must not be empty.
    pub fn new(phrase: Vec<String>) -> Self {
        debug_assert!(!phrase.is_empty());
        Self {
            phrase,
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn phrase_len(&self) -> usize {
        self.phrase.len()
    }

    pub fn step(&mut self, key: &str, dict: &mut Dictionary) -> MatchEvent {
        if share_common_form(dict, key, &self.phrase[self.position]) {
            self.position += 1;
            if self.position == self.phrase.len() {
                self.position = 0;
                MatchEvent::Completed
            } else {
                MatchEvent::Advanced
            }
        } else if self.position > 0 {
            self.position = 0;
            MatchEvent::Abandoned
        } else {
            MatchEvent::Idle
        }
    }
}
