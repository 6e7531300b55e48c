use crate::error::ConfigError;
use crate::tokenizer::tokenize;

/// Largest accepted context width on either side of a match.
pub const MAX_WINDOW_SIZE: usize = 1024;

/// Validated search parameters for one concordance run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConcordanceConfig {
    phrase: Vec<String>,
    window_size: usize,
    frequency_threshold: u32,
}

impl ConcordanceConfig {
    pub fn new(
        phrase: Vec<String>,
        window_size: usize,
        frequency_threshold: u32,
    ) -> Result<Self, ConfigError> {
        if phrase.is_empty() {
            return Err(ConfigError::EmptyPhrase);
        }
        if let Some(bad) = phrase.iter().find(|token| !is_single_word(token)) {
            return Err(ConfigError::InvalidPhraseToken(bad.clone()));
        }
        let too_large = ConfigError::WindowTooLarge {
            window_size,
            max: MAX_WINDOW_SIZE,
        };
        if window_size > MAX_WINDOW_SIZE {
            return Err(too_large);
        }
        let right_len = window_size.checked_add(phrase.len()).ok_or(too_large)?;
        if right_len - 1 == 0 {
            return Err(ConfigError::DegenerateWindow {
                window_size,
                phrase_len: phrase.len(),
            });
        }
        if frequency_threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        Ok(Self {
            phrase,
            window_size,
            frequency_threshold,
        })
    }

    /// Build from a whitespace-separated phrase such as `"разработка продукта"`.
    pub fn from_phrase(
        raw: &str,
        window_size: usize,
        frequency_threshold: u32,
    ) -> Result<Self, ConfigError> {
        Self::new(parse_phrase(raw), window_size, frequency_threshold)
    }

    pub fn phrase(&self) -> &[String] {
        &self.phrase
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn frequency_threshold(&self) -> u32 {
        self.frequency_threshold
    }

    /// Tokens kept behind the current one: `window_size + phrase_len - 1`.
    pub fn left_capacity(&self) -> usize {
        self.window_size + self.phrase.len() - 1
    }

    /// Length at which a right window is complete: `window_size + phrase_len`.
    pub fn right_len(&self) -> usize {
        self.window_size + self.phrase.len()
    }
}

pub fn parse_phrase(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

/// A phrase token must come out of the tokenizer unchanged, or it could
/// never match anything in the corpus.
fn is_single_word(token: &str) -> bool {
    let mut tokens = tokenize(token);
    matches!((tokens.next(), tokens.next()), (Some(t), None) if t.text == token)
}
