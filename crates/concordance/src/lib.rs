//! Concordance extraction: find every occurrence of a phrase in a corpus and
//! count the left and right contexts around it.
//!
//! Matching is morphology-aware: a token matches a phrase token when their
//! dictionary readings share a normal form. Contexts are expanded into every
//! disambiguated reading and counted per normal form, separately for the
//! left side (the words before and including the phrase) and the right side
//! (the phrase and the words after it).
//!
//! # Pipeline
//! 1. [`tokenizer`] splits each line into runs of non-separator characters.
//! 2. [`matcher`] advances through the phrase token by token.
//! 3. [`window`] keeps the left buffer and the right windows.
//! 4. [`materialize`] expands a finished window into its readings.
//! 5. [`index`] counts contexts and ranks them.
//!
//! # Example
//! ```rust
//! use concordance::{ConcordanceConfig, ConcordanceEngine, Dictionary, Side};
//!
//! let config = ConcordanceConfig::from_phrase("разработка", 1, 1).unwrap();
//! let mut engine = ConcordanceEngine::new(config, Dictionary::new());
//! engine.scan_text("хорошая разработка продукта");
//!
//! let ranked = engine.ranked();
//! assert_eq!(ranked.side(Side::Left)[0].raw_text, "хорошая разработка");
//! assert_eq!(ranked.side(Side::Right)[0].raw_text, "разработка продукта");
//! ```

pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod index;
pub mod materialize;
pub mod matcher;
pub mod tokenizer;
pub mod window;

pub use config::{ConcordanceConfig, parse_phrase};
pub use corpus::{CorpusFile, CorpusListing, list_files};
pub use engine::{ConcordanceEngine, CorpusScan};
pub use error::{ConfigError, ScanError};
pub use index::{ConcordanceIndex, MaterializedContext, RankedConcordance};
pub use matcher::{MatchEvent, PhraseMatcher, share_common_form};
pub use morph_dict::{Dictionary, LoadMode};
pub use morph_types::{Analysis, AnalysisId, Normalizer, Side, uppercase};
pub use tokenizer::{Token, is_separator, tokenize};
