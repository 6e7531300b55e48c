//! Per-file scanning: tokens flow through the matcher and both windows, and
//! finished windows are materialized into the file's own index.

use std::path::{Path, PathBuf};
use std::time::Instant;

use morph_dict::{Dictionary, LoadMode};
use morph_types::{Normalizer, Side, uppercase};
use tracing::{debug, info, warn};

use crate::config::ConcordanceConfig;
use crate::corpus::{CorpusFile, list_files};
use crate::error::ScanError;
use crate::index::{ConcordanceIndex, RankedConcordance};
use crate::materialize::materialize;
use crate::matcher::{MatchEvent, PhraseMatcher};
use crate::tokenizer::tokenize;
use crate::window::{LeftWindow, RightWindows, WindowToken};

/// Outcome of a corpus scan. Failed files contribute nothing to the index.
#[derive(Debug, Default)]
pub struct CorpusScan {
    pub files_scanned: usize,
    pub failures: Vec<ScanError>,
}

impl CorpusScan {
    pub fn failed_paths(&self) -> impl Iterator<Item = &Path> {
        self.failures.iter().map(ScanError::path)
    }
}

/// Scanner state that lives for exactly one file.
struct FileState {
    matcher: PhraseMatcher,
    left: LeftWindow,
    right: RightWindows,
    tokens: usize,
}

impl FileState {
    fn new(config: &ConcordanceConfig, phrase_keys: &[String]) -> Self {
        Self {
            matcher: PhraseMatcher::new(phrase_keys.to_vec()),
            left: LeftWindow::new(config.left_capacity()),
            right: RightWindows::new(config.right_len()),
            tokens: 0,
        }
    }

    fn step(&mut self, token: WindowToken, dict: &mut Dictionary, index: &mut ConcordanceIndex) {
        self.tokens += 1;
        for window in self.right.extend(&token) {
            index.record_all(materialize(Side::Right, &window, dict));
        }

        match self.matcher.step(&token.key, dict) {
            MatchEvent::Advanced => self.right.advance(token.clone()),
            MatchEvent::Completed => {
                let snapshot = self.left.snapshot_with(&token);
                index.record_all(materialize(Side::Left, &snapshot, dict));
                if let Some(window) = self.right.complete(token.clone()) {
                    index.record_all(materialize(Side::Right, &window, dict));
                }
            }
            MatchEvent::Abandoned => self.right.abandon(),
            MatchEvent::Idle => {}
        }

        self.left.push(token);
    }
}

/// Concordance extraction over a corpus, accumulating into one index.
///
/// The dictionary is owned by the engine for the whole run and grows as
/// unseen tokens are resolved.
pub struct ConcordanceEngine {
    config: ConcordanceConfig,
    phrase_keys: Vec<String>,
    dictionary: Dictionary,
    normalize: Normalizer,
    load_mode: LoadMode,
    index: ConcordanceIndex,
}

impl ConcordanceEngine {
    pub fn new(config: ConcordanceConfig, dictionary: Dictionary) -> Self {
        Self::with_normalizer(config, dictionary, uppercase)
    }

    /// Use a custom case folding. It must match the one the dictionary was
    /// loaded with.
    pub fn with_normalizer(
        config: ConcordanceConfig,
        dictionary: Dictionary,
        normalize: Normalizer,
    ) -> Self {
        let phrase_keys = config.phrase().iter().map(|t| normalize(t)).collect();
        Self {
            config,
            phrase_keys,
            dictionary,
            normalize,
            load_mode: LoadMode::Mmap,
            index: ConcordanceIndex::new(),
        }
    }

    /// How corpus files are read (default: memory-mapped).
    pub fn with_load_mode(mut self, mode: LoadMode) -> Self {
        self.load_mode = mode;
        self
    }

    pub fn config(&self) -> &ConcordanceConfig {
        &self.config
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn index(&self) -> &ConcordanceIndex {
        &self.index
    }

    pub fn ranked(&self) -> RankedConcordance {
        self.index.ranked()
    }

    pub fn into_parts(self) -> (ConcordanceIndex, Dictionary) {
        (self.index, self.dictionary)
    }

    /// Scan in-memory text as one file.
    pub fn scan_text(&mut self, text: &str) {
        let mut state = FileState::new(&self.config, &self.phrase_keys);
        let mut local = ConcordanceIndex::new();
        for line in text.split('\n') {
            self.scan_line(line, &mut state, &mut local);
        }
        self.finish_file(state, local);
    }

    /// Scan raw bytes as one file, decoding line by line. A line that is not
    /// valid UTF-8 aborts the file and nothing from it is kept.
    pub fn scan_bytes(&mut self, path: &Path, bytes: &[u8]) -> Result<(), ScanError> {
        let mut state = FileState::new(&self.config, &self.phrase_keys);
        let mut local = ConcordanceIndex::new();
        for (lineno, raw_line) in bytes.split(|b| *b == b'\n').enumerate() {
            let line = std::str::from_utf8(raw_line).map_err(|source| ScanError::Decode {
                path: path.to_path_buf(),
                line: lineno + 1,
                source,
            })?;
            self.scan_line(line, &mut state, &mut local);
        }
        self.finish_file(state, local);
        Ok(())
    }

    pub fn scan_file(&mut self, path: &Path) -> Result<(), ScanError> {
        let file = CorpusFile::open(path, self.load_mode)?;
        self.scan_bytes(file.path(), file.bytes())
    }

    /// Scan files in the given order, recording failures instead of stopping.
    pub fn scan_files(&mut self, files: &[PathBuf]) -> CorpusScan {
        let mut scan = CorpusScan::default();
        for path in files {
            match self.scan_file(path) {
                Ok(()) => {
                    debug!("scanned {}", path.display());
                    scan.files_scanned += 1;
                }
                Err(err) => {
                    warn!("skipping file: {err}");
                    scan.failures.push(err);
                }
            }
        }
        scan
    }

    /// Enumerate `root` and scan every file found.
    pub fn scan_corpus(&mut self, root: &Path) -> CorpusScan {
        let start = Instant::now();
        let listing = match list_files(root) {
            Ok(listing) => listing,
            Err(err) => {
                warn!("cannot enumerate corpus: {err}");
                return CorpusScan {
                    files_scanned: 0,
                    failures: vec![err],
                };
            }
        };
        info!("found {} corpus files under {}", listing.files.len(), root.display());

        let mut scan = self.scan_files(&listing.files);
        scan.failures.extend(listing.failures);
        info!(
            "scanned {} files in {} ms ({} failed): {} left / {} right contexts",
            scan.files_scanned,
            start.elapsed().as_millis(),
            scan.failures.len(),
            self.index.len(Side::Left),
            self.index.len(Side::Right)
        );
        scan
    }

    fn scan_line(&mut self, line: &str, state: &mut FileState, local: &mut ConcordanceIndex) {
        for token in tokenize(line) {
            let key = (self.normalize)(token.text);
            state.step(WindowToken::new(token.text, key), &mut self.dictionary, local);
        }
    }

    fn finish_file(&mut self, state: FileState, local: ConcordanceIndex) {
        let dropped = state.right.open_count();
        if dropped > 0 {
            debug!("{dropped} right windows still open at end of file, dropped");
        }
        debug!(
            "file done: {} tokens, {} left / {} right contexts",
            state.tokens,
            local.len(Side::Left),
            local.len(Side::Right)
        );
        self.index.merge(local);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morph_types::Analysis;

    fn engine(phrase: &str, window: usize) -> ConcordanceEngine {
        let config = ConcordanceConfig::from_phrase(phrase, window, 1).unwrap();
        ConcordanceEngine::new(config, Dictionary::new())
    }

    fn raw_texts(ranked: &RankedConcordance, side: Side) -> Vec<(String, u64)> {
        ranked
            .side(side)
            .iter()
            .map(|c| (c.raw_text.clone(), c.count))
            .collect()
    }

    #[test]
    fn left_context_is_window_then_phrase() {
        let mut engine = engine("b c", 2);
        engine.scan_text("w x y b c z");
        let ranked = engine.ranked();
        assert_eq!(raw_texts(&ranked, Side::Left), vec![("x y b c".into(), 1)]);
        // Only "z" follows; two tokens are needed.
        assert!(ranked.right.is_empty());
    }

    #[test]
    fn short_file_start_gives_short_left_context() {
        let mut engine = engine("b", 3);
        engine.scan_text("a b");
        assert_eq!(raw_texts(&engine.ranked(), Side::Left), vec![("a b".into(), 1)]);
    }

    #[test]
    fn windows_span_lines_but_not_files() {
        let mut engine = engine("b", 1);
        engine.scan_text("a\nb\nc");
        engine.scan_text("b");
        engine.scan_text("d");
        let ranked = engine.ranked();
        assert_eq!(
            raw_texts(&ranked, Side::Left),
            vec![("a b".into(), 1), ("b".into(), 1)]
        );
        assert_eq!(raw_texts(&ranked, Side::Right), vec![("b c".into(), 1)]);
    }

    #[test]
    fn broken_partial_match_emits_nothing() {
        let mut engine = engine("a b", 1);
        engine.scan_text("x a c b y");
        assert!(engine.index().is_empty());
    }

    #[test]
    fn adjacent_matches_each_get_right_context() {
        let mut engine = engine("p", 1);
        engine.scan_text("p p q");
        let ranked = engine.ranked();
        assert_eq!(
            raw_texts(&ranked, Side::Right),
            vec![("p p".into(), 1), ("p q".into(), 1)]
        );
        assert_eq!(
            raw_texts(&ranked, Side::Left),
            vec![("p".into(), 1), ("p p".into(), 1)]
        );
    }

    #[test]
    fn matches_through_dictionary_readings() {
        let mut dict = Dictionary::new();
        dict.insert("РАЗРАБОТКИ", Analysis::new("РАЗРАБОТКА", "NOUN"));
        dict.insert("РАЗРАБОТКА", Analysis::new("РАЗРАБОТКА", "NOUN"));
        let config = ConcordanceConfig::from_phrase("разработка", 1, 1).unwrap();
        let mut engine = ConcordanceEngine::new(config, dict);
        engine.scan_text("этапы разработки. Новая разработка");
        let left = engine.index().get(Side::Left, "ЭТАПЫ РАЗРАБОТКА").unwrap();
        assert_eq!(left.raw_text, "этапы разработки");
        assert!(engine.index().get(Side::Left, "НОВАЯ РАЗРАБОТКА").is_some());
        assert_eq!(engine.dictionary().synthesized_count(), 2);
    }

    #[test]
    fn decode_error_discards_whole_file() {
        let mut engine = engine("b", 1);
        let err = engine
            .scan_bytes(Path::new("bad.txt"), b"a b c\n\xff\xfe\n")
            .unwrap_err();
        assert!(matches!(err, ScanError::Decode { line: 2, .. }));
        assert!(engine.index().is_empty());
    }

    #[test]
    fn custom_normalizer_is_applied() {
        fn lower(token: &str) -> String {
            token.to_lowercase()
        }
        let config = ConcordanceConfig::from_phrase("B", 1, 1).unwrap();
        let mut engine = ConcordanceEngine::with_normalizer(config, Dictionary::new(), lower);
        engine.scan_text("A b");
        assert!(engine.index().get(Side::Left, "a b").is_some());
    }
}
