//! Morphological dictionary: surface forms mapped to their analyses.
//!
//! The [`Dictionary`] exclusively owns every [`Analysis`] in an arena and hands
//! out [`AnalysisId`] indices, which stay valid for the dictionary's lifetime.
//! Entries are never removed. Lookups through [`Dictionary::resolve`] are a
//! write-through cache: a key that has never been seen gets a synthetic
//! `UNKW` analysis whose normal form is the key itself, and that synthesis is
//! remembered for later lookups.
//!
//! Dictionaries are loaded from the OpenCorpora plain-text dump: a block per
//! lemma, introduced by a numeric id line, one `FORM<TAB>POS,grammemes` line
//! per inflected form, blocks separated by blank lines. The first form of a
//! block is the lemma every form in the block reduces to. Callers choose
//! between memory-mapped files or owned buffers at runtime via [`LoadMode`].
//!
//! # Example
//! ```rust
//! use morph_dict::Dictionary;
//! use morph_types::uppercase;
//!
//! # fn main() -> anyhow::Result<()> {
//! let dump = "1\nСТАЛЬ\tNOUN,inan,femn sing,nomn\n\n2\nСТАТЬ\tINFN,perf,intr\nСТАЛЬ\tVERB,perf,intr masc,sing,past,indc\n";
//! let mut dict = Dictionary::from_bytes(dump.as_bytes(), uppercase)?;
//! assert_eq!(dict.analyses_for("СТАЛЬ").count(), 2);
//!
//! let ids = dict.resolve("БЛОГ").to_vec();
//! assert!(dict.analysis(ids[0]).is_unknown());
//! # Ok(()) }
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use memmap2::Mmap;
use morph_types::{Analysis, AnalysisId, Normalizer, uppercase};

/// Strategy for loading the dictionary file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map the file (fast, zero-copy while parsing).
    Mmap,
    /// Read the file into an owned buffer (portable fallback).
    Owned,
}

impl LoadMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "mmap" => Some(LoadMode::Mmap),
            "owned" => Some(LoadMode::Owned),
            _ => None,
        }
    }
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

/// Surface form to analyses, with arena-owned [`Analysis`] values.
#[derive(Debug, Default)]
pub struct Dictionary {
    analyses: Vec<Analysis>,
    entries: HashMap<String, Vec<AnalysisId>>,
    synthesized: usize,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an OpenCorpora dump, memory-mapping it and uppercasing keys.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(path, LoadMode::Mmap, uppercase)
    }

    pub fn load_with_mode(path: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        Self::load_with(path, mode, uppercase)
    }

    /// Load choosing the buffer strategy and the normalizer applied to forms
    /// and lemmas. Use the same normalizer the engine applies to tokens.
    pub fn load_with(path: impl AsRef<Path>, mode: LoadMode, normalize: Normalizer) -> Result<Self> {
        let path = path.as_ref();
        let buffer = load_file(path, mode)?;
        Self::from_bytes(buffer.as_slice(), normalize)
            .with_context(|| format!("parse dictionary {}", path.display()))
    }

    /// Parse a dump already in memory.
    pub fn from_bytes(bytes: &[u8], normalize: Normalizer) -> Result<Self> {
        let mut dict = Self::new();
        parse_dump(bytes, normalize, &mut dict)?;
        Ok(dict)
    }

    /// Attach `analysis` to `key`, returning its id. An identical analysis
    /// already attached to `key` is reused rather than stored twice.
    pub fn insert(&mut self, key: impl Into<String>, analysis: Analysis) -> AnalysisId {
        let key = key.into();
        if let Some(ids) = self.entries.get(&key)
            && let Some(existing) = ids.iter().find(|id| self.analyses[id.index()] == analysis)
        {
            return *existing;
        }
        let id = self.push_analysis(analysis);
        self.entries.entry(key).or_default().push(id);
        id
    }

    /// Analyses for a normalized key, synthesizing and caching an `UNKW`
    /// reading when the key is absent. Never returns an empty slice.
    pub fn resolve(&mut self, key: &str) -> &[AnalysisId] {
        if !self.entries.contains_key(key) {
            let id = self.push_analysis(Analysis::unknown(key));
            self.entries.insert(key.to_string(), vec![id]);
            self.synthesized += 1;
        }
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Read-only lookup; `None` when the key was never loaded or resolved.
    pub fn get(&self, key: &str) -> Option<&[AnalysisId]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Borrow an analysis by id.
    ///
    /// Panics if `id` was not produced by this dictionary.
    pub fn analysis(&self, id: AnalysisId) -> &Analysis {
        &self.analyses[id.index()]
    }

    pub fn analyses_for<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a Analysis> + use<'a> {
        self.get(key)
            .unwrap_or(&[])
            .iter()
            .map(move |id| self.analysis(*id))
    }

    /// Number of distinct keys.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of analyses in the arena.
    pub fn analysis_count(&self) -> usize {
        self.analyses.len()
    }

    /// Number of keys that were synthesized as `UNKW` by [`Dictionary::resolve`].
    pub fn synthesized_count(&self) -> usize {
        self.synthesized
    }

    fn push_analysis(&mut self, analysis: Analysis) -> AnalysisId {
        let id = AnalysisId(self.analyses.len() as u32);
        self.analyses.push(analysis);
        id
    }
}

fn load_file(path: &Path, mode: LoadMode) -> Result<Buffer> {
    match mode {
        LoadMode::Mmap => {
            let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            unsafe { Mmap::map(&file) }
                .map(Buffer::Mmap)
                .with_context(|| format!("mmap {}", path.display()))
        }
        LoadMode::Owned => {
            let mut file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .with_context(|| format!("read {}", path.display()))?;
            Ok(Buffer::Owned(buf))
        }
    }
}

fn parse_dump(bytes: &[u8], normalize: Normalizer, dict: &mut Dictionary) -> Result<()> {
    let mut in_block = false;
    let mut lemma: Option<String> = None;

    for (lineno, raw_line) in bytes.split(|b| *b == b'\n').enumerate() {
        let line = std::str::from_utf8(strip_cr(raw_line))
            .with_context(|| format!("line {} is not valid UTF-8", lineno + 1))?;
        let line = line.trim();
        if line.is_empty() {
            in_block = false;
            lemma = None;
            continue;
        }
        if line.bytes().all(|b| b.is_ascii_digit()) {
            in_block = true;
            lemma = None;
            continue;
        }
        if !in_block {
            anyhow::bail!("line {}: form line outside of a lemma block", lineno + 1);
        }

        let (form, tags) = line
            .split_once('\t')
            .or_else(|| line.split_once(char::is_whitespace))
            .ok_or_else(|| anyhow::anyhow!("line {}: missing tag column", lineno + 1))?;
        let pos = tags
            .split(|c: char| c == ',' || c.is_whitespace())
            .find(|t| !t.is_empty())
            .ok_or_else(|| anyhow::anyhow!("line {}: empty tag column", lineno + 1))?;

        let key = normalize(form.trim());
        let block_lemma = lemma.get_or_insert_with(|| key.clone()).clone();
        dict.insert(key, Analysis::new(block_lemma, pos));
    }

    Ok(())
}

fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}
