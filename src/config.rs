use std::path::PathBuf;

use clap::Parser;
use concordance::{ConcordanceConfig, ConfigError};
use morph_dict::LoadMode;

use crate::report::ReportFormat;

pub const DEFAULT_DICTIONARY: &str = "dict_opcorpora_clear.txt";
pub const DEFAULT_OUTPUT: &str = "concordances.txt";
pub const DEFAULT_WINDOW_SIZE: usize = 1;
pub const DEFAULT_THRESHOLD: u32 = 10;

/// Command line, with every flag also readable from the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "concordancer")]
#[command(about = "Rank the left and right contexts of a phrase across a text corpus")]
pub struct Cli {
    /// OpenCorpora dictionary dump.
    #[arg(long, env = "CONCORDANCE_DICTIONARY", default_value = DEFAULT_DICTIONARY)]
    pub dictionary: PathBuf,
    /// How to read the dictionary: `mmap` or `owned`.
    #[arg(
        long,
        env = "CONCORDANCE_DICTIONARY_MODE",
        default_value = "mmap",
        value_parser = parse_load_mode
    )]
    pub dictionary_mode: LoadMode,
    /// Directory scanned recursively for text files.
    #[arg(long, env = "CONCORDANCE_CORPUS")]
    pub corpus: PathBuf,
    /// Target phrase, whitespace separated.
    #[arg(long, env = "CONCORDANCE_PHRASE")]
    pub phrase: String,
    /// Context tokens captured on each side of a match.
    #[arg(long, env = "CONCORDANCE_WINDOW", default_value_t = DEFAULT_WINDOW_SIZE)]
    pub window_size: usize,
    /// Minimum count for an entry to be printed to the console.
    #[arg(long, env = "CONCORDANCE_THRESHOLD", default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: u32,
    /// Report file receiving every entry.
    #[arg(long, env = "CONCORDANCE_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
    #[arg(long, env = "CONCORDANCE_FORMAT", value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Validated settings for [`crate::run`].
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub dictionary: PathBuf,
    pub dictionary_mode: LoadMode,
    pub corpus: PathBuf,
    pub search: ConcordanceConfig,
    pub output: PathBuf,
    pub format: ReportFormat,
}

impl Cli {
    pub fn into_run_config(self) -> Result<RunConfig, ConfigError> {
        let search = ConcordanceConfig::from_phrase(&self.phrase, self.window_size, self.threshold)?;
        Ok(RunConfig {
            dictionary: self.dictionary,
            dictionary_mode: self.dictionary_mode,
            corpus: self.corpus,
            search,
            output: self.output,
            format: self.format,
        })
    }
}

fn parse_load_mode(raw: &str) -> Result<LoadMode, String> {
    LoadMode::parse(raw).ok_or_else(|| format!("unknown load mode `{raw}` (expected mmap or owned)"))
}
