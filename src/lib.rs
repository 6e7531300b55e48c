//! Command-line front end for concordance extraction: configuration,
//! report writers and the [`run`] pipeline used by the `concordancer` binary.

pub mod config;
pub mod report;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use concordance::{ConcordanceEngine, CorpusScan, RankedConcordance};
use morph_dict::Dictionary;
use tracing::{info, warn};

pub use config::{Cli, RunConfig};
pub use report::{ReportFormat, write_console, write_report};

/// What a run produced, for callers that want more than the report file.
#[derive(Debug)]
pub struct RunSummary {
    pub concordance: RankedConcordance,
    pub scan: CorpusScan,
}

/// Load the dictionary, scan the corpus, write the report file and print
/// the frequent entries to `console`.
pub fn run<W: Write>(config: &RunConfig, console: &mut W) -> Result<RunSummary> {
    let dict_start = Instant::now();
    let dictionary = Dictionary::load_with_mode(&config.dictionary, config.dictionary_mode)
        .with_context(|| format!("loading dictionary from {}", config.dictionary.display()))?;
    info!(
        "dictionary loaded in {} ms ({} forms, {} analyses)",
        dict_start.elapsed().as_millis(),
        dictionary.entry_count(),
        dictionary.analysis_count()
    );

    let mut engine = ConcordanceEngine::new(config.search.clone(), dictionary);
    let scan = engine.scan_corpus(&config.corpus);
    info!(
        "{} unknown forms added to the dictionary",
        engine.dictionary().synthesized_count()
    );
    let concordance = engine.ranked();

    let file = File::create(&config.output)
        .with_context(|| format!("create report {}", config.output.display()))?;
    let mut writer = BufWriter::new(file);
    write_report(&mut writer, &concordance, config.format)
        .and_then(|()| writer.flush())
        .with_context(|| format!("write report {}", config.output.display()))?;
    info!("report written to {}", config.output.display());

    write_console(console, &concordance, config.search.frequency_threshold())
        .context("write console listing")?;

    if !scan.failures.is_empty() {
        warn!("{} corpus entries could not be scanned:", scan.failures.len());
        for failure in &scan.failures {
            warn!("  {failure}");
        }
    }

    Ok(RunSummary { concordance, scan })
}
