use std::io;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use concordancer::{Cli, run};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Cli::parse().into_run_config()?;
    info!("dictionary: {} ({:?})", config.dictionary.display(), config.dictionary_mode);
    info!("corpus: {}", config.corpus.display());
    info!(
        "phrase: {:?}, window {}, threshold {}",
        config.search.phrase(),
        config.search.window_size(),
        config.search.frequency_threshold()
    );

    let stdout = io::stdout();
    let mut console = stdout.lock();
    let summary = run(&config, &mut console)?;
    info!(
        "{} files scanned, {} failed",
        summary.scan.files_scanned,
        summary.scan.failures.len()
    );
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(true)
        .init();
}
