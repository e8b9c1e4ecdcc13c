//! Mode dispatch: wires configuration, credentials, keywords and the
//! batch store into a pipeline run.

use std::fmt;

use serp_pipeline::{FsBatchStore, RunOutput, SerpApiEngine};

use crate::config::CollectorConfig;
use crate::credentials::{self, ApiKey};
use crate::error::Result;
use crate::keywords;
use crate::paths;

/// Entry point selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Query the search API for each keyword, then aggregate.
    Collect,
    /// Rebuild the final outputs from stored batches, offline.
    #[default]
    Process,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Collect => "collect",
            Self::Process => "process",
        })
    }
}

/// Run `mode` with `config`, resolving the API key from the environment
/// when collecting.
///
/// # Errors
///
/// Returns an error for invalid configuration, a missing API key in
/// collect mode, or any fatal pipeline failure.
pub async fn run(mode: Mode, config: &CollectorConfig) -> Result<RunOutput> {
    match mode {
        Mode::Collect => {
            let key = credentials::resolve_api_key(&config.credentials)?;
            collect(config, &key).await
        }
        Mode::Process => process(config).await,
    }
}

/// Query the search API for the configured keywords and aggregate.
///
/// # Errors
///
/// Returns an error for invalid configuration or a fatal pipeline failure.
pub async fn collect(config: &CollectorConfig, key: &ApiKey) -> Result<RunOutput> {
    config.validate()?;
    let data_dir = config.data_dir();
    let store = FsBatchStore::open(paths::results_dir(&data_dir))?;
    let keywords = keywords::load_keywords(&config.keywords_file(&data_dir));
    let engine = SerpApiEngine::new(config.search.clone(), key.expose())?;

    tracing::info!(data_dir = %data_dir.display(), "collecting via search API");
    let output = serp_pipeline::collect(
        engine,
        keywords,
        config.collect.clone(),
        config.exclusions.build(),
        &store,
    )
    .await?;
    Ok(output)
}

/// Rebuild the final outputs from the batches already stored.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or listed, or an
/// output cannot be written.
pub async fn process(config: &CollectorConfig) -> Result<RunOutput> {
    let data_dir = config.data_dir();
    let store = FsBatchStore::open(paths::results_dir(&data_dir))?;

    tracing::info!(data_dir = %data_dir.display(), "processing stored results");
    let output = serp_pipeline::process(config.exclusions.build(), &store).await?;
    Ok(output)
}
