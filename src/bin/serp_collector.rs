//! CLI binary for the SERP collector.
//!
//! ```text
//! serp-collector [collect|process] [--config <path>] [--data-dir <path>]
//! ```
//!
//! The mode defaults to `process`. Diagnostics go to stderr; set
//! `RUST_LOG=debug` for per-batch detail.

use std::path::PathBuf;

use clap::Parser;
use serp_collector::{CollectorConfig, Mode};
use tracing_subscriber::EnvFilter;

/// Collect organic search results and build a filtered, deduplicated site list.
#[derive(Parser)]
#[command(name = "serp-collector", version, about)]
struct Cli {
    /// `collect` queries the search API; `process` rebuilds outputs from stored batches.
    #[arg(value_enum, default_value_t = Mode::Process)]
    mode: Mode,

    /// Path to TOML configuration file.
    #[arg(short, long, env = "SERP_COLLECTOR_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory holding `keywords.json` and `results/`.
    #[arg(short, long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is the normal case.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("serp_collector=info,serp_pipeline=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = CollectorConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.paths.data_dir = Some(dir);
    }

    tracing::info!(mode = %cli.mode, "serp-collector starting");

    let output = serp_collector::run(cli.mode, &config).await.map_err(|e| {
        tracing::error!(mode = %cli.mode, error = %e, "run failed");
        anyhow::anyhow!("serp-collector {} failed: {e}", cli.mode)
    })?;

    let stats = &output.stats;
    tracing::info!(
        total = stats.total_results,
        filtered = stats.filtered_results,
        unique = stats.unique_results,
        keywords = ?stats.processed_keywords,
        requests = ?stats.total_requests,
        files = ?stats.total_files,
        "run summary"
    );
    Ok(())
}
