//! # serp-pipeline
//!
//! Result aggregation pipeline for the SERP collector.
//!
//! Turns organic search results for a list of keywords into one
//! filtered, domain-deduplicated dataset, either by querying the search
//! API live or by replaying batches stored by an earlier run.
//!
//! ## Design
//!
//! - Keywords are queried one at a time with a randomised pause between
//!   requests; there is no concurrent fan-out
//! - Every keyword's filtered batch is persisted before moving on, so an
//!   aborted run can be finished later in process mode
//! - Aggregator and bank domains are dropped by substring match against
//!   an explicit [`ExclusionList`]
//! - Dedup keeps the first record per domain and never merges fields
//! - Collect and process share the same finalisation, so replaying the
//!   stored batches yields the identical final dataset
//!
//! ## Security
//!
//! - The API key is never logged and is stripped from HTTP error messages

pub mod config;
pub mod csv;
pub mod engine;
pub mod engines;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod store;
pub mod types;

pub use config::{CollectConfig, SearchApiConfig};
pub use engine::{QueryParams, RawResponse, SearchBackend};
pub use engines::SerpApiEngine;
pub use error::{PipelineError, Result};
pub use orchestrator::exclusion::ExclusionList;
pub use orchestrator::pipeline::{AggregationPipeline, RunOutput};
pub use store::{BatchStore, FsBatchStore, OutputPaths};
pub use types::{BatchId, CollectionStats, Dataset, RunMode, SiteRecord, SourceEngine};

/// Query the search API for `keywords` and aggregate the results into
/// `store`.
///
/// # Errors
///
/// Returns [`PipelineError::Config`] for an invalid configuration, and
/// [`PipelineError::Store`] if a batch or final artifact cannot be written.
/// Failed queries for individual keywords are logged and skipped.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> serp_pipeline::Result<()> {
/// use serp_pipeline::{CollectConfig, ExclusionList, FsBatchStore, SearchApiConfig, SerpApiEngine};
///
/// let engine = SerpApiEngine::new(SearchApiConfig::default(), "api-key")?;
/// let store = FsBatchStore::open("data/results")?;
/// let keywords = vec!["кредит для ИП".to_string()];
/// let output = serp_pipeline::collect(
///     engine,
///     keywords,
///     CollectConfig::default(),
///     ExclusionList::default(),
///     &store,
/// )
/// .await?;
/// println!("{} unique domains", output.dataset.len());
/// # Ok(())
/// # }
/// ```
pub async fn collect<B: SearchBackend, St: BatchStore>(
    backend: B,
    keywords: Vec<String>,
    config: CollectConfig,
    exclusions: ExclusionList,
    store: &St,
) -> Result<RunOutput> {
    AggregationPipeline::collect(backend, keywords, config, exclusions)?
        .run(store)
        .await
}

/// Rebuild the final artifacts from the batches already in `store`.
///
/// # Errors
///
/// Returns [`PipelineError::Store`] if the store cannot be listed or a
/// final artifact cannot be written. Unreadable batches are skipped.
pub async fn process<St: BatchStore>(exclusions: ExclusionList, store: &St) -> Result<RunOutput> {
    AggregationPipeline::process(exclusions).run(store).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn process_on_empty_store_writes_empty_outputs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FsBatchStore::open(dir.path()).expect("store");
        let output = process(ExclusionList::default(), &store).await.expect("process");
        assert!(output.dataset.is_empty());
        assert_eq!(output.stats.mode, RunMode::Process);
        assert_eq!(output.stats.total_files, Some(0));
        assert!(output.paths.final_results.is_file());
        assert!(output.paths.intercept_csv.is_file());
        assert!(output.paths.stats.is_file());
    }

    #[tokio::test]
    async fn collect_rejects_invalid_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FsBatchStore::open(dir.path()).expect("store");
        let engine = SerpApiEngine::new(SearchApiConfig::default(), "key").expect("engine");
        let config = CollectConfig {
            request_delay_ms: (10, 1),
            ..Default::default()
        };
        let err = collect(engine, vec![], config, ExclusionList::default(), &store)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("delay"));
    }
}
