//! The aggregation pipeline shared by the collect and process modes.
//!
//! A run obtains batches from its [`BatchSource`], merges them, applies
//! the final exclusion filter and domain dedup, computes
//! [`CollectionStats`], and writes the final artifacts. Both modes share
//! [`accumulate`] and [`finalize`], so replaying the batches persisted by
//! a collect run reproduces its final dataset exactly.

use crate::config::CollectConfig;
use crate::engine::SearchBackend;
use crate::error::PipelineError;
use crate::store::{BatchStore, OutputPaths};
use crate::types::{Batch, CollectionStats, Dataset, SiteRecord};

use super::collect::LiveSource;
use super::dedup::dedup_by_domain;
use super::exclusion::ExclusionList;
use super::replay::StoredSource;
use super::source::BatchSource;

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub dataset: Dataset,
    pub stats: CollectionStats,
    pub paths: OutputPaths,
}

/// Records merged from all batches of a run, before finalisation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accumulation {
    pub records: Vec<SiteRecord>,
    /// Raw records observed across the merged batches.
    pub raw_count: usize,
}

/// A run of the pipeline over one batch source.
#[derive(Debug)]
pub struct AggregationPipeline<S> {
    source: S,
    exclusions: ExclusionList,
}

impl<B: SearchBackend> AggregationPipeline<LiveSource<B>> {
    /// Pipeline querying `backend` for each of `keywords`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if `config` is invalid.
    pub fn collect(
        backend: B,
        keywords: Vec<String>,
        config: CollectConfig,
        exclusions: ExclusionList,
    ) -> Result<Self, PipelineError> {
        Ok(Self::new(LiveSource::new(backend, keywords, config)?, exclusions))
    }
}

impl AggregationPipeline<StoredSource> {
    /// Pipeline replaying the batches already in the store.
    pub fn process(exclusions: ExclusionList) -> Self {
        Self::new(StoredSource, exclusions)
    }
}

impl<S: BatchSource> AggregationPipeline<S> {
    pub fn new(source: S, exclusions: ExclusionList) -> Self {
        Self { source, exclusions }
    }

    /// Execute the run against `store`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] if the source aborts (a batch cannot be
    /// persisted, the store cannot be listed) or a final artifact cannot
    /// be written.
    pub async fn run<St: BatchStore>(mut self, store: &St) -> Result<RunOutput, PipelineError> {
        let mode = self.source.mode();
        tracing::info!(%mode, exclusions = self.exclusions.len(), "pipeline run starting");

        let output = self.source.load_batches(store, &self.exclusions).await?;
        let batch_count = output.batches.len();
        let accumulation = accumulate(output.batches);

        tracing::info!(
            batches = batch_count,
            records = accumulation.records.len(),
            "processing all results"
        );

        let (dataset, filtered) = finalize(accumulation.records, &self.exclusions);
        let stats = CollectionStats::new(
            mode,
            output.counters,
            accumulation.raw_count,
            filtered,
            dataset.len(),
        );

        let paths = store.save_outputs(&dataset, &stats)?;

        tracing::info!(
            %mode,
            total = stats.total_results,
            filtered = stats.filtered_results,
            unique = stats.unique_results,
            results = %paths.final_results.display(),
            csv = %paths.intercept_csv.display(),
            "pipeline run complete"
        );

        Ok(RunOutput {
            dataset,
            stats,
            paths,
        })
    }
}

/// Concatenate batches in order.
///
/// A batch whose identifier already appeared in the run drops the earlier
/// batch and takes the later position, matching how the store moves a
/// re-saved artifact to the end of its manifest.
pub fn accumulate(batches: Vec<Batch>) -> Accumulation {
    let mut merged: Vec<Batch> = Vec::with_capacity(batches.len());
    for batch in batches {
        if let Some(index) = merged.iter().position(|b| b.id == batch.id) {
            tracing::debug!(batch = %batch.id, "batch repeated in run, keeping latest");
            merged.remove(index);
        }
        merged.push(batch);
    }

    let raw_count = merged.iter().map(|b| b.raw_count).sum();
    let records = merged.into_iter().flat_map(|b| b.records).collect();
    Accumulation { records, raw_count }
}

/// Final exclusion filter followed by domain dedup.
///
/// Returns the final dataset and the number of records that survived
/// the filter.
pub fn finalize(records: Vec<SiteRecord>, exclusions: &ExclusionList) -> (Dataset, usize) {
    let filtered = exclusions.filter(records);
    let filtered_count = filtered.len();
    (dedup_by_domain(filtered), filtered_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BatchId;

    fn record(domain: &str, position: u64) -> SiteRecord {
        SiteRecord {
            title: format!("{domain} at {position}"),
            url: format!("https://{domain}/{position}"),
            domain: domain.to_string(),
            snippet: String::new(),
            position,
            source: "google".into(),
            query: "q".into(),
        }
    }

    fn batch(keyword: &str, records: Vec<SiteRecord>) -> Batch {
        Batch {
            id: BatchId::from_keyword(keyword),
            raw_count: records.len() + 1,
            records,
        }
    }

    #[test]
    fn accumulate_concatenates_in_order() {
        let acc = accumulate(vec![
            batch("a", vec![record("x.ru", 1)]),
            batch("b", vec![record("y.ru", 1), record("z.ru", 2)]),
        ]);
        let domains: Vec<_> = acc.records.iter().map(|r| r.domain.as_str()).collect();
        assert_eq!(domains, ["x.ru", "y.ru", "z.ru"]);
        assert_eq!(acc.raw_count, 5);
    }

    #[test]
    fn accumulate_moves_repeated_batch_to_later_position() {
        let acc = accumulate(vec![
            batch("a", vec![record("old.ru", 1)]),
            batch("b", vec![record("b.ru", 1)]),
            batch("a", vec![record("new.ru", 1)]),
        ]);
        let domains: Vec<_> = acc.records.iter().map(|r| r.domain.as_str()).collect();
        assert_eq!(domains, ["b.ru", "new.ru"]);
        assert_eq!(acc.raw_count, 4);
    }

    #[test]
    fn finalize_filters_then_dedups() {
        let (dataset, filtered) = finalize(
            vec![
                record("sberbank.ru", 1),
                record("example.com", 1),
                record("example.com", 2),
                record("other.ru", 3),
            ],
            &ExclusionList::default(),
        );
        assert_eq!(filtered, 3);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset[0].domain, "example.com");
        assert_eq!(dataset[0].position, 1);
        assert_eq!(dataset[1].domain, "other.ru");
    }

    #[test]
    fn finalize_is_idempotent() {
        let input = vec![
            record("a.ru", 1),
            record("vtb.ru", 1),
            record("a.ru", 2),
            record("b.ru", 1),
        ];
        let (once, _) = finalize(input, &ExclusionList::default());
        let (twice, filtered) = finalize(once.clone(), &ExclusionList::default());
        assert_eq!(once, twice);
        assert_eq!(filtered, once.len());
    }
}
