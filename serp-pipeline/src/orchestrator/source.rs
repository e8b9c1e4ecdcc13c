//! The batch-source capability the aggregation pipeline is generic over.

use crate::error::PipelineError;
use crate::store::BatchStore;
use crate::types::{Batch, RunMode, SourceCounters};

use super::exclusion::ExclusionList;

/// Everything a source hands to the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceOutput {
    /// Filtered batches in the order they were produced.
    pub batches: Vec<Batch>,
    pub counters: SourceCounters,
}

/// Something that yields filtered batches for a pipeline run.
///
/// Implemented by [`super::collect::LiveSource`] (queries the search API
/// and persists each batch) and [`super::replay::StoredSource`] (reads
/// batches persisted by earlier runs).
pub trait BatchSource {
    /// Which entry point this source represents.
    fn mode(&self) -> RunMode;

    /// Produce every batch of the run.
    ///
    /// `exclusions` is applied per batch by sources that create batches;
    /// replayed batches were filtered when they were first written.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] only for failures that must abort the
    /// run. Per-keyword and per-artifact failures are logged and skipped.
    fn load_batches<St: BatchStore>(
        &mut self,
        store: &St,
        exclusions: &ExclusionList,
    ) -> impl std::future::Future<Output = Result<SourceOutput, PipelineError>>;
}
