//! Replay of stored batches without touching the network.

use crate::error::PipelineError;
use crate::store::BatchStore;
use crate::types::{Batch, RunMode, SourceCounters};

use super::exclusion::ExclusionList;
use super::source::{BatchSource, SourceOutput};

/// [`BatchSource`] reading every batch artifact in a store.
///
/// An artifact that cannot be read or parsed is logged and skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoredSource;

impl BatchSource for StoredSource {
    fn mode(&self) -> RunMode {
        RunMode::Process
    }

    async fn load_batches<St: BatchStore>(
        &mut self,
        store: &St,
        _exclusions: &ExclusionList,
    ) -> Result<SourceOutput, PipelineError> {
        let ids = store.list_batches()?;
        tracing::info!(files = ids.len(), "found stored batches");

        let mut batches = Vec::with_capacity(ids.len());
        for id in &ids {
            match store.load_batch(id) {
                Ok(records) => {
                    tracing::debug!(batch = %id, records = records.len(), "batch loaded");
                    batches.push(Batch {
                        id: id.clone(),
                        raw_count: records.len(),
                        records,
                    });
                }
                Err(err) => {
                    tracing::warn!(batch = %id, error = %err, "skipping unreadable batch");
                }
            }
        }

        Ok(SourceOutput {
            batches,
            counters: SourceCounters {
                total_files: Some(ids.len()),
                ..Default::default()
            },
        })
    }
}
