//! Live collection: one search API query per keyword, strictly in order.
//!
//! Each keyword walks the states
//! `Querying → Normalizing → FilteringBatch → Persisting`, followed by a
//! randomised pause before the next keyword. A keyword whose query fails
//! is logged and skipped. A batch that cannot be persisted aborts the
//! run, so every batch that reaches the pipeline also exists on disk.

use std::time::Duration;

use rand::Rng;

use crate::config::CollectConfig;
use crate::engine::{QueryParams, RawResponse, SearchBackend};
use crate::error::PipelineError;
use crate::store::BatchStore;
use crate::types::{Batch, RunMode, SiteRecord, SourceCounters};

use super::exclusion::ExclusionList;
use super::normalize::normalize_response;
use super::source::{BatchSource, SourceOutput};

/// Position of a collect run. `usize` payloads index the keyword list.
#[derive(Debug)]
enum CollectState {
    Idle,
    Querying(usize),
    Normalizing(usize, RawResponse),
    FilteringBatch(usize, Vec<SiteRecord>),
    Persisting {
        index: usize,
        raw_count: usize,
        records: Vec<SiteRecord>,
    },
    Pausing(usize),
    Finished,
}

impl CollectState {
    fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Querying(_) => "querying",
            Self::Normalizing(..) => "normalizing",
            Self::FilteringBatch(..) => "filtering_batch",
            Self::Persisting { .. } => "persisting",
            Self::Pausing(_) => "pausing",
            Self::Finished => "finished",
        }
    }
}

/// [`BatchSource`] that queries a [`SearchBackend`] for each keyword.
#[derive(Debug)]
pub struct LiveSource<B> {
    backend: B,
    keywords: Vec<String>,
    config: CollectConfig,
}

impl<B: SearchBackend> LiveSource<B> {
    /// Build a source over `keywords`. Only the first
    /// `config.max_keywords` are queried.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if `config` is invalid.
    pub fn new(backend: B, keywords: Vec<String>, config: CollectConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self {
            backend,
            keywords,
            config,
        })
    }

    /// Number of keywords a run will query.
    pub fn keyword_limit(&self) -> usize {
        self.keywords.len().min(self.config.max_keywords)
    }

    fn after_keyword(&self, index: usize) -> CollectState {
        if index + 1 < self.keyword_limit() {
            CollectState::Pausing(index)
        } else {
            CollectState::Finished
        }
    }
}

impl<B: SearchBackend> BatchSource for LiveSource<B> {
    fn mode(&self) -> RunMode {
        RunMode::Collect
    }

    async fn load_batches<St: BatchStore>(
        &mut self,
        store: &St,
        exclusions: &ExclusionList,
    ) -> Result<SourceOutput, PipelineError> {
        let limit = self.keyword_limit();
        let params = QueryParams {
            result_count: self.config.result_count,
            offset: self.config.offset,
        };
        let engine = self.backend.engine_type();

        tracing::info!(
            keywords = limit,
            available = self.keywords.len(),
            "starting collection"
        );

        let mut batches = Vec::with_capacity(limit);
        let mut requests = 0usize;
        let mut state = CollectState::Idle;

        loop {
            tracing::trace!(state = state.label(), "collect state");
            state = match state {
                CollectState::Idle if limit == 0 => CollectState::Finished,
                CollectState::Idle => CollectState::Querying(0),
                CollectState::Querying(index) => {
                    let keyword = self.keywords[index].as_str();
                    tracing::info!(keyword, n = index + 1, of = limit, "processing keyword");
                    requests += 1;
                    match self.backend.search(keyword, &params).await {
                        Ok(raw) => CollectState::Normalizing(index, raw),
                        Err(err) => {
                            tracing::warn!(keyword, error = %err, "query failed, skipping keyword");
                            self.after_keyword(index)
                        }
                    }
                }
                CollectState::Normalizing(index, raw) => CollectState::FilteringBatch(
                    index,
                    normalize_response(&raw, &self.keywords[index], engine),
                ),
                CollectState::FilteringBatch(index, records) => CollectState::Persisting {
                    index,
                    raw_count: records.len(),
                    records: exclusions.filter(records),
                },
                CollectState::Persisting {
                    index,
                    raw_count,
                    records,
                } => {
                    let keyword = self.keywords[index].as_str();
                    let id = store.save_batch(keyword, &records)?;
                    tracing::info!(
                        keyword,
                        batch = %id,
                        found = raw_count,
                        kept = records.len(),
                        "batch persisted"
                    );
                    batches.push(Batch {
                        id,
                        raw_count,
                        records,
                    });
                    self.after_keyword(index)
                }
                CollectState::Pausing(index) => {
                    let delay = pause_duration(self.config.request_delay_ms);
                    if !delay.is_zero() {
                        tracing::debug!(delay_ms = delay.as_millis() as u64, "pausing before next query");
                        tokio::time::sleep(delay).await;
                    }
                    CollectState::Querying(index + 1)
                }
                CollectState::Finished => break,
            };
        }

        Ok(SourceOutput {
            batches,
            counters: SourceCounters {
                total_keywords: Some(self.keywords.len()),
                processed_keywords: Some(limit),
                total_requests: Some(requests),
                total_files: None,
            },
        })
    }
}

/// Uniformly random pause within `(min, max)` milliseconds.
fn pause_duration((min, max): (u64, u64)) -> Duration {
    if max <= min {
        return Duration::from_millis(min);
    }
    Duration::from_millis(rand::thread_rng().gen_range(min..=max))
}
