//! Core types: site records, batches, and run statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Domain assigned to records whose URL cannot be parsed.
pub const UNKNOWN_DOMAIN: &str = "unknown";

/// A single organic search result in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRecord {
    /// Title of the result page. May be empty.
    #[serde(default)]
    pub title: String,
    /// Absolute URL of the result page.
    #[serde(default)]
    pub url: String,
    /// Lowercase host extracted from `url`, or [`UNKNOWN_DOMAIN`].
    /// This is the sole filter and dedup key.
    #[serde(default)]
    pub domain: String,
    /// Text snippet shown under the result. May be empty.
    #[serde(default)]
    pub snippet: String,
    /// Rank within the originating results page; `0` if absent upstream.
    #[serde(default)]
    pub position: u64,
    /// Identifier of the search engine that produced the record.
    #[serde(default)]
    pub source: String,
    /// Keyword that produced the record.
    #[serde(default)]
    pub query: String,
}

/// An ordered sequence of records. Order is insertion order.
pub type Dataset = Vec<SiteRecord>;

/// Search engines the collector can request through the search API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceEngine {
    /// Google organic results.
    Google,
}

impl SourceEngine {
    /// Identifier stored in [`SiteRecord::source`] and sent as the API
    /// `engine` parameter.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Google => "google",
        }
    }
}

impl fmt::Display for SourceEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Prefix of every stored batch artifact file name.
const BATCH_FILE_PREFIX: &str = "serpapi_";
/// Extension of every stored batch artifact file name.
const BATCH_FILE_SUFFIX: &str = ".json";

/// Stable identifier of a batch, derived from its keyword.
///
/// Each run of whitespace becomes a single `_`; path separators are
/// replaced as well so the identifier is always a plain file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(String);

impl BatchId {
    /// Derive the identifier for `keyword`.
    pub fn from_keyword(keyword: &str) -> Self {
        let mut id = String::with_capacity(keyword.len());
        let mut in_whitespace = false;
        for ch in keyword.chars() {
            if ch.is_whitespace() {
                if !in_whitespace {
                    id.push('_');
                }
                in_whitespace = true;
                continue;
            }
            in_whitespace = false;
            if ch == '/' || ch == '\\' {
                id.push('_');
            } else {
                id.push(ch);
            }
        }
        Self(id)
    }

    /// Recover an identifier from an artifact file name such as
    /// `serpapi_займ_для_ООО.json`. Returns `None` for unrelated files.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let id = name
            .strip_prefix(BATCH_FILE_PREFIX)?
            .strip_suffix(BATCH_FILE_SUFFIX)?;
        Some(Self(id.to_owned()))
    }

    /// Artifact file name for this batch.
    pub fn file_name(&self) -> String {
        format!("{BATCH_FILE_PREFIX}{}{BATCH_FILE_SUFFIX}", self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Filtered records produced by one keyword query, or replayed from
/// one stored artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub id: BatchId,
    /// Number of records observed before the batch was filtered.
    pub raw_count: usize,
    pub records: Dataset,
}

/// Which entry point produced a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Live queries against the search API.
    Collect,
    /// Replay of previously stored batch artifacts.
    Process,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Collect => "collect",
            Self::Process => "process",
        })
    }
}

/// Source-specific counters reported by a batch source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceCounters {
    /// Keywords available before applying the per-run limit.
    pub total_keywords: Option<usize>,
    /// Keywords actually queried.
    pub processed_keywords: Option<usize>,
    /// Upstream requests issued.
    pub total_requests: Option<usize>,
    /// Stored artifacts found.
    pub total_files: Option<usize>,
}

/// Summary of one pipeline run. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    pub mode: RunMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_keywords: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_keywords: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_requests: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_files: Option<usize>,
    /// Raw records observed across all batches.
    pub total_results: usize,
    /// Records left after the final exclusion filter.
    pub filtered_results: usize,
    /// Records left after domain dedup.
    pub unique_results: usize,
    pub completed_at: DateTime<Utc>,
}

impl CollectionStats {
    /// Build stats stamped with the current time.
    pub fn new(
        mode: RunMode,
        counters: SourceCounters,
        total_results: usize,
        filtered_results: usize,
        unique_results: usize,
    ) -> Self {
        Self {
            mode,
            total_keywords: counters.total_keywords,
            processed_keywords: counters.processed_keywords,
            total_requests: counters.total_requests,
            total_files: counters.total_files,
            total_results,
            filtered_results,
            unique_results,
            completed_at: Utc::now(),
        }
    }
}
