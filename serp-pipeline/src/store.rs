//! Persistence of per-keyword batches and final run artifacts.
//!
//! Batches are stored as `serpapi_<id>.json` files in a results directory.
//! A `batches.json` manifest records the order in which batches were
//! last written, so a replay reads them back in collection order and
//! reaches the same final dataset as the run that produced them.

use std::fs;
use std::path::{Path, PathBuf};

use crate::csv::project_csv;
use crate::error::PipelineError;
use crate::types::{BatchId, CollectionStats, Dataset, SiteRecord};

/// File name of the final deduplicated dataset.
pub const FINAL_RESULTS_FILE: &str = "final_results.json";
/// File name of the intercept CSV.
pub const INTERCEPT_CSV_FILE: &str = "domains_for_intercept.csv";
/// File name of the run statistics.
pub const STATS_FILE: &str = "stats.json";
/// File name of the batch order manifest.
pub const MANIFEST_FILE: &str = "batches.json";

/// Where the final artifacts of a run were written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub final_results: PathBuf,
    pub intercept_csv: PathBuf,
    pub stats: PathBuf,
}

/// Storage for batch artifacts and final outputs.
pub trait BatchStore {
    /// Persist the filtered records of `keyword`, replacing any earlier
    /// batch with the same identifier. The batch moves to the end of the
    /// collection order.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Store`] if the artifact cannot be written.
    fn save_batch(&self, keyword: &str, records: &[SiteRecord]) -> Result<BatchId, PipelineError>;

    /// Identifiers of every stored batch, in collection order.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Store`] if the store cannot be listed.
    fn list_batches(&self) -> Result<Vec<BatchId>, PipelineError>;

    /// Load the records of one stored batch.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Io`] if the artifact cannot be read and
    /// [`PipelineError::Parse`] if it is not a JSON array of records.
    fn load_batch(&self, id: &BatchId) -> Result<Dataset, PipelineError>;

    /// Write the final dataset, its CSV projection, and the run stats.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Store`] if any artifact cannot be written.
    fn save_outputs(
        &self,
        dataset: &[SiteRecord],
        stats: &CollectionStats,
    ) -> Result<OutputPaths, PipelineError>;
}

/// [`BatchStore`] backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct FsBatchStore {
    dir: PathBuf,
}

impl FsBatchStore {
    /// Open the store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Store`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PipelineError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            PipelineError::Store(format!("cannot create {}: {e}", dir.display()))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn batch_path(&self, id: &BatchId) -> PathBuf {
        self.dir.join(id.file_name())
    }

    fn read_manifest(&self) -> Vec<BatchId> {
        let path = self.dir.join(MANIFEST_FILE);
        let Ok(content) = fs::read_to_string(&path) else {
            return Vec::new();
        };
        match serde_json::from_str(&content) {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable batch manifest");
                Vec::new()
            }
        }
    }

    fn write_manifest(&self, ids: &[BatchId]) -> Result<(), PipelineError> {
        let json = serde_json::to_string_pretty(ids)
            .map_err(|e| PipelineError::Store(format!("cannot encode batch manifest: {e}")))?;
        write_file(&self.dir.join(MANIFEST_FILE), json.as_bytes())
    }
}

impl BatchStore for FsBatchStore {
    fn save_batch(&self, keyword: &str, records: &[SiteRecord]) -> Result<BatchId, PipelineError> {
        let id = BatchId::from_keyword(keyword);
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| PipelineError::Store(format!("cannot encode batch {id}: {e}")))?;
        let path = self.batch_path(&id);
        write_file(&path, json.as_bytes())?;

        let mut manifest = self.read_manifest();
        manifest.retain(|listed| listed != &id);
        manifest.push(id.clone());
        self.write_manifest(&manifest)?;

        tracing::debug!(batch = %id, records = records.len(), path = %path.display(), "batch saved");
        Ok(id)
    }

    fn list_batches(&self) -> Result<Vec<BatchId>, PipelineError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| {
            PipelineError::Store(format!("cannot list {}: {e}", self.dir.display()))
        })?;

        let mut on_disk: Vec<BatchId> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
            .filter_map(|entry| BatchId::from_file_name(&entry.file_name().to_string_lossy()))
            .collect();
        on_disk.sort();

        let mut ordered: Vec<BatchId> = self
            .read_manifest()
            .into_iter()
            .filter(|id| on_disk.binary_search(id).is_ok())
            .collect();
        let unlisted: Vec<BatchId> = on_disk
            .into_iter()
            .filter(|id| !ordered.contains(id))
            .collect();
        ordered.extend(unlisted);
        Ok(ordered)
    }

    fn load_batch(&self, id: &BatchId) -> Result<Dataset, PipelineError> {
        let path = self.batch_path(id);
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content)
            .map_err(|e| PipelineError::Parse(format!("{}: {e}", path.display())))
    }

    fn save_outputs(
        &self,
        dataset: &[SiteRecord],
        stats: &CollectionStats,
    ) -> Result<OutputPaths, PipelineError> {
        let paths = OutputPaths {
            final_results: self.dir.join(FINAL_RESULTS_FILE),
            intercept_csv: self.dir.join(INTERCEPT_CSV_FILE),
            stats: self.dir.join(STATS_FILE),
        };

        let results_json = serde_json::to_string_pretty(dataset)
            .map_err(|e| PipelineError::Store(format!("cannot encode final results: {e}")))?;
        write_file(&paths.final_results, results_json.as_bytes())?;

        write_file(&paths.intercept_csv, project_csv(dataset).as_bytes())?;

        let stats_json = serde_json::to_string_pretty(stats)
            .map_err(|e| PipelineError::Store(format!("cannot encode stats: {e}")))?;
        write_file(&paths.stats, stats_json.as_bytes())?;

        Ok(paths)
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), PipelineError> {
    fs::write(path, contents)
        .map_err(|e| PipelineError::Store(format!("cannot write {}: {e}", path.display())))
}
