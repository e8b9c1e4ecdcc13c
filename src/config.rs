//! Collector configuration loaded from TOML.
//!
//! Every section is optional; missing fields fall back to defaults.
//!
//! ```toml
//! [search]
//! base_url = "https://serpapi.com"
//! location = "Russia"
//!
//! [collect]
//! max_keywords = 15
//! request_delay_ms = [1000, 3000]
//!
//! [exclusions]
//! extra = ["moneyman.ru"]
//!
//! [paths]
//! data_dir = "/srv/serp-collector"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serp_pipeline::{CollectConfig, ExclusionList, SearchApiConfig};

use crate::error::{CollectorError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Search API connection and query parameters.
    pub search: SearchApiConfig,
    /// Keyword limit and request pacing.
    pub collect: CollectConfig,
    /// Exclusion list adjustments.
    pub exclusions: ExclusionConfig,
    /// Filesystem locations.
    pub paths: PathsConfig,
    /// Search API credentials.
    pub credentials: CredentialsConfig,
}

/// Adjustments to the built-in exclusion list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionConfig {
    /// Additional domain fragments to exclude.
    pub extra: Vec<String>,
    /// Use only `extra`, dropping the built-in aggregator/bank list.
    pub replace_defaults: bool,
}

impl ExclusionConfig {
    /// Build the immutable list passed to the pipeline.
    pub fn build(&self) -> ExclusionList {
        if self.replace_defaults {
            ExclusionList::new(&self.extra)
        } else {
            ExclusionList::default().with_extra(&self.extra)
        }
    }
}

/// Filesystem locations. Unset paths use [`crate::paths`] defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Data root holding `keywords.json` and `results/`.
    pub data_dir: Option<PathBuf>,
    /// Keyword list, if not at `<data_dir>/keywords.json`.
    pub keywords_file: Option<PathBuf>,
}

/// Search API credentials.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// API key stored in the config file. The `SERPAPI_KEY` environment
    /// variable takes precedence.
    pub api_key: Option<String>,
}

impl fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl CollectorConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CollectorError::Config(e.to_string()))
    }

    /// Load `explicit` if given; otherwise the default config file if it
    /// exists; otherwise defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let default_path = crate::paths::default_config_path();
        if default_path.is_file() {
            tracing::debug!(path = %default_path.display(), "loading config");
            Self::from_file(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CollectorError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the pipeline sections.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<()> {
        self.search.validate()?;
        self.collect.validate()?;
        Ok(())
    }

    /// Data root: `paths.data_dir`, else the platform default.
    pub fn data_dir(&self) -> PathBuf {
        self.paths
            .data_dir
            .clone()
            .unwrap_or_else(crate::paths::data_dir)
    }

    /// Keyword list location.
    pub fn keywords_file(&self, data_dir: &Path) -> PathBuf {
        self.paths
            .keywords_file
            .clone()
            .unwrap_or_else(|| crate::paths::keywords_path(data_dir))
    }
}
