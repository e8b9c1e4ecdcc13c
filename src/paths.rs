//! Centralized filesystem paths for the collector.
//!
//! Uses the [`dirs`] crate for platform-appropriate directory resolution.
//!
//! # Directory Layout
//!
//! | Purpose | macOS | Linux |
//! |---------|-------|-------|
//! | Data | `~/Library/Application Support/serp-collector/` | `~/.local/share/serp-collector/` |
//! | Config | `~/Library/Application Support/serp-collector/` | `~/.config/serp-collector/` |
//!
//! Inside the data directory, `keywords.json` holds the keyword list and
//! `results/` holds batch artifacts and final outputs.
//!
//! # Environment Overrides
//!
//! - `SERP_COLLECTOR_DATA_DIR` — overrides [`data_dir`]
//! - `SERP_COLLECTOR_CONFIG_DIR` — overrides [`config_dir`]

use std::path::{Path, PathBuf};

const APP_DIR: &str = "serp-collector";

/// Application data root directory.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("SERP_COLLECTOR_DATA_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("/tmp/serp-collector-data"))
}

/// Application config directory.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("SERP_COLLECTOR_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("/tmp/serp-collector-config"))
}

/// Default config file (`config_dir()/config.toml`).
#[must_use]
pub fn default_config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Results directory (`<data>/results/`).
#[must_use]
pub fn results_dir(data: &Path) -> PathBuf {
    data.join("results")
}

/// Keyword list (`<data>/keywords.json`).
#[must_use]
pub fn keywords_path(data: &Path) -> PathBuf {
    data.join("keywords.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_rooted_at_data_dir() {
        let data = Path::new("/srv/serp");
        assert_eq!(results_dir(data), PathBuf::from("/srv/serp/results"));
        assert_eq!(keywords_path(data), PathBuf::from("/srv/serp/keywords.json"));
    }

    #[test]
    fn default_config_path_is_toml_in_config_dir() {
        let path = default_config_path();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("config.toml"));
        assert_eq!(path.parent(), Some(config_dir().as_path()));
    }

    #[test]
    fn data_dir_is_not_empty() {
        assert!(!data_dir().as_os_str().is_empty());
    }
}
