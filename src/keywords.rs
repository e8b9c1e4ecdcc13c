//! Keyword list loading.
//!
//! The list is a JSON array of strings. A missing or unreadable file is
//! not fatal: the collector falls back to [`DEFAULT_KEYWORDS`].

use std::path::Path;

/// Keywords used when the keyword file cannot be loaded.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "кредит для ИП",
    "кредитование малого бизнеса",
    "займ для ООО",
];

/// Load keywords from `path`, in file order.
///
/// Entries are trimmed and blank entries dropped. If the file is
/// missing, is not a JSON array of strings, or contains no usable
/// keyword, the built-in defaults are returned instead.
pub fn load_keywords(path: &Path) -> Vec<String> {
    match read_keywords(path) {
        Ok(keywords) if !keywords.is_empty() => {
            tracing::info!(count = keywords.len(), path = %path.display(), "keywords loaded");
            keywords
        }
        Ok(_) => {
            tracing::warn!(path = %path.display(), "keyword file is empty, using defaults");
            default_keywords()
        }
        Err(reason) => {
            tracing::warn!(path = %path.display(), error = %reason, "cannot load keywords, using defaults");
            default_keywords()
        }
    }
}

/// The built-in keyword list.
pub fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| (*k).to_owned()).collect()
}

fn read_keywords(path: &Path) -> Result<Vec<String>, String> {
    let content = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let raw: Vec<String> = serde_json::from_str(&content).map_err(|e| e.to_string())?;
    Ok(raw
        .into_iter()
        .map(|k| k.trim().to_owned())
        .filter(|k| !k.is_empty())
        .collect())
}
