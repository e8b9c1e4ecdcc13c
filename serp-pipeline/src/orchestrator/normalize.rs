//! Conversion of raw search API payloads into [`SiteRecord`]s.
//!
//! A payload without a usable `organic_results` array is routine (empty
//! page, quota message) and yields no records rather than an error.

use serde_json::Value;
use url::Url;

use crate::types::{SiteRecord, SourceEngine, UNKNOWN_DOMAIN};

/// Normalise one raw payload produced by querying `keyword`.
///
/// Records keep the order of the upstream results array. Items that are
/// not JSON objects are skipped.
pub fn normalize_response(raw: &Value, keyword: &str, engine: SourceEngine) -> Vec<SiteRecord> {
    let Some(items) = raw.get("organic_results").and_then(Value::as_array) else {
        tracing::debug!(keyword, "payload has no organic_results array");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            if !item.is_object() {
                tracing::trace!(keyword, "skipping non-object result item");
                return None;
            }
            Some(normalize_item(item, keyword, engine))
        })
        .collect()
}

fn normalize_item(item: &Value, keyword: &str, engine: SourceEngine) -> SiteRecord {
    let url = string_field(item, "link");
    SiteRecord {
        title: string_field(item, "title"),
        domain: extract_domain(&url),
        url,
        snippet: string_field(item, "snippet"),
        position: item.get("position").and_then(Value::as_u64).unwrap_or(0),
        source: engine.id().to_owned(),
        query: keyword.to_owned(),
    }
}

fn string_field(item: &Value, key: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

/// Lowercase host of `raw`, or [`UNKNOWN_DOMAIN`] if it does not parse.
///
/// A URL that parses but has no host (`mailto:`, `data:`) yields an empty
/// domain, which the exclusion filter always drops.
pub fn extract_domain(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(parsed) => parsed
            .host_str()
            .map(str::to_lowercase)
            .unwrap_or_default(),
        Err(_) => UNKNOWN_DOMAIN.to_owned(),
    }
}
