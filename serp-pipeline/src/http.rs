//! Shared HTTP client for search API requests.

use crate::config::SearchApiConfig;
use crate::error::PipelineError;
use std::time::Duration;

/// User-Agent sent when the configuration does not override it.
pub const DEFAULT_USER_AGENT: &str = concat!("serp-collector/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] configured for search API requests.
///
/// The client has:
/// - Timeout from config
/// - Configured User-Agent, or [`DEFAULT_USER_AGENT`]
/// - gzip decompression
///
/// # Errors
///
/// Returns [`PipelineError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchApiConfig) -> Result<reqwest::Client, PipelineError> {
    let ua = config
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .gzip(true)
        .build()
        .map_err(|e| PipelineError::Http(format!("failed to build HTTP client: {e}")))
}
