//! SerpAPI backend: Google organic results through a paid JSON API.
//!
//! SerpAPI takes the API key as a query parameter, so every error built
//! from a [`reqwest::Error`] is stripped of its URL before it reaches a
//! log line.

use std::fmt;

use crate::config::SearchApiConfig;
use crate::engine::{QueryParams, RawResponse, SearchBackend};
use crate::error::PipelineError;
use crate::http;
use crate::types::SourceEngine;

/// SerpAPI search client.
pub struct SerpApiEngine {
    config: SearchApiConfig,
    api_key: String,
    client: reqwest::Client,
}

impl fmt::Debug for SerpApiEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerpApiEngine")
            .field("base_url", &self.config.base_url)
            .field("engine", &self.config.engine)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl SerpApiEngine {
    /// Create an engine for `config`, authenticating with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if the configuration is invalid
    /// or the key is empty, and [`PipelineError::Http`] if the HTTP
    /// client cannot be built.
    pub fn new(config: SearchApiConfig, api_key: impl Into<String>) -> Result<Self, PipelineError> {
        config.validate()?;
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(PipelineError::Config("search API key is empty".into()));
        }
        let client = http::build_client(&config)?;
        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/search.json", self.config.base_url.trim_end_matches('/'))
    }
}

impl SearchBackend for SerpApiEngine {
    async fn search(
        &self,
        keyword: &str,
        params: &QueryParams,
    ) -> Result<RawResponse, PipelineError> {
        tracing::info!(keyword, offset = params.offset, "querying SerpAPI");

        let num = params.result_count.to_string();
        let start = params.offset.to_string();

        let response = self
            .client
            .get(self.endpoint())
            .query(&[
                ("q", keyword),
                ("api_key", self.api_key.as_str()),
                ("engine", self.config.engine.id()),
                ("hl", self.config.language.as_str()),
                ("gl", self.config.country.as_str()),
                ("location", self.config.location.as_str()),
                ("google_domain", self.config.google_domain.as_str()),
                ("num", num.as_str()),
                ("start", start.as_str()),
            ])
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| PipelineError::Http(format!("SerpAPI request failed: {}", e.without_url())))?
            .error_for_status()
            .map_err(|e| PipelineError::Http(format!("SerpAPI HTTP error: {}", e.without_url())))?;

        let raw: RawResponse = response.json().await.map_err(|e| {
            PipelineError::Parse(format!("SerpAPI response is not JSON: {}", e.without_url()))
        })?;

        let raw = require_organic_results(raw, keyword)?;
        let count = raw["organic_results"].as_array().map_or(0, Vec::len);
        tracing::info!(keyword, count, "SerpAPI returned organic results");
        Ok(raw)
    }

    fn engine_type(&self) -> SourceEngine {
        self.config.engine
    }
}

/// Accept a payload only if it carries an `organic_results` array.
///
/// SerpAPI reports quota and query problems as a 200 response with an
/// `error` field, so the message is surfaced when present.
fn require_organic_results(raw: RawResponse, keyword: &str) -> Result<RawResponse, PipelineError> {
    if raw.get("organic_results").is_some_and(|v| v.is_array()) {
        return Ok(raw);
    }
    match raw.get("error").and_then(|v| v.as_str()) {
        Some(message) => Err(PipelineError::NoResults(format!("{keyword}: {message}"))),
        None => Err(PipelineError::NoResults(keyword.to_owned())),
    }
}
