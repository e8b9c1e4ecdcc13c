//! Pipeline configuration with sensible defaults.
//!
//! [`SearchApiConfig`] controls how the search API is queried and
//! [`CollectConfig`] bounds a collect run. The defaults keep a run
//! within the free SerpAPI quota.

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::types::SourceEngine;

/// Connection and query parameters for the search API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchApiConfig {
    /// Base URL of the API. Requests go to `{base_url}/search.json`.
    pub base_url: String,
    /// Engine requested from the API.
    pub engine: SourceEngine,
    /// Interface language (`hl`).
    pub language: String,
    /// Country (`gl`).
    pub country: String,
    /// Geographic location the search originates from.
    pub location: String,
    /// Google domain to query.
    pub google_domain: String,
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent. If `None`, a crate-versioned default is used.
    pub user_agent: Option<String>,
}

impl Default for SearchApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://serpapi.com".into(),
            engine: SourceEngine::Google,
            language: "ru".into(),
            country: "ru".into(),
            location: "Russia".into(),
            google_domain: "google.ru".into(),
            timeout_seconds: 30,
            user_agent: None,
        }
    }
}

impl SearchApiConfig {
    /// Validates this configuration.
    ///
    /// Checks:
    /// - `base_url` must not be empty
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.base_url.trim().is_empty() {
            return Err(PipelineError::Config("base_url must not be empty".into()));
        }
        if self.timeout_seconds == 0 {
            return Err(PipelineError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Limits and pacing for a collect run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectConfig {
    /// Maximum number of keywords queried per run.
    pub max_keywords: usize,
    /// Results requested per query (`num`).
    pub result_count: u32,
    /// Offset of the first requested result (`start`).
    pub offset: u32,
    /// Random pause range in milliseconds `(min, max)` between keywords.
    pub request_delay_ms: (u64, u64),
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            max_keywords: 15,
            result_count: 100,
            offset: 0,
            request_delay_ms: (1000, 3000),
        }
    }
}

impl CollectConfig {
    /// Validates this configuration.
    ///
    /// Checks:
    /// - `max_keywords` must be greater than 0
    /// - `result_count` must be greater than 0
    /// - `request_delay_ms.0` must be <= `request_delay_ms.1`
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.max_keywords == 0 {
            return Err(PipelineError::Config(
                "max_keywords must be greater than 0".into(),
            ));
        }
        if self.result_count == 0 {
            return Err(PipelineError::Config(
                "result_count must be greater than 0".into(),
            ));
        }
        if self.request_delay_ms.0 > self.request_delay_ms.1 {
            return Err(PipelineError::Config(
                "request_delay_ms min must be <= max".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_search_config_targets_russian_google() {
        let config = SearchApiConfig::default();
        assert_eq!(config.base_url, "https://serpapi.com");
        assert_eq!(config.engine, SourceEngine::Google);
        assert_eq!(config.language, "ru");
        assert_eq!(config.google_domain, "google.ru");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_collect_config_has_sensible_values() {
        let config = CollectConfig::default();
        assert_eq!(config.max_keywords, 15);
        assert_eq!(config.result_count, 100);
        assert_eq!(config.offset, 0);
        assert_eq!(config.request_delay_ms, (1000, 3000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_base_url_rejected() {
        let config = SearchApiConfig {
            base_url: "  ".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = SearchApiConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn zero_max_keywords_rejected() {
        let config = CollectConfig {
            max_keywords: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_keywords"));
    }

    #[test]
    fn zero_result_count_rejected() {
        let config = CollectConfig {
            result_count: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("result_count"));
    }

    #[test]
    fn invalid_delay_range_rejected() {
        let config = CollectConfig {
            request_delay_ms: (500, 100),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("delay"));
    }

    #[test]
    fn zero_delay_range_valid() {
        let config = CollectConfig {
            request_delay_ms: (0, 0),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: CollectConfig =
            serde_json::from_str(r#"{"max_keywords": 3}"#).expect("parse");
        assert_eq!(config.max_keywords, 3);
        assert_eq!(config.result_count, 100);
    }
}
