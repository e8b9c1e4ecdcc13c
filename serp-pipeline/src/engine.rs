//! Trait definition for pluggable search API backends.
//!
//! The collect pipeline only needs one capability from upstream: run a
//! keyword query and hand back the raw JSON payload. [`SearchBackend`]
//! captures that so the pipeline can be driven by SerpAPI in production
//! and by canned payloads in tests.

use crate::error::PipelineError;
use crate::types::SourceEngine;

/// Raw, unvalidated search API payload.
pub type RawResponse = serde_json::Value;

/// Paging parameters for a single upstream query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryParams {
    /// Number of results requested.
    pub result_count: u32,
    /// Index of the first requested result.
    pub offset: u32,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            result_count: 100,
            offset: 0,
        }
    }
}

/// A search API backend.
///
/// Implementations own their HTTP client and credentials. Any failure
/// (transport error, bad status, payload without organic results) is
/// returned as an error; the pipeline logs it and moves on to the next
/// keyword, so implementations never need to retry.
pub trait SearchBackend: Send + Sync {
    /// Run one query for `keyword` and return the raw payload.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] if the request fails or the payload
    /// carries no organic results.
    fn search(
        &self,
        keyword: &str,
        params: &QueryParams,
    ) -> impl std::future::Future<Output = Result<RawResponse, PipelineError>> + Send;

    /// Which engine the records from this backend are attributed to.
    fn engine_type(&self) -> SourceEngine;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// A canned backend for testing trait bounds and async execution.
    struct MockBackend {
        payload: Option<RawResponse>,
    }

    impl SearchBackend for MockBackend {
        async fn search(
            &self,
            _keyword: &str,
            _params: &QueryParams,
        ) -> Result<RawResponse, PipelineError> {
            self.payload
                .clone()
                .ok_or_else(|| PipelineError::Http("mock backend failure".into()))
        }

        fn engine_type(&self) -> SourceEngine {
            SourceEngine::Google
        }
    }

    #[test]
    fn mock_backend_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockBackend>();
    }

    #[test]
    fn default_params_request_first_hundred() {
        let params = QueryParams::default();
        assert_eq!(params.result_count, 100);
        assert_eq!(params.offset, 0);
    }

    #[tokio::test]
    async fn mock_backend_returns_payload() {
        let backend = MockBackend {
            payload: Some(json!({"organic_results": []})),
        };
        let raw = backend
            .search("test", &QueryParams::default())
            .await
            .expect("should succeed");
        assert!(raw["organic_results"].is_array());
    }

    #[tokio::test]
    async fn mock_backend_propagates_errors() {
        let backend = MockBackend { payload: None };
        let err = backend
            .search("test", &QueryParams::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("mock backend failure"));
    }
}
