//! Error types for the collector application.

use serp_pipeline::PipelineError;

/// Top-level error type for the collector.
#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    /// Aggregation pipeline error.
    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Missing or unusable search API credentials.
    #[error("credentials error: {0}")]
    Credentials(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, CollectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_error_converts_and_nests_message() {
        let err: CollectorError = PipelineError::Store("disk full".into()).into();
        assert_eq!(err.to_string(), "pipeline error: store error: disk full");
    }

    #[test]
    fn display_credentials() {
        let err = CollectorError::Credentials("SERPAPI_KEY is not set".into());
        assert_eq!(err.to_string(), "credentials error: SERPAPI_KEY is not set");
    }
}
