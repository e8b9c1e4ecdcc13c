//! Error types for the serp-pipeline crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. API keys never appear in error messages.

/// Errors that can occur while collecting or aggregating search results.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// An HTTP request to the search API failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The search API answered without any organic results.
    #[error("no organic results: {0}")]
    NoResults(String),

    /// Failed to parse a search API payload or a stored batch artifact.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid pipeline configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A batch artifact or final output could not be written.
    #[error("store error: {0}")]
    Store(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for serp-pipeline results.
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_http() {
        let err = PipelineError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_no_results() {
        let err = PipelineError::NoResults("кредит для ИП".into());
        assert_eq!(err.to_string(), "no organic results: кредит для ИП");
    }

    #[test]
    fn display_parse() {
        let err = PipelineError::Parse("expected array".into());
        assert_eq!(err.to_string(), "parse error: expected array");
    }

    #[test]
    fn display_config() {
        let err = PipelineError::Config("max_keywords must be > 0".into());
        assert_eq!(err.to_string(), "config error: max_keywords must be > 0");
    }

    #[test]
    fn display_store() {
        let err = PipelineError::Store("read-only filesystem".into());
        assert_eq!(err.to_string(), "store error: read-only filesystem");
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PipelineError = io.into();
        assert!(err.to_string().starts_with("I/O error"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PipelineError>();
    }
}
