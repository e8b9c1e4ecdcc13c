//! Search API key resolution.
//!
//! The key is taken from the `SERPAPI_KEY` environment variable (a
//! `.env` file in the working directory is loaded by the binary before
//! this runs), falling back to `credentials.api_key` in the config file.

use std::fmt;

use crate::config::CredentialsConfig;
use crate::error::{CollectorError, Result};

/// Environment variable holding the search API key.
pub const API_KEY_ENV: &str = "SERPAPI_KEY";

/// A resolved API key. [`Debug`] never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key obtained elsewhere.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The plaintext key, for building requests.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// Resolve the key from the process environment, then `config`.
///
/// # Errors
///
/// Returns [`CollectorError::Credentials`] if neither source has a
/// non-blank key.
pub fn resolve_api_key(config: &CredentialsConfig) -> Result<ApiKey> {
    resolve_from(std::env::var(API_KEY_ENV).ok(), config)
}

/// Resolve the key from an explicit environment value, then `config`.
///
/// # Errors
///
/// Returns [`CollectorError::Credentials`] if neither source has a
/// non-blank key.
pub fn resolve_from(env_value: Option<String>, config: &CredentialsConfig) -> Result<ApiKey> {
    let from_env = env_value.filter(|v| !v.trim().is_empty());
    if let Some(key) = from_env {
        tracing::debug!(source = API_KEY_ENV, "search API key resolved");
        return Ok(ApiKey(key.trim().to_owned()));
    }
    match config.api_key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => {
            tracing::debug!(source = "config", "search API key resolved");
            Ok(ApiKey(key.to_owned()))
        }
        _ => Err(CollectorError::Credentials(format!(
            "{API_KEY_ENV} is not set and no credentials.api_key is configured"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(key: Option<&str>) -> CredentialsConfig {
        CredentialsConfig {
            api_key: key.map(str::to_owned),
        }
    }

    #[test]
    fn environment_takes_precedence() {
        let key = resolve_from(Some("env-key".into()), &config_with(Some("file-key"))).unwrap();
        assert_eq!(key.expose(), "env-key");
    }

    #[test]
    fn config_used_when_env_missing_or_blank() {
        let key = resolve_from(None, &config_with(Some(" file-key "))).unwrap();
        assert_eq!(key.expose(), "file-key");
        let key = resolve_from(Some("   ".into()), &config_with(Some("file-key"))).unwrap();
        assert_eq!(key.expose(), "file-key");
    }

    #[test]
    fn missing_key_is_credentials_error() {
        let err = resolve_from(None, &config_with(None)).unwrap_err();
        assert!(matches!(err, CollectorError::Credentials(_)));
        assert!(err.to_string().contains(API_KEY_ENV));
        assert!(resolve_from(None, &config_with(Some(""))).is_err());
    }

    #[test]
    fn debug_redacts_key() {
        let key = resolve_from(Some("secret".into()), &config_with(None)).unwrap();
        assert_eq!(format!("{key:?}"), "ApiKey([REDACTED])");
    }
}
