//! # Paddle Configuration
//!
//! Configuration for the Paddle Billing API.
//! The secret is loaded from the environment but may be absent: the server
//! still starts and each lookup reports the missing key instead.

use reqwest::Url;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default Paddle Billing API base
pub const DEFAULT_API_BASE_URL: &str = "https://api.paddle.com";

/// Errors setting up the Paddle client
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaddleError {
    #[error("PADDLE_TIMEOUT_SECS must be a positive integer, got {0:?}")]
    InvalidTimeout(String),

    #[error("Invalid Paddle API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Paddle API configuration
#[derive(Clone)]
pub struct PaddleConfig {
    /// Server-side API key; `None` when unset or empty
    pub api_key: Option<String>,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// Optional request timeout; no timeout when `None`
    pub timeout: Option<Duration>,
}

impl PaddleConfig {
    /// Load configuration from environment variables.
    ///
    /// Env vars:
    /// - `PADDLE_API_KEY` (optional at startup)
    /// - `PADDLE_API_BASE_URL` (default `https://api.paddle.com`)
    /// - `PADDLE_TIMEOUT_SECS` (default: no timeout)
    pub fn from_env() -> Result<Self, PaddleError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_key = env::var("PADDLE_API_KEY").ok().filter(|k| !k.is_empty());

        let api_base_url = env::var("PADDLE_API_BASE_URL")
            .ok()
            .filter(|u| !u.is_empty())
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let timeout = match env::var("PADDLE_TIMEOUT_SECS") {
            Ok(raw) if !raw.is_empty() => Some(parse_timeout(&raw)?),
            _ => None,
        };

        Ok(Self {
            api_key,
            api_base_url,
            timeout,
        })
    }

    /// Create config with an explicit key (for testing)
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Check if a key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Check if using a sandbox key
    pub fn is_sandbox(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|k| k.contains("_sdbx_"))
            .unwrap_or(false)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// URL of a single transaction resource.
    ///
    /// The id is pushed as one percent-encoded path segment, so it can never
    /// address a different resource.
    pub fn transaction_url(&self, transaction_id: &str) -> Result<Url, PaddleError> {
        let mut url = Url::parse(&self.api_base_url)
            .map_err(|e| PaddleError::InvalidBaseUrl(format!("{}: {}", self.api_base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| PaddleError::InvalidBaseUrl(self.api_base_url.clone()))?
            .pop_if_empty()
            .push("transactions")
            .push(transaction_id);

        Ok(url)
    }
}

impl std::fmt::Debug for PaddleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaddleConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, PaddleError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(PaddleError::InvalidTimeout(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_url() {
        let config = PaddleConfig::new("pdl_live_abc");
        assert_eq!(
            config.transaction_url("txn_01hv8x").unwrap().as_str(),
            "https://api.paddle.com/transactions/txn_01hv8x"
        );

        let config = config.with_api_base_url("http://127.0.0.1:9999/");
        assert_eq!(
            config.transaction_url("txn_1").unwrap().as_str(),
            "http://127.0.0.1:9999/transactions/txn_1"
        );
    }

    #[test]
    fn test_transaction_url_encodes_id() {
        let config = PaddleConfig::new("pdl_live_abc");
        let url = config.transaction_url("txn_../customers?x=1").unwrap();
        assert_eq!(url.path(), "/transactions/txn_..%2Fcustomers%3Fx=1");
        assert!(url.query().is_none());
    }

    #[test]
    fn test_invalid_base_url() {
        let config = PaddleConfig::new("pdl_live_abc").with_api_base_url("not a url");
        assert!(matches!(
            config.transaction_url("txn_1"),
            Err(PaddleError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_sandbox_detection() {
        assert!(PaddleConfig::new("pdl_sdbx_apikey_123").is_sandbox());
        assert!(!PaddleConfig::new("pdl_live_apikey_123").is_sandbox());
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("15"), Ok(Duration::from_secs(15)));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("soon").is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let printed = format!("{:?}", PaddleConfig::new("pdl_live_secret"));
        assert!(!printed.contains("pdl_live_secret"));
    }
}
