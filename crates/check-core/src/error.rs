//! # Lookup Error Types
//!
//! Typed error handling for the transaction lookup.
//! Every lookup operation returns `Result<T, LookupError>`.

use thiserror::Error;

/// Core error type for the transaction lookup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Client supplied a missing or malformed transaction id
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Deployment is missing a required secret
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Upstream rejected our credential
    #[error("Unauthorized - Invalid API key")]
    Unauthorized,

    /// Upstream has no transaction with this id
    #[error("Transaction not found: {transaction_id}")]
    NotFound { transaction_id: String },

    /// Upstream answered with some other non-2xx status
    #[error("Upstream error [{status}]: {body}")]
    Upstream { status: u16, body: String },

    /// Network, parse, or any other unexpected failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LookupError {
    /// Returns the HTTP status code appropriate for this error.
    ///
    /// `Upstream` passes the upstream status through unchanged.
    pub fn status_code(&self) -> u16 {
        match self {
            LookupError::InvalidRequest(_) => 400,
            LookupError::Configuration(_) => 500,
            LookupError::Unauthorized => 401,
            LookupError::NotFound { .. } => 404,
            LookupError::Upstream { status, .. } => *status,
            LookupError::Internal(_) => 500,
        }
    }

    /// Short machine-readable kind, used as a tracing field
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::InvalidRequest(_) => "invalid_request",
            LookupError::Configuration(_) => "configuration",
            LookupError::Unauthorized => "unauthorized",
            LookupError::NotFound { .. } => "not_found",
            LookupError::Upstream { .. } => "upstream",
            LookupError::Internal(_) => "internal",
        }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        LookupError::Internal(err.to_string())
    }
}

/// Result type alias for lookup operations
pub type LookupResult<T> = Result<T, LookupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(LookupError::InvalidRequest("x".into()).status_code(), 400);
        assert_eq!(LookupError::Configuration("x".into()).status_code(), 500);
        assert_eq!(LookupError::Unauthorized.status_code(), 401);
        assert_eq!(
            LookupError::NotFound {
                transaction_id: "txn_1".into()
            }
            .status_code(),
            404
        );
        assert_eq!(LookupError::Internal("boom".into()).status_code(), 500);
    }

    #[test]
    fn test_upstream_status_passthrough() {
        let err = LookupError::Upstream {
            status: 503,
            body: "maintenance".into(),
        };
        assert_eq!(err.status_code(), 503);
        assert_eq!(err.kind(), "upstream");
    }

    #[test]
    fn test_json_error_is_internal() {
        let err: LookupError = serde_json::from_str::<serde_json::Value>("not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, LookupError::Internal(_)));
    }
}
