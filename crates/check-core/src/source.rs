//! # Transaction Source Trait
//!
//! The narrow seam between the lookup and the payments provider.
//! Production uses the Paddle client; tests plug in canned responses.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │          TransactionSource (trait)           │
//! │  ├── fetch_transaction()                     │
//! │  └── provider_name()                         │
//! └──────────────────────────────────────────────┘
//!                       ▲
//!          ┌────────────┴────────────┐
//!  ┌───────┴───────┐         ┌───────┴───────┐
//!  │ PaddleClient  │         │ canned fakes  │
//!  └───────────────┘         └───────────────┘
//! ```

use crate::error::LookupResult;
use crate::transaction::TransactionId;
use async_trait::async_trait;
use std::sync::Arc;

/// Uninterpreted result of one upstream request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body text
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for any 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Fetches a single transaction from the payments provider.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetch the transaction resource.
    ///
    /// # Arguments
    /// * `id` - A validated transaction id
    /// * `api_key` - Bearer credential for the provider
    ///
    /// # Returns
    /// The raw status and body. Only transport failures are errors here;
    /// non-2xx statuses are returned as-is for the caller to map.
    async fn fetch_transaction(&self, id: &TransactionId, api_key: &str)
        -> LookupResult<RawResponse>;

    /// Provider name (for logging)
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared transaction source (dynamic dispatch)
pub type SharedTransactionSource = Arc<dyn TransactionSource>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_response_success_range() {
        assert!(RawResponse::new(200, "{}").is_success());
        assert!(RawResponse::new(204, "").is_success());
        assert!(!RawResponse::new(302, "").is_success());
        assert!(!RawResponse::new(404, "").is_success());
    }
}
