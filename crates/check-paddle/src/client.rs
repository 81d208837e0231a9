//! # Paddle Transactions Client
//!
//! `TransactionSource` backed by the Paddle Billing API
//! (`GET /transactions/{id}`).

use crate::config::{PaddleConfig, PaddleError};
use async_trait::async_trait;
use check_core::{LookupError, LookupResult, RawResponse, TransactionId, TransactionSource};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use tracing::{debug, error, instrument};

/// Paddle transaction source
///
/// Makes exactly one request per lookup. No retries.
pub struct PaddleClient {
    config: PaddleConfig,
    client: Client,
}

impl PaddleClient {
    /// Create a client, honoring the configured timeout if any
    pub fn new(config: PaddleConfig) -> Result<Self, PaddleError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| PaddleError::HttpClient(e.to_string()))?;

        // Surface a bad base URL at startup, not on the first lookup
        config.transaction_url("txn_0")?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl TransactionSource for PaddleClient {
    #[instrument(skip(self, id, api_key), fields(transaction_id = %id))]
    async fn fetch_transaction(
        &self,
        id: &TransactionId,
        api_key: &str,
    ) -> LookupResult<RawResponse> {
        let url = self
            .config
            .transaction_url(id.as_str())
            .map_err(|e| LookupError::Internal(e.to_string()))?;

        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", api_key))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| {
                error!("Paddle request failed: {}", e);
                LookupError::Internal(e.to_string())
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| LookupError::Internal(e.to_string()))?;

        if !(200..300).contains(&status) {
            error!("Paddle API error: status={}, body={}", status, body);
        }

        Ok(RawResponse { status, body })
    }

    fn provider_name(&self) -> &'static str {
        "paddle"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> PaddleClient {
        let config = PaddleConfig::new("pdl_sdbx_test").with_api_base_url(server.uri());
        PaddleClient::new(config).unwrap()
    }

    fn txn(id: &str) -> TransactionId {
        TransactionId::parse(Some(id)).unwrap()
    }

    #[tokio::test]
    async fn test_sends_bearer_and_returns_body() {
        let server = MockServer::start().await;
        let body = json!({ "data": { "id": "txn_01hv8x", "status": "paid" } });

        Mock::given(method("GET"))
            .and(path("/transactions/txn_01hv8x"))
            .and(header("authorization", "Bearer pdl_sdbx_test"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&server)
            .await;

        let raw = client_for(&server)
            .fetch_transaction(&txn("txn_01hv8x"), "pdl_sdbx_test")
            .await
            .unwrap();

        assert_eq!(raw.status, 200);
        let parsed: serde_json::Value = serde_json::from_str(&raw.body).unwrap();
        assert_eq!(parsed, body);
    }

    #[tokio::test]
    async fn test_non_success_status_is_returned_raw() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/transactions/txn_limited"))
            .respond_with(ResponseTemplate::new(429).set_body_string("too many requests"))
            .mount(&server)
            .await;

        let raw = client_for(&server)
            .fetch_transaction(&txn("txn_limited"), "pdl_sdbx_test")
            .await
            .unwrap();

        assert_eq!(raw, RawResponse::new(429, "too many requests"));
    }

    #[tokio::test]
    async fn test_not_found_is_returned_raw() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/transactions/txn_missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let raw = client_for(&server)
            .fetch_transaction(&txn("txn_missing"), "pdl_sdbx_test")
            .await
            .unwrap();

        assert_eq!(raw.status, 404);
    }

    #[tokio::test]
    async fn test_transport_failure_is_internal() {
        // Nothing listens on port 9 locally
        let config = PaddleConfig::new("pdl_sdbx_test").with_api_base_url("http://127.0.0.1:9");
        let client = PaddleClient::new(config).unwrap();

        let err = client
            .fetch_transaction(&txn("txn_01hv8x"), "pdl_sdbx_test")
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::Internal(_)));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let config = PaddleConfig::new("pdl_sdbx_test").with_api_base_url("::nope::");
        assert!(PaddleClient::new(config).is_err());
    }
}
