//! # Transaction Lookup
//!
//! The single lookup routine behind both the query-string and JSON-body
//! entry points: validate, fetch once, map the status, project the body.

use crate::envelope::LookupEnvelope;
use crate::error::{LookupError, LookupResult};
use crate::source::{RawResponse, SharedTransactionSource};
use crate::transaction::{transaction_object, TransactionId, TransactionSummary};
use serde_json::Value;
use tracing::{debug, error, info, warn};

/// Injected lookup configuration
#[derive(Clone)]
pub struct LookupConfig {
    /// Bearer credential for the provider; `None` fails every lookup
    pub api_key: Option<String>,
    /// Echo the untouched upstream object as `rawData` on success
    pub include_raw_data: bool,
}

impl LookupConfig {
    /// Empty keys count as missing
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.is_empty()),
            include_raw_data: true,
        }
    }

    /// Builder: toggle `rawData` in success envelopes
    pub fn with_raw_data(mut self, include: bool) -> Self {
        self.include_raw_data = include;
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

// Never print the credential
impl std::fmt::Debug for LookupConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("include_raw_data", &self.include_raw_data)
            .finish()
    }
}

/// Projected summary plus the upstream object it came from
#[derive(Debug, Clone, PartialEq)]
pub struct LookupOutcome {
    pub summary: TransactionSummary,
    pub raw: Value,
}

/// Stateless lookup service; cheap to clone and share across requests
#[derive(Clone)]
pub struct LookupService {
    config: LookupConfig,
    source: SharedTransactionSource,
}

impl LookupService {
    pub fn new(config: LookupConfig, source: SharedTransactionSource) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    pub fn provider_name(&self) -> &'static str {
        self.source.provider_name()
    }

    /// Look up one transaction.
    ///
    /// Validation and the credential check run before any network access.
    pub async fn lookup(&self, identifier: Option<&str>) -> LookupResult<LookupOutcome> {
        let id = TransactionId::parse(identifier)?;

        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            LookupError::Configuration("Missing Paddle API key configuration".to_string())
        })?;

        debug!(
            "Fetching transaction {} from {}",
            id,
            self.source.provider_name()
        );

        let response = self.source.fetch_transaction(&id, api_key).await?;
        map_response(&id, response)
    }

    /// Look up and render the envelope with its HTTP status
    pub async fn respond(&self, identifier: Option<&str>) -> (u16, LookupEnvelope) {
        match self.lookup(identifier).await {
            Ok(outcome) => {
                info!(
                    "Transaction retrieved: id={:?}, status={:?}",
                    outcome.summary.id, outcome.summary.status
                );
                let raw = self.config.include_raw_data.then_some(outcome.raw);
                (200, LookupEnvelope::success(outcome.summary, raw))
            }
            Err(err) => {
                match &err {
                    LookupError::InvalidRequest(_)
                    | LookupError::NotFound { .. }
                    | LookupError::Unauthorized => {
                        warn!(kind = err.kind(), "Transaction lookup rejected: {}", err)
                    }
                    _ => error!(kind = err.kind(), "Transaction lookup failed: {}", err),
                }
                (err.status_code(), LookupEnvelope::from_error(&err))
            }
        }
    }
}

fn map_response(id: &TransactionId, response: RawResponse) -> LookupResult<LookupOutcome> {
    match response.status {
        404 => {
            return Err(LookupError::NotFound {
                transaction_id: id.to_string(),
            })
        }
        401 => return Err(LookupError::Unauthorized),
        _ if !response.is_success() => {
            return Err(LookupError::Upstream {
                status: response.status,
                body: response.body,
            })
        }
        _ => {}
    }

    let body: Value = serde_json::from_str(&response.body)?;
    let tx = transaction_object(&body)?;

    Ok(LookupOutcome {
        summary: TransactionSummary::from_upstream(tx),
        raw: Value::Object(tx.clone()),
    })
}
