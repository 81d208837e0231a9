//! # Response Envelope
//!
//! The uniform JSON body returned by every lookup path, success or failure.

use crate::error::LookupError;
use crate::transaction::TransactionSummary;
use serde::Serialize;
use serde_json::Value;

pub const MSG_RETRIEVED: &str = "Transaction retrieved successfully";
pub const MSG_NOT_FOUND: &str = "Transaction not found";
pub const MSG_UNAUTHORIZED: &str = "Unauthorized - Invalid API key";
pub const MSG_UPSTREAM_FAILED: &str = "Failed to fetch transaction from Paddle";
pub const MSG_INTERNAL: &str = "Internal server error while fetching transaction";

/// `{ success, message?, transaction?, rawData?, transactionId?, error? }`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupEnvelope {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction: Option<TransactionSummary>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LookupEnvelope {
    fn failure() -> Self {
        Self {
            success: false,
            message: None,
            transaction: None,
            raw_data: None,
            transaction_id: None,
            error: None,
        }
    }

    /// Successful lookup; `raw_data` is `None` when raw exposure is disabled
    pub fn success(transaction: TransactionSummary, raw_data: Option<Value>) -> Self {
        Self {
            success: true,
            message: Some(MSG_RETRIEVED.to_string()),
            transaction: Some(transaction),
            raw_data,
            transaction_id: None,
            error: None,
        }
    }

    /// Render a lookup error as an envelope
    pub fn from_error(err: &LookupError) -> Self {
        let mut env = Self::failure();
        match err {
            LookupError::InvalidRequest(msg) => env.message = Some(msg.clone()),
            LookupError::Configuration(msg) => env.error = Some(msg.clone()),
            LookupError::Unauthorized => env.message = Some(MSG_UNAUTHORIZED.to_string()),
            LookupError::NotFound { transaction_id } => {
                env.message = Some(MSG_NOT_FOUND.to_string());
                env.transaction_id = Some(transaction_id.clone());
            }
            LookupError::Upstream { body, .. } => {
                env.message = Some(MSG_UPSTREAM_FAILED.to_string());
                env.error = Some(body.clone());
            }
            LookupError::Internal(msg) => {
                env.message = Some(MSG_INTERNAL.to_string());
                env.error = Some(msg.clone());
            }
        }
        env
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_found_envelope() {
        let env = LookupEnvelope::from_error(&LookupError::NotFound {
            transaction_id: "txn_missing".into(),
        });
        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            json!({
                "success": false,
                "message": "Transaction not found",
                "transactionId": "txn_missing"
            })
        );
    }

    #[test]
    fn test_unauthorized_envelope() {
        let env = LookupEnvelope::from_error(&LookupError::Unauthorized);
        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            json!({ "success": false, "message": "Unauthorized - Invalid API key" })
        );
    }

    #[test]
    fn test_configuration_envelope_has_no_message() {
        let env = LookupEnvelope::from_error(&LookupError::Configuration(
            "Missing Paddle API key configuration".into(),
        ));
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["error"], "Missing Paddle API key configuration");
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_upstream_envelope_carries_body() {
        let env = LookupEnvelope::from_error(&LookupError::Upstream {
            status: 429,
            body: "{\"error\":\"slow down\"}".into(),
        });
        assert_eq!(env.message.as_deref(), Some(MSG_UPSTREAM_FAILED));
        assert_eq!(env.error.as_deref(), Some("{\"error\":\"slow down\"}"));
    }
}
