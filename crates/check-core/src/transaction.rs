//! # Transaction Types
//!
//! Transaction identifier and the flattened summary returned to callers.
//! The summary is projected from the upstream transaction object without
//! assuming its full shape: missing or mistyped fields fall back to the
//! defaults below instead of failing the lookup.

use crate::error::{LookupError, LookupResult};
use serde::Serialize;
use serde_json::{Map, Value};

/// Prefix every upstream transaction id carries
pub const TRANSACTION_ID_PREFIX: &str = "txn_";

/// Placeholder for absent display fields
pub const NOT_AVAILABLE: &str = "N/A";

/// A validated transaction identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionId(String);

impl TransactionId {
    /// Validate a raw identifier.
    ///
    /// Missing and empty ids are rejected first, then anything without the
    /// `txn_` prefix.
    pub fn parse(raw: Option<&str>) -> LookupResult<Self> {
        let raw = match raw {
            Some(s) if !s.is_empty() => s,
            _ => {
                return Err(LookupError::InvalidRequest(
                    "Transaction ID is required".to_string(),
                ))
            }
        };

        if !raw.starts_with(TRANSACTION_ID_PREFIX) {
            return Err(LookupError::InvalidRequest(format!(
                "Invalid transaction ID format. Transaction ID should start with \"{}\"",
                TRANSACTION_ID_PREFIX
            )));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One purchased line in a transaction.
///
/// `priceId` and `quantity` are copied as-is from upstream and omitted only
/// when upstream omits them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Value>,
    pub description: String,
}

/// Flattened, read-only view of an upstream transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Grand total as the upstream formats it, or `"N/A"`
    pub amount: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Upstream timestamp, passed through unparsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,

    /// Always serialized; `null` when the transaction has no subscription
    pub subscription_id: Option<String>,

    /// Always serialized; empty when upstream sends no items
    pub items: Vec<TransactionItem>,

    /// Opaque passthrough, `null` when absent
    pub billing_details: Value,

    /// Method type of the first payment attempt, or `"N/A"`
    pub payment_method: String,
}

impl TransactionSummary {
    /// Project the upstream transaction object into a summary
    pub fn from_upstream(tx: &Map<String, Value>) -> Self {
        let amount = tx
            .get("details")
            .and_then(|d| d.get("totals"))
            .and_then(|t| t.get("grand_total"))
            .and_then(non_empty_text)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let items = tx
            .get("items")
            .and_then(|v| v.as_array())
            .map(|items| items.iter().map(project_item).collect())
            .unwrap_or_default();

        let billing_details = match tx.get("billing_details") {
            Some(v) if is_truthy(v) => v.clone(),
            _ => Value::Null,
        };

        let payment_method = tx
            .get("payments")
            .and_then(|p| p.get(0))
            .and_then(|p| p.get("method_details"))
            .and_then(|m| m.get("type"))
            .and_then(non_empty_text)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        Self {
            id: string_field(tx, "id"),
            status: string_field(tx, "status"),
            amount,
            currency: string_field(tx, "currency_code"),
            created_at: string_field(tx, "created_at"),
            updated_at: string_field(tx, "updated_at"),
            customer_id: string_field(tx, "customer_id"),
            subscription_id: tx.get("subscription_id").and_then(non_empty_text),
            items,
            billing_details,
            payment_method,
        }
    }
}

/// Extract the `data` object from an upstream response body
pub fn transaction_object(body: &Value) -> LookupResult<&Map<String, Value>> {
    body.get("data").and_then(|d| d.as_object()).ok_or_else(|| {
        LookupError::Internal("Upstream response is missing transaction data".to_string())
    })
}

fn project_item(item: &Value) -> TransactionItem {
    TransactionItem {
        price_id: item.get("price_id").cloned(),
        quantity: item.get("quantity").cloned(),
        description: item
            .get("price")
            .and_then(|p| p.get("description"))
            .and_then(non_empty_text)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    }
}

fn string_field(tx: &Map<String, Value>, key: &str) -> Option<String> {
    tx.get(key).and_then(|v| v.as_str()).map(String::from)
}

// Upstream sometimes sends amounts as numbers; keep them as text
fn non_empty_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}
