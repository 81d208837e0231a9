//! # Request Handlers
//!
//! Axum request handlers for the lookup API.
//! The GET and POST lookup handlers only extract the identifier; both hand
//! it to the same `LookupService::respond`.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use check_core::{CarType, LookupEnvelope, LookupError, LookupResult, ReportOffer};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, instrument};

const TRANSACTION_ID_FIELD: &str = "transactionId";

// =============================================================================
// Request/Response Types
// =============================================================================

/// A report offer as served, with its formatted price
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferView<'a> {
    #[serde(flatten)]
    pub offer: &'a ReportOffer,
    pub display_price: String,
}

impl<'a> From<&'a ReportOffer> for OfferView<'a> {
    fn from(offer: &'a ReportOffer) -> Self {
        Self {
            offer,
            display_price: offer.price.display(),
        }
    }
}

/// Error response for non-lookup endpoints
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

fn envelope_response(status: u16, envelope: LookupEnvelope) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
    (status, Json(envelope)).into_response()
}

fn error_envelope(err: LookupError) -> Response {
    error!(kind = err.kind(), "Rejected lookup request: {}", err);
    envelope_response(err.status_code(), LookupEnvelope::from_error(&err))
}

/// First `transactionId` in the query string; later repeats are ignored.
fn query_transaction_id(pairs: Vec<(String, String)>) -> Option<String> {
    pairs
        .into_iter()
        .find(|(key, _)| key == TRANSACTION_ID_FIELD)
        .map(|(_, value)| value)
}

/// Pull `transactionId` out of a JSON body.
///
/// Absent, `null`, `false`, `0` and `""` all read as "not supplied" and end
/// up as a 400. Any other non-string value, a `null` body, or bytes that are
/// not JSON at all are internal errors.
fn body_transaction_id(body: &[u8]) -> LookupResult<Option<String>> {
    let value: Value = serde_json::from_slice(body)?;
    if value.is_null() {
        return Err(LookupError::Internal(
            "request body must not be null".to_string(),
        ));
    }

    match value.get(TRANSACTION_ID_FIELD) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::String(id)) if id.is_empty() => Ok(None),
        Some(Value::String(id)) => Ok(Some(id.clone())),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(None),
        Some(other) => Err(LookupError::Internal(format!(
            "transactionId must be a string, got {}",
            other
        ))),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "provencheck",
        "version": env!("CARGO_PKG_VERSION"),
        "paddleConfigured": state.paddle_configured(),
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Look up a transaction by query string
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4(), entry = "query"))]
pub async fn lookup_by_query(
    State(state): State<AppState>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let transaction_id = match params {
        Ok(Query(pairs)) => query_transaction_id(pairs),
        Err(rejection) => return error_envelope(LookupError::Internal(rejection.body_text())),
    };

    let (status, envelope) = state.lookup.respond(transaction_id.as_deref()).await;
    envelope_response(status, envelope)
}

/// Look up a transaction by JSON body.
///
/// The body is parsed here rather than through `Json` so that malformed
/// input still gets an envelope.
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4(), entry = "body"))]
pub async fn lookup_by_body(State(state): State<AppState>, body: Bytes) -> Response {
    let transaction_id = match body_transaction_id(&body) {
        Ok(id) => id,
        Err(e) => return error_envelope(e),
    };

    let (status, envelope) = state.lookup.respond(transaction_id.as_deref()).await;
    envelope_response(status, envelope)
}

/// List active report offers
pub async fn list_reports(State(state): State<AppState>) -> impl IntoResponse {
    let reports: Vec<OfferView> = state.catalog.active_offers().map(OfferView::from).collect();
    Json(serde_json::json!({
        "reports": reports,
        "count": reports.len()
    }))
}

/// Get the offer for one car type
pub async fn get_report(
    State(state): State<AppState>,
    Path(car_type): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let not_found = || {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                format!("Report not found: {}", car_type),
                404,
            )),
        )
    };

    let car_type: CarType = car_type.parse().map_err(|_| not_found())?;
    let offer = state
        .catalog
        .get(car_type)
        .filter(|offer| offer.active)
        .ok_or_else(not_found)?;

    Ok(Json(OfferView::from(offer)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Test error", 404);
        assert_eq!(err.error, "Test error");
        assert_eq!(err.code, 404);
    }

    #[test]
    fn test_envelope_status_passthrough() {
        let err = LookupError::Upstream {
            status: 503,
            body: "down".into(),
        };
        let response = envelope_response(err.status_code(), LookupEnvelope::from_error(&err));
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_query_first_value_wins() {
        let pairs = vec![
            ("other".to_string(), "x".to_string()),
            ("transactionId".to_string(), "txn_1".to_string()),
            ("transactionId".to_string(), "txn_2".to_string()),
        ];
        assert_eq!(query_transaction_id(pairs), Some("txn_1".to_string()));
        assert_eq!(query_transaction_id(Vec::new()), None);
    }

    #[test]
    fn test_body_falsy_ids_read_as_missing() {
        for body in [
            "{}",
            r#"{"transactionId": null}"#,
            r#"{"transactionId": false}"#,
            r#"{"transactionId": 0}"#,
            r#"{"transactionId": 0.0}"#,
            r#"{"transactionId": ""}"#,
            "[]",
            "42",
        ] {
            assert_eq!(body_transaction_id(body.as_bytes()).unwrap(), None, "{}", body);
        }
    }

    #[test]
    fn test_body_string_id() {
        let id = body_transaction_id(br#"{"transactionId": "txn_01hv8x"}"#).unwrap();
        assert_eq!(id.as_deref(), Some("txn_01hv8x"));
    }

    #[test]
    fn test_body_truthy_non_string_is_internal() {
        for body in [
            r#"{"transactionId": 42}"#,
            r#"{"transactionId": true}"#,
            r#"{"transactionId": ["txn_1"]}"#,
            r#"{"transactionId": {}}"#,
            "null",
            "{not json",
        ] {
            let err = body_transaction_id(body.as_bytes()).unwrap_err();
            assert!(matches!(err, LookupError::Internal(_)), "{}", body);
        }
    }

    #[test]
    fn test_offer_view_display_price() {
        let catalog = check_core::ReportCatalog::default_catalog();
        let offer = catalog.get(CarType::Sedan).unwrap();
        let json = serde_json::to_value(OfferView::from(offer)).unwrap();

        assert_eq!(json["displayPrice"], "$60.00");
        assert_eq!(json["priceId"], "pri_01kcvwfzy6kffsgz4v9s3d8fx9");
        assert_eq!(json["price"]["amount"], 6000);
    }
}
