//! # Routes
//!
//! Axum router configuration for the lookup API.

use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Lookup (GET takes `?transactionId=`, POST takes `{"transactionId": ...}`):
///   - GET/POST /lookup
///   - GET/POST /api/get-transaction - path the storefront already calls
///
/// - Catalog:
///   - GET /api/v1/reports - List report offers
///   - GET /api/v1/reports/{car_type} - Offer for one car type
///
/// - GET /health, GET / - Health check
pub fn create_router(state: AppState) -> Router {
    // The storefront calls these from the browser
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let lookup = get(handlers::lookup_by_query).post(handlers::lookup_by_body);

    let api_routes = Router::new()
        .route("/reports", get(handlers::list_reports))
        .route("/reports/{car_type}", get(handlers::get_report));

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // Lookup
        .route("/lookup", lookup.clone())
        .route("/api/get-transaction", lookup)
        // API v1
        .nest("/api/v1", api_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
