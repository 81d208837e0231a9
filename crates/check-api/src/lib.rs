//! # check-api
//!
//! HTTP API layer for provencheck-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Transaction lookup endpoints (query string and JSON body)
//! - Read-only report catalog endpoints
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/lookup?transactionId=` | Look up a transaction |
//! | POST | `/lookup` | Look up a transaction (`{"transactionId": ...}`) |
//! | GET/POST | `/api/get-transaction` | Same as `/lookup` |
//! | GET | `/api/v1/reports` | List report offers |
//! | GET | `/api/v1/reports/{car_type}` | Get one offer |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
