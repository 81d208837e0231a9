//! # check-paddle
//!
//! Paddle Billing transaction source for provencheck.
//!
//! `PaddleClient` implements `check_core::TransactionSource` against
//! `GET {base}/transactions/{id}` with a bearer API key.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use check_core::{LookupConfig, LookupService};
//! use check_paddle::{PaddleClient, PaddleConfig};
//! use std::sync::Arc;
//!
//! let config = PaddleConfig::from_env()?;
//! let lookup = LookupConfig::new(config.api_key.clone());
//! let service = LookupService::new(lookup, Arc::new(PaddleClient::new(config)?));
//!
//! let (status, envelope) = service.respond(Some("txn_01hv8x")).await;
//! ```

pub mod client;
pub mod config;

// Re-exports
pub use client::PaddleClient;
pub use config::{PaddleConfig, PaddleError, DEFAULT_API_BASE_URL};
