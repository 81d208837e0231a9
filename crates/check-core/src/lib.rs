//! # check-core
//!
//! Core types and traits for the provencheck transaction lookup.
//!
//! This crate provides:
//! - `TransactionSource` trait for plugging in the payments provider
//! - `LookupService` that validates, fetches and projects one transaction
//! - `TransactionSummary` and `LookupEnvelope` for the JSON contract
//! - `ReportCatalog` for the priced report offers
//! - `LookupError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use check_core::{LookupConfig, LookupService};
//!
//! let service = LookupService::new(LookupConfig::new(Some(api_key)), source);
//!
//! // Status code plus the envelope to serialize
//! let (status, envelope) = service.respond(Some("txn_01hv8x")).await;
//! ```

pub mod envelope;
pub mod error;
pub mod lookup;
pub mod report;
pub mod source;
pub mod transaction;

// Re-exports for convenience
pub use envelope::LookupEnvelope;
pub use error::{LookupError, LookupResult};
pub use lookup::{LookupConfig, LookupOutcome, LookupService};
pub use report::{CarType, Currency, Price, ReportCatalog, ReportOffer};
pub use source::{RawResponse, SharedTransactionSource, TransactionSource};
pub use transaction::{TransactionId, TransactionItem, TransactionSummary};
