//! # Ticketline Web
//!
//! Axum HTTP surface for the Ticketline ledger.
//!
//! The ledger core is a synchronous, single-writer state machine; this crate
//! is the imperative shell around it:
//!
//! 1. **HTTP request** arrives at an Axum handler
//! 2. **Caller identity** is extracted from the `X-Caller-Id` header
//!    (authentication itself happens upstream)
//! 3. The handler takes the ledger's **write guard for the whole
//!    operation**, the single mutual-exclusion boundary the accounting
//!    rules require, or the read guard for queries
//! 4. The typed ledger error, if any, maps to an HTTP status and a JSON
//!    `{code, message}` body

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::ServerConfig;
pub use error::AppError;
pub use extractors::{CALLER_HEADER, Caller};
pub use router::router;
pub use state::AppState;
