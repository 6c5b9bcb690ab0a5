//! Error types for web handlers.
//!
//! Bridges the ledger's error taxonomy to HTTP responses via Axum's
//! `IntoResponse`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;
use ticketline_ledger::{ErrorKind, LedgerError};

/// Application error type for web handlers.
///
/// Wraps a status code, a machine-readable code, and a user-facing message.
/// Ledger errors convert via `From`, so handlers can use `?` directly on
/// ledger calls.
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error code (for client error handling)
    code: String,
    /// Error message (user-facing)
    message: String,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, code: String, message: String) -> Self {
        Self {
            status,
            code,
            message,
        }
    }

    /// Create a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST".to_string(),
            message.into(),
        )
    }

    /// Create a 401 Unauthenticated error.
    #[must_use]
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "UNAUTHENTICATED".to_string(),
            message.into(),
        )
    }
}

/// Maps a ledger failure category to the HTTP status it surfaces as.
const fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Unauthorized => StatusCode::FORBIDDEN,
        ErrorKind::InvalidState | ErrorKind::CapacityExceeded => StatusCode::CONFLICT,
        ErrorKind::PaymentMismatch => StatusCode::PAYMENT_REQUIRED,
        ErrorKind::InsufficientFunds => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::InvalidInput => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let kind = err.kind();
        Self::new(
            status_for(kind),
            kind.code().to_string(),
            err.to_string(),
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Error code (for client error handling).
    code: String,
    /// Human-readable error message.
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                status = %self.status,
                code = %self.code,
                message = %self.message,
                "internal error surfaced to client"
            );
        } else {
            tracing::debug!(
                status = %self.status,
                code = %self.code,
                message = %self.message,
                "request rejected"
            );
        }

        let body = ErrorResponse {
            code: self.code,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticketline_ledger::{EventId, Money};

    #[test]
    fn ledger_errors_map_to_statuses() {
        let not_found: AppError = LedgerError::EventNotFound(EventId::new(3)).into();
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);
        assert_eq!(not_found.code, "NOT_FOUND");

        let forbidden: AppError = LedgerError::NotOrganizer.into();
        assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

        let mismatch: AppError = LedgerError::PaymentMismatch {
            expected: Money::from_cents(50),
            offered: Money::from_cents(49),
        }
        .into();
        assert_eq!(mismatch.status, StatusCode::PAYMENT_REQUIRED);

        let conflict: AppError = LedgerError::SoldOut.into();
        assert_eq!(conflict.status, StatusCode::CONFLICT);
    }

    #[test]
    fn display_carries_code_and_message() {
        let err = AppError::bad_request("missing field");
        assert_eq!(err.to_string(), "[BAD_REQUEST] missing field");
    }
}
