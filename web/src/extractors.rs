//! Custom Axum extractors.

use crate::error::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use ticketline_ledger::AccountId;
use uuid::Uuid;

/// Header carrying the authenticated caller identity.
pub const CALLER_HEADER: &str = "x-caller-id";

/// Authenticated caller identity.
///
/// The ledger never authenticates anyone; a fronting auth layer verifies the
/// caller and forwards the identity in the `X-Caller-Id` header. Requests
/// without a well-formed identity are rejected before any handler runs.
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub AccountId);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(CALLER_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|raw| Uuid::parse_str(raw).ok())
            .map(|id| Self(AccountId::from_uuid(id)))
            .ok_or_else(|| {
                AppError::unauthenticated("missing or malformed X-Caller-Id header")
            })
    }
}
