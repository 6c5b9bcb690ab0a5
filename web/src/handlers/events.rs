//! Event operation endpoints.
//!
//! - POST /api/events - create an event
//! - POST /api/events/:id/cancel - cancel (organizer only)
//! - POST /api/events/:id/complete - complete (organizer only)
//! - POST /api/events/:id/withdraw - drain a completed event's escrow

use crate::error::AppError;
use crate::extractors::Caller;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ticketline_ledger::{Event, EventId, Money};
use uuid::Uuid;

/// Request to create a new event.
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    /// Display name
    pub name: String,
    /// Exact per-ticket price in cents (zero for free events)
    pub price: u64,
    /// Capacity
    pub total_tickets: u32,
    /// Off-ledger metadata reference
    pub metadata_cid: String,
}

/// Response after creating an event.
#[derive(Debug, Serialize)]
pub struct CreateEventResponse {
    /// Assigned event id
    pub event_id: u64,
}

/// Response after a withdrawal.
#[derive(Debug, Serialize)]
pub struct WithdrawResponse {
    /// Exact amount transferred out of escrow, in cents
    pub amount: u64,
}

/// Event details response.
#[derive(Debug, Serialize)]
pub struct EventResponse {
    /// Event id
    pub event_id: u64,
    /// Organizer identity
    pub organizer: Uuid,
    /// Display name
    pub name: String,
    /// Per-ticket price in cents
    pub price: u64,
    /// Capacity
    pub total_tickets: u32,
    /// Remaining unsold capacity
    pub available_tickets: u32,
    /// Off-ledger metadata reference
    pub metadata_cid: String,
    /// When the event was created
    pub created_at: DateTime<Utc>,
    /// Terminal cancellation flag
    pub cancelled: bool,
    /// Terminal completion flag
    pub completed: bool,
    /// Escrow currently held for the event, in cents
    pub escrowed_balance: u64,
}

impl From<&Event> for EventResponse {
    fn from(event: &Event) -> Self {
        Self {
            event_id: event.id.value(),
            organizer: *event.organizer.as_uuid(),
            name: event.name.clone(),
            price: event.price.cents(),
            total_tickets: event.total_tickets,
            available_tickets: event.available_tickets,
            metadata_cid: event.metadata_cid.clone(),
            created_at: event.created_at,
            cancelled: event.cancelled,
            completed: event.completed,
            escrowed_balance: event.escrowed_balance.cents(),
        }
    }
}

/// Creates a new event with the caller as organizer.
///
/// # Errors
///
/// `422` when the event parameters fail validation.
pub async fn create_event(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<CreateEventResponse>), AppError> {
    let mut ledger = state.write().await;
    let event_id = ledger.create_event(
        caller.0,
        request.name,
        Money::from_cents(request.price),
        request.total_tickets,
        request.metadata_cid,
    )?;
    Ok((
        StatusCode::CREATED,
        Json(CreateEventResponse {
            event_id: event_id.value(),
        }),
    ))
}

/// Cancels an event, opening its tickets to refund claims.
///
/// # Errors
///
/// `404` for an unknown event, `403` for a non-organizer caller, `409` once
/// a terminal flag is set.
pub async fn cancel_event(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    let mut ledger = state.write().await;
    ledger.cancel_event(caller.0, EventId::new(id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Marks an event completed, unlocking withdrawal.
///
/// # Errors
///
/// Same failure modes as [`cancel_event`].
pub async fn complete_event(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    let mut ledger = state.write().await;
    ledger.complete_event(caller.0, EventId::new(id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Transfers a completed event's escrow to the organizer.
///
/// # Errors
///
/// `404`/`403` as above, `409` when the event is not completed or the escrow
/// was already drained.
pub async fn withdraw_earnings(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<u64>,
) -> Result<Json<WithdrawResponse>, AppError> {
    let mut ledger = state.write().await;
    let amount = ledger.withdraw_earnings(caller.0, EventId::new(id))?;
    Ok(Json(WithdrawResponse {
        amount: amount.cents(),
    }))
}
