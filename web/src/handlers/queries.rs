//! Read-only query endpoints.
//!
//! - GET /api/events/:id - event details
//! - GET /api/tickets/:id - ticket details
//! - GET /api/my/tickets - ids held by the caller, from the owner index
//! - GET /api/stats - record counters
//! - GET /api/journal?since= - incremental notification feed

use crate::error::AppError;
use crate::extractors::Caller;
use crate::handlers::events::EventResponse;
use crate::handlers::tickets::TicketResponse;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use ticketline_ledger::{EventId, LedgerEvent, TicketId};

/// Record counters.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Events ever created
    pub event_count: u64,
    /// Tickets ever minted
    pub ticket_count: u64,
}

/// Ticket ids held by one account.
#[derive(Debug, Serialize)]
pub struct MyTicketsResponse {
    /// Held ticket ids, ascending
    pub ticket_ids: Vec<u64>,
}

/// Paging parameter for the journal feed.
#[derive(Debug, Deserialize)]
pub struct JournalQuery {
    /// Offset of the first record to return
    #[serde(default)]
    pub since: usize,
}

/// Returns one event record.
///
/// # Errors
///
/// `404` for an unknown id.
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<EventResponse>, AppError> {
    let ledger = state.read().await;
    let event = ledger.event(EventId::new(id))?;
    Ok(Json(EventResponse::from(event)))
}

/// Returns one ticket record.
///
/// # Errors
///
/// `404` for an unknown id.
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<TicketResponse>, AppError> {
    let ledger = state.read().await;
    let ticket = ledger.ticket(TicketId::new(id))?;
    Ok(Json(TicketResponse::from(ticket)))
}

/// Returns the ticket ids the caller currently holds, served from the
/// owner index rather than a table scan.
pub async fn my_tickets(
    State(state): State<AppState>,
    caller: Caller,
) -> Json<MyTicketsResponse> {
    let ledger = state.read().await;
    let ticket_ids = ledger
        .tickets_owned_by(caller.0)
        .into_iter()
        .map(TicketId::value)
        .collect();
    Json(MyTicketsResponse { ticket_ids })
}

/// Returns the record counters.
pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let ledger = state.read().await;
    Json(StatsResponse {
        event_count: ledger.event_count(),
        ticket_count: ledger.ticket_count(),
    })
}

/// Returns journal records starting at `since`, oldest first.
pub async fn journal(
    State(state): State<AppState>,
    Query(query): Query<JournalQuery>,
) -> Json<Vec<LedgerEvent>> {
    let ledger = state.read().await;
    Json(ledger.journal_since(query.since).to_vec())
}
