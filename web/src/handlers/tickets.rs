//! Ticket operation endpoints.
//!
//! - POST /api/events/:id/tickets - buy a ticket (exact payment)
//! - POST /api/tickets/:id/transfer - hand a ticket to another holder
//! - POST /api/tickets/:id/cancel - holder cancellation with refund
//! - POST /api/tickets/:id/refund - claim a refund after event cancellation
//! - POST /api/tickets/:id/use - organizer-side redemption

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
use ticketline_ledger::{AccountId, EventId, Money, Ticket, TicketId};
use uuid::Uuid;

/// Request to buy one ticket.
#[derive(Debug, Deserialize)]
pub struct BuyTicketRequest {
    /// Offered payment in cents; must equal the event price exactly
    pub payment: u64,
}

/// Response after a purchase.
#[derive(Debug, Serialize)]
pub struct BuyTicketResponse {
    /// Assigned ticket id
    pub ticket_id: u64,
}

/// Request to transfer a ticket.
#[derive(Debug, Deserialize)]
pub struct TransferTicketRequest {
    /// Identity of the new holder
    pub to: Uuid,
}

/// Response after a refunding operation.
#[derive(Debug, Serialize)]
pub struct RefundResponse {
    /// Exact amount returned to the holder, in cents
    pub refund: u64,
}

/// Ticket details response.
#[derive(Debug, Serialize)]
pub struct TicketResponse {
    /// Ticket id
    pub ticket_id: u64,
    /// The event the ticket was minted against
    pub event_id: u64,
    /// Current holder
    pub owner: Uuid,
    /// When the ticket was minted
    pub purchase_time: DateTime<Utc>,
    /// Terminal redemption flag
    pub is_used: bool,
    /// Terminal refund flag
    pub is_refunded: bool,
}

impl From<&Ticket> for TicketResponse {
    fn from(ticket: &Ticket) -> Self {
        Self {
            ticket_id: ticket.id.value(),
            event_id: ticket.event_id.value(),
            owner: *ticket.owner.as_uuid(),
            purchase_time: ticket.purchase_time,
            is_used: ticket.is_used,
            is_refunded: ticket.is_refunded,
        }
    }
}

/// Mints a ticket against an event for the caller.
///
/// # Errors
///
/// `404` for an unknown event, `409` for a terminal event or sell-out,
/// `402` when the payment does not match the price exactly.
pub async fn buy_ticket(
    State(state): State<AppState>,
    caller: Caller,
    Path(event_id): Path<u64>,
    Json(request): Json<BuyTicketRequest>,
) -> Result<(StatusCode, Json<BuyTicketResponse>), AppError> {
    let mut ledger = state.write().await;
    let ticket_id = ledger.buy_ticket(
        caller.0,
        EventId::new(event_id),
        Money::from_cents(request.payment),
    )?;
    Ok((
        StatusCode::CREATED,
        Json(BuyTicketResponse {
            ticket_id: ticket_id.value(),
        }),
    ))
}

/// Transfers a ticket to another holder.
///
/// # Errors
///
/// `404` for an unknown ticket, `403` for a non-owner caller, `409` for a
/// terminal ticket or a cancelled event.
pub async fn transfer_ticket(
    State(state): State<AppState>,
    caller: Caller,
    Path(ticket_id): Path<u64>,
    Json(request): Json<TransferTicketRequest>,
) -> Result<StatusCode, AppError> {
    let mut ledger = state.write().await;
    ledger.transfer_ticket(
        caller.0,
        TicketId::new(ticket_id),
        AccountId::from_uuid(request.to),
    )?;
    Ok(StatusCode::NO_CONTENT)
}

/// Holder cancellation: flags the ticket refunded and returns its slot to
/// the pool.
///
/// # Errors
///
/// `404`/`403` as above, `409` for a terminal ticket or event.
pub async fn cancel_ticket(
    State(state): State<AppState>,
    caller: Caller,
    Path(ticket_id): Path<u64>,
) -> Result<Json<RefundResponse>, AppError> {
    let mut ledger = state.write().await;
    let refund = ledger.cancel_ticket(caller.0, TicketId::new(ticket_id))?;
    Ok(Json(RefundResponse {
        refund: refund.cents(),
    }))
}

/// Refund claim after the organizer cancelled the event.
///
/// # Errors
///
/// `404`/`403` as above, `409` when the event is not cancelled or the
/// ticket was already settled.
pub async fn refund_ticket(
    State(state): State<AppState>,
    caller: Caller,
    Path(ticket_id): Path<u64>,
) -> Result<Json<RefundResponse>, AppError> {
    let mut ledger = state.write().await;
    let refund = ledger.refund_ticket(caller.0, TicketId::new(ticket_id))?;
    Ok(Json(RefundResponse {
        refund: refund.cents(),
    }))
}

/// Organizer-side redemption at venue entry.
///
/// # Errors
///
/// `404` for an unknown ticket, `403` when the caller is not the event's
/// organizer, `409` for a terminal ticket or event.
pub async fn use_ticket(
    State(state): State<AppState>,
    caller: Caller,
    Path(ticket_id): Path<u64>,
) -> Result<StatusCode, AppError> {
    let mut ledger = state.write().await;
    ledger.use_ticket(caller.0, TicketId::new(ticket_id))?;
    Ok(StatusCode::NO_CONTENT)
}
