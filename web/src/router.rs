//! Route table for the ledger's HTTP surface.

use crate::handlers::{events, health, queries, tickets};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Builds the full application router around shared state.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        // Event operations
        .route("/api/events", post(events::create_event))
        .route("/api/events/:id", get(queries::get_event))
        .route("/api/events/:id/cancel", post(events::cancel_event))
        .route("/api/events/:id/complete", post(events::complete_event))
        .route("/api/events/:id/withdraw", post(events::withdraw_earnings))
        // Ticket operations
        .route("/api/events/:id/tickets", post(tickets::buy_ticket))
        .route("/api/tickets/:id", get(queries::get_ticket))
        .route("/api/tickets/:id/transfer", post(tickets::transfer_ticket))
        .route("/api/tickets/:id/cancel", post(tickets::cancel_ticket))
        .route("/api/tickets/:id/refund", post(tickets::refund_ticket))
        .route("/api/tickets/:id/use", post(tickets::use_ticket))
        // Queries
        .route("/api/my/tickets", get(queries::my_tickets))
        .route("/api/stats", get(queries::stats))
        .route("/api/journal", get(queries::journal))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
