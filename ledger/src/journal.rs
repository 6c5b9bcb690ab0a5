//! Notification records appended to the ledger journal.
//!
//! Every committed mutation appends exactly one record describing what
//! changed (kind, affected ids, relevant amounts), so external observers
//! such as indexers can reconstruct history without re-querying full state.
//! The journal is append-only and never truncated.

use crate::types::{AccountId, EventId, Money, TicketId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A record of one committed state transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// A new event was created.
    EventCreated {
        /// Assigned event identifier
        event_id: EventId,
        /// Identity of the creator
        organizer: AccountId,
        /// Display name
        name: String,
        /// Fixed per-ticket price
        price: Money,
        /// Capacity fixed at creation
        total_tickets: u32,
        /// When the mutation committed
        at: DateTime<Utc>,
    },

    /// The organizer cancelled an event; refunds are now claimable per ticket.
    EventCancelled {
        /// Cancelled event
        event_id: EventId,
        /// The organizer who cancelled it
        organizer: AccountId,
        /// When the mutation committed
        at: DateTime<Utc>,
    },

    /// The organizer marked an event completed, unlocking withdrawal.
    EventCompleted {
        /// Completed event
        event_id: EventId,
        /// The organizer who completed it
        organizer: AccountId,
        /// When the mutation committed
        at: DateTime<Utc>,
    },

    /// The organizer drained a completed event's escrow.
    EarningsWithdrawn {
        /// Source event
        event_id: EventId,
        /// Receiving organizer
        organizer: AccountId,
        /// Exact amount transferred out of escrow
        amount: Money,
        /// When the mutation committed
        at: DateTime<Utc>,
    },

    /// A ticket was minted against an event.
    TicketPurchased {
        /// Assigned ticket identifier
        ticket_id: TicketId,
        /// The event the ticket was minted against
        event_id: EventId,
        /// Initial owner
        buyer: AccountId,
        /// Exact payment accepted into escrow
        price: Money,
        /// When the mutation committed
        at: DateTime<Utc>,
    },

    /// A ticket changed hands.
    TicketTransferred {
        /// Transferred ticket
        ticket_id: TicketId,
        /// Previous owner
        from: AccountId,
        /// New owner
        to: AccountId,
        /// When the mutation committed
        at: DateTime<Utc>,
    },

    /// A holder cancelled a ticket; its capacity slot returned to the pool.
    TicketCancelled {
        /// Cancelled ticket
        ticket_id: TicketId,
        /// The ticket's event
        event_id: EventId,
        /// Holder the refund went to
        owner: AccountId,
        /// Exact amount debited from escrow
        refund: Money,
        /// When the mutation committed
        at: DateTime<Utc>,
    },

    /// A holder claimed the refund for a ticket of a cancelled event.
    TicketRefunded {
        /// Refunded ticket
        ticket_id: TicketId,
        /// The ticket's event
        event_id: EventId,
        /// Holder the refund went to
        owner: AccountId,
        /// Exact amount debited from escrow
        refund: Money,
        /// When the mutation committed
        at: DateTime<Utc>,
    },

    /// The organizer redeemed a ticket at the venue.
    TicketUsed {
        /// Redeemed ticket
        ticket_id: TicketId,
        /// The ticket's event
        event_id: EventId,
        /// When the mutation committed
        at: DateTime<Utc>,
    },
}

impl LedgerEvent {
    /// Short name of the record kind, for logs and feeds
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::EventCreated { .. } => "event_created",
            Self::EventCancelled { .. } => "event_cancelled",
            Self::EventCompleted { .. } => "event_completed",
            Self::EarningsWithdrawn { .. } => "earnings_withdrawn",
            Self::TicketPurchased { .. } => "ticket_purchased",
            Self::TicketTransferred { .. } => "ticket_transferred",
            Self::TicketCancelled { .. } => "ticket_cancelled",
            Self::TicketRefunded { .. } => "ticket_refunded",
            Self::TicketUsed { .. } => "ticket_used",
        }
    }
}
