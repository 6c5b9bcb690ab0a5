//! Error types for ledger operations.

use crate::types::{EventId, Money, TicketId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Everything a ledger operation can reject with.
///
/// Every precondition violation aborts the whole operation with one of these;
/// nothing is swallowed, and no partial effect is ever observable alongside
/// an error.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerError {
    // ═══════════════════════════════════════════════════════════
    // Missing records
    // ═══════════════════════════════════════════════════════════

    /// Referenced event id does not exist.
    #[error("event {0} not found")]
    EventNotFound(EventId),

    /// Referenced ticket id does not exist.
    #[error("ticket {0} not found")]
    TicketNotFound(TicketId),

    // ═══════════════════════════════════════════════════════════
    // Authorization
    // ═══════════════════════════════════════════════════════════

    /// Caller is not the event's organizer.
    #[error("caller is not the event organizer")]
    NotOrganizer,

    /// Caller is not the ticket's current owner.
    #[error("caller is not the ticket owner")]
    NotTicketOwner,

    // ═══════════════════════════════════════════════════════════
    // Lifecycle state
    // ═══════════════════════════════════════════════════════════

    /// The event has been cancelled.
    #[error("event has been cancelled")]
    EventCancelled,

    /// The event has been completed.
    #[error("event has been completed")]
    EventCompleted,

    /// The operation requires a cancelled event.
    #[error("event has not been cancelled")]
    EventNotCancelled,

    /// The operation requires a completed event.
    #[error("event has not been completed")]
    EventNotCompleted,

    /// The ticket has already been redeemed.
    #[error("ticket has already been used")]
    TicketUsed,

    /// The ticket's value has already been returned to a holder.
    #[error("ticket has already been refunded")]
    TicketRefunded,

    /// A successful withdrawal already drained the event's escrow.
    #[error("no earnings available to withdraw")]
    NothingToWithdraw,

    // ═══════════════════════════════════════════════════════════
    // Capacity
    // ═══════════════════════════════════════════════════════════

    /// No unsold capacity remains on the event.
    #[error("event is sold out")]
    SoldOut,

    /// The receiving account already holds the maximum number of tickets.
    #[error("account holds the maximum number of tickets")]
    TooManyTickets,

    // ═══════════════════════════════════════════════════════════
    // Payment
    // ═══════════════════════════════════════════════════════════

    /// Payment must match the ticket price exactly; both under- and
    /// over-payment are rejected before any state change.
    #[error("payment of {offered} does not match the ticket price {expected}")]
    PaymentMismatch {
        /// The event's fixed ticket price
        expected: Money,
        /// What the caller offered
        offered: Money,
    },

    /// Escrowed balance too low to cover a refund or withdrawal. Should not
    /// occur while the accounting invariants hold; treat as an
    /// internal-consistency fault if it ever does.
    #[error("escrowed balance {held} cannot cover {requested}")]
    InsufficientEscrow {
        /// Balance the ledger holds for the event
        held: Money,
        /// Amount the debit asked for
        requested: Money,
    },

    // ═══════════════════════════════════════════════════════════
    // Input validation
    // ═══════════════════════════════════════════════════════════

    /// Event creation parameters failed validation.
    #[error("invalid event parameters: {reason}")]
    InvalidEvent {
        /// What was wrong with the input
        reason: String,
    },
}

/// Broad failure categories surfaced to the boundary layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Referenced record does not exist
    NotFound,
    /// Caller lacks the required relationship to the record
    Unauthorized,
    /// Record is in a terminal or incompatible state
    InvalidState,
    /// A capacity bound was hit
    CapacityExceeded,
    /// Exact-match payment policy violated
    PaymentMismatch,
    /// Escrow cannot cover the requested debit
    InsufficientFunds,
    /// Malformed creation parameters
    InvalidInput,
}

impl ErrorKind {
    /// Stable machine-readable code for this category
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidState => "INVALID_STATE",
            Self::CapacityExceeded => "CAPACITY_EXCEEDED",
            Self::PaymentMismatch => "PAYMENT_MISMATCH",
            Self::InsufficientFunds => "INSUFFICIENT_FUNDS",
            Self::InvalidInput => "INVALID_INPUT",
        }
    }
}

impl LedgerError {
    /// Returns the broad category this error belongs to.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ticketline_ledger::error::{ErrorKind, LedgerError};
    /// assert_eq!(LedgerError::NotOrganizer.kind(), ErrorKind::Unauthorized);
    /// assert_eq!(LedgerError::SoldOut.kind(), ErrorKind::CapacityExceeded);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EventNotFound(_) | Self::TicketNotFound(_) => ErrorKind::NotFound,
            Self::NotOrganizer | Self::NotTicketOwner => ErrorKind::Unauthorized,
            Self::EventCancelled
            | Self::EventCompleted
            | Self::EventNotCancelled
            | Self::EventNotCompleted
            | Self::TicketUsed
            | Self::TicketRefunded
            | Self::NothingToWithdraw => ErrorKind::InvalidState,
            Self::SoldOut | Self::TooManyTickets => ErrorKind::CapacityExceeded,
            Self::PaymentMismatch { .. } => ErrorKind::PaymentMismatch,
            Self::InsufficientEscrow { .. } => ErrorKind::InsufficientFunds,
            Self::InvalidEvent { .. } => ErrorKind::InvalidInput,
        }
    }
}
