//! Domain types for the ticket-issuance ledger.
//!
//! Value objects (identifiers, money) and the two record types the ledger
//! stores. Records are never deleted; lifecycle is tracked with terminal
//! flags on the records themselves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

/// Identity of an externally authenticated caller.
///
/// The ledger never authenticates anyone itself; the boundary layer hands in
/// an already-verified identity with every call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Creates a new random `AccountId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an `AccountId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an event, assigned sequentially starting at 0.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EventId(u64);

impl EventId {
    /// Creates an `EventId` from its raw sequence number
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw sequence number
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a ticket, assigned sequentially starting at 0.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TicketId(u64);

impl TicketId {
    /// Creates a `TicketId` from its raw sequence number
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw sequence number
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Money
// ============================================================================

/// Money amount in integer minor units (avoids floating point issues)
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Money(u64);

impl Money {
    /// The zero amount
    pub const ZERO: Self = Self(0);

    /// Creates a new `Money` amount from cents
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Returns the amount in cents
    #[must_use]
    pub const fn cents(&self) -> u64 {
        self.0
    }

    /// Checks if this amount is zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts, clamping at the numeric ceiling
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Subtracts `other`, or returns `None` when the balance cannot cover it
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(rest) => Some(Self(rest)),
            None => None,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

// ============================================================================
// Records
// ============================================================================

/// An organizer's ticketed offering with fixed price and capacity.
///
/// Core fields are immutable after creation; lifecycle moves through the
/// terminal `cancelled` / `completed` flags, which are mutually exclusive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event identifier
    pub id: EventId,
    /// Identity of the creator
    pub organizer: AccountId,
    /// Display name
    pub name: String,
    /// Exact payment required per ticket (zero allowed: free events)
    pub price: Money,
    /// Capacity fixed at creation
    pub total_tickets: u32,
    /// Remaining unsold capacity
    pub available_tickets: u32,
    /// Opaque reference to off-ledger descriptive content
    pub metadata_cid: String,
    /// When the event was created
    pub created_at: DateTime<Utc>,
    /// Reserved flag; true from creation and never consulted by any gate
    pub active: bool,
    /// Terminal: the organizer cancelled the event
    pub cancelled: bool,
    /// Terminal: the organizer marked the event completed
    pub completed: bool,
    /// Payments collected for this event's tickets, minus refunds and withdrawals
    pub escrowed_balance: Money,
}

impl Event {
    /// Checks whether either terminal flag is set
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.cancelled || self.completed
    }

    /// Number of capacity slots currently taken by sold tickets
    #[must_use]
    pub const fn tickets_sold(&self) -> u32 {
        self.total_tickets - self.available_tickets
    }
}

/// A unique, ownable claim against one event, minted on purchase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Ticket identifier
    pub id: TicketId,
    /// The event this ticket was minted against
    pub event_id: EventId,
    /// Current holder; changes only via transfer
    pub owner: AccountId,
    /// When the ticket was minted
    pub purchase_time: DateTime<Utc>,
    /// Terminal: redeemed by the organizer at the venue
    pub is_used: bool,
    /// Terminal: the ticket's value was returned to its holder
    pub is_refunded: bool,
}

impl Ticket {
    /// Checks whether either terminal flag is set
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.is_used || self.is_refunded
    }
}
