//! The ledger store object and its state-transition operations.
//!
//! One `Ledger` instance owns the whole record store. Every operation takes
//! `&mut self`, runs to completion with exclusive access, and either fully
//! commits or returns an error having changed nothing: all preconditions are
//! checked against immutable borrows before the first mutation, and the
//! mutation sequence after that point is infallible.

use crate::clock::{Clock, SystemClock};
use crate::constants::{
    MAX_EVENT_NAME_LENGTH, MAX_METADATA_CID_LENGTH, MAX_TICKETS_PER_ACCOUNT,
    MAX_TICKETS_PER_EVENT,
};
use crate::error::{LedgerError, Result};
use crate::journal::LedgerEvent;
use crate::state::LedgerState;
use crate::types::{AccountId, Event, EventId, Money, Ticket, TicketId};
use std::fmt;
use std::sync::Arc;

/// The ticket-issuance ledger.
///
/// Created once at initialization and living for the process lifetime.
/// Callers that share an instance across tasks wrap it in a lock and hold
/// the write guard for a whole operation; `&mut self` makes any finer
/// interleaving unrepresentable.
pub struct Ledger {
    state: LedgerState,
    clock: Arc<dyn Clock>,
    journal: Vec<LedgerEvent>,
}

impl Ledger {
    /// Creates an empty ledger on the system clock
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty ledger with an injected time source
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: LedgerState::new(),
            clock,
            journal: Vec::new(),
        }
    }

    // ========================================================================
    // Event operations
    // ========================================================================

    /// Creates a new event and returns its id.
    ///
    /// The caller becomes the organizer. `price` may be zero; free events
    /// are allowed.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidEvent`] when the name, metadata CID, or
    /// capacity falls outside the bounds in [`crate::constants`].
    pub fn create_event(
        &mut self,
        caller: AccountId,
        name: String,
        price: Money,
        total_tickets: u32,
        metadata_cid: String,
    ) -> Result<EventId> {
        Self::validate_new_event(&name, total_tickets, &metadata_cid)?;

        let now = self.clock.now();
        let event_id = self.state.next_event_id();
        self.state.insert_event(Event {
            id: event_id,
            organizer: caller,
            name: name.clone(),
            price,
            total_tickets,
            available_tickets: total_tickets,
            metadata_cid,
            created_at: now,
            active: true,
            cancelled: false,
            completed: false,
            escrowed_balance: Money::ZERO,
        });
        self.journal.push(LedgerEvent::EventCreated {
            event_id,
            organizer: caller,
            name,
            price,
            total_tickets,
            at: now,
        });

        tracing::info!(
            event_id = %event_id,
            organizer = %caller,
            price = %price,
            total_tickets,
            "event created"
        );
        Ok(event_id)
    }

    /// Cancels an event, opening its tickets to per-holder refund claims.
    ///
    /// Does not move funds itself: refunds are pulled ticket by ticket via
    /// [`Ledger::refund_ticket`], keeping cancellation O(1) no matter how
    /// many tickets were sold.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::EventNotFound`], [`LedgerError::NotOrganizer`],
    /// or [`LedgerError::EventCancelled`] / [`LedgerError::EventCompleted`]
    /// when a terminal flag is already set.
    pub fn cancel_event(&mut self, caller: AccountId, event_id: EventId) -> Result<()> {
        let event = self.event(event_id)?;
        if event.organizer != caller {
            return Err(LedgerError::NotOrganizer);
        }
        if event.cancelled {
            return Err(LedgerError::EventCancelled);
        }
        if event.completed {
            return Err(LedgerError::EventCompleted);
        }

        let now = self.clock.now();
        let Some(event) = self.state.event_mut(event_id) else {
            return Err(LedgerError::EventNotFound(event_id));
        };
        event.cancelled = true;
        self.journal.push(LedgerEvent::EventCancelled {
            event_id,
            organizer: caller,
            at: now,
        });

        tracing::info!(event_id = %event_id, "event cancelled");
        Ok(())
    }

    /// Marks an event completed, unlocking earnings withdrawal.
    ///
    /// # Errors
    ///
    /// Same authorization and terminal-state failures as
    /// [`Ledger::cancel_event`].
    pub fn complete_event(&mut self, caller: AccountId, event_id: EventId) -> Result<()> {
        let event = self.event(event_id)?;
        if event.organizer != caller {
            return Err(LedgerError::NotOrganizer);
        }
        if event.cancelled {
            return Err(LedgerError::EventCancelled);
        }
        if event.completed {
            return Err(LedgerError::EventCompleted);
        }

        let now = self.clock.now();
        let Some(event) = self.state.event_mut(event_id) else {
            return Err(LedgerError::EventNotFound(event_id));
        };
        event.completed = true;
        self.journal.push(LedgerEvent::EventCompleted {
            event_id,
            organizer: caller,
            at: now,
        });

        tracing::info!(event_id = %event_id, "event completed");
        Ok(())
    }

    /// Drains a completed event's escrow to the organizer, returning the
    /// exact amount transferred.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::EventNotFound`], [`LedgerError::NotOrganizer`],
    /// [`LedgerError::EventNotCompleted`], or
    /// [`LedgerError::NothingToWithdraw`] once a prior withdrawal drained
    /// the escrow.
    pub fn withdraw_earnings(&mut self, caller: AccountId, event_id: EventId) -> Result<Money> {
        let event = self.event(event_id)?;
        if event.organizer != caller {
            return Err(LedgerError::NotOrganizer);
        }
        if !event.completed {
            return Err(LedgerError::EventNotCompleted);
        }
        if event.escrowed_balance.is_zero() {
            return Err(LedgerError::NothingToWithdraw);
        }
        let amount = event.escrowed_balance;

        let now = self.clock.now();
        let Some(event) = self.state.event_mut(event_id) else {
            return Err(LedgerError::EventNotFound(event_id));
        };
        event.escrowed_balance = Money::ZERO;
        self.journal.push(LedgerEvent::EarningsWithdrawn {
            event_id,
            organizer: caller,
            amount,
            at: now,
        });

        tracing::info!(event_id = %event_id, amount = %amount, "earnings withdrawn");
        Ok(amount)
    }

    // ========================================================================
    // Ticket operations
    // ========================================================================

    /// Mints a ticket against an event for the caller.
    ///
    /// Payment must match the event's price exactly; both under- and
    /// over-payment are rejected before any state change, so the excess is
    /// never accepted into the ledger.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::EventNotFound`], [`LedgerError::EventCancelled`],
    /// [`LedgerError::EventCompleted`], [`LedgerError::SoldOut`],
    /// [`LedgerError::PaymentMismatch`], or [`LedgerError::TooManyTickets`]
    /// when the buyer is at the holding cap.
    pub fn buy_ticket(
        &mut self,
        caller: AccountId,
        event_id: EventId,
        payment: Money,
    ) -> Result<TicketId> {
        let event = self.event(event_id)?;
        if event.cancelled {
            return Err(LedgerError::EventCancelled);
        }
        if event.completed {
            return Err(LedgerError::EventCompleted);
        }
        if event.available_tickets == 0 {
            return Err(LedgerError::SoldOut);
        }
        if payment != event.price {
            return Err(LedgerError::PaymentMismatch {
                expected: event.price,
                offered: payment,
            });
        }
        let price = event.price;
        if self.state.holdings(caller) >= MAX_TICKETS_PER_ACCOUNT {
            return Err(LedgerError::TooManyTickets);
        }

        let now = self.clock.now();
        let Some(event) = self.state.event_mut(event_id) else {
            return Err(LedgerError::EventNotFound(event_id));
        };
        event.available_tickets -= 1;
        event.escrowed_balance = event.escrowed_balance.saturating_add(price);

        let ticket_id = self.state.next_ticket_id();
        self.state.insert_ticket(Ticket {
            id: ticket_id,
            event_id,
            owner: caller,
            purchase_time: now,
            is_used: false,
            is_refunded: false,
        });
        self.journal.push(LedgerEvent::TicketPurchased {
            ticket_id,
            event_id,
            buyer: caller,
            price,
            at: now,
        });

        tracing::info!(
            ticket_id = %ticket_id,
            event_id = %event_id,
            buyer = %caller,
            price = %price,
            "ticket purchased"
        );
        Ok(ticket_id)
    }

    /// Transfers a ticket to another holder.
    ///
    /// A self-transfer (`new_owner == caller`) is accepted as a no-op and
    /// appends no journal record.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TicketNotFound`],
    /// [`LedgerError::NotTicketOwner`], [`LedgerError::TicketUsed`],
    /// [`LedgerError::TicketRefunded`], [`LedgerError::EventCancelled`]
    /// (once the event is cancelled the ticket's only remaining right is a
    /// refund claim), or [`LedgerError::TooManyTickets`] when the recipient
    /// is at the holding cap.
    pub fn transfer_ticket(
        &mut self,
        caller: AccountId,
        ticket_id: TicketId,
        new_owner: AccountId,
    ) -> Result<()> {
        let ticket = self.ticket(ticket_id)?;
        if ticket.owner != caller {
            return Err(LedgerError::NotTicketOwner);
        }
        if ticket.is_used {
            return Err(LedgerError::TicketUsed);
        }
        if ticket.is_refunded {
            return Err(LedgerError::TicketRefunded);
        }
        let event_id = ticket.event_id;
        let event = self.event(event_id)?;
        if event.cancelled {
            return Err(LedgerError::EventCancelled);
        }
        if new_owner == caller {
            return Ok(());
        }
        if self.state.holdings(new_owner) >= MAX_TICKETS_PER_ACCOUNT {
            return Err(LedgerError::TooManyTickets);
        }

        let now = self.clock.now();
        let Some(ticket) = self.state.ticket_mut(ticket_id) else {
            return Err(LedgerError::TicketNotFound(ticket_id));
        };
        ticket.owner = new_owner;
        self.state.reindex_ticket(ticket_id, caller, new_owner);
        self.journal.push(LedgerEvent::TicketTransferred {
            ticket_id,
            from: caller,
            to: new_owner,
            at: now,
        });

        tracing::info!(ticket_id = %ticket_id, from = %caller, to = %new_owner, "ticket transferred");
        Ok(())
    }

    /// Holder-initiated cancellation while the event is still live.
    ///
    /// The capacity slot returns to the pool so another purchase can take it,
    /// and the ticket price comes back out of escrow to the holder. Returns
    /// the refunded amount.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TicketNotFound`],
    /// [`LedgerError::NotTicketOwner`], [`LedgerError::TicketUsed`],
    /// [`LedgerError::TicketRefunded`], [`LedgerError::EventCancelled`]
    /// (claim via [`Ledger::refund_ticket`] instead),
    /// [`LedgerError::EventCompleted`], or
    /// [`LedgerError::InsufficientEscrow`] on an internal accounting fault.
    pub fn cancel_ticket(&mut self, caller: AccountId, ticket_id: TicketId) -> Result<Money> {
        let ticket = self.ticket(ticket_id)?;
        if ticket.owner != caller {
            return Err(LedgerError::NotTicketOwner);
        }
        if ticket.is_used {
            return Err(LedgerError::TicketUsed);
        }
        if ticket.is_refunded {
            return Err(LedgerError::TicketRefunded);
        }
        let event_id = ticket.event_id;
        let event = self.event(event_id)?;
        if event.cancelled {
            return Err(LedgerError::EventCancelled);
        }
        if event.completed {
            return Err(LedgerError::EventCompleted);
        }
        let refund = event.price;
        let remaining = event
            .escrowed_balance
            .checked_sub(refund)
            .ok_or(LedgerError::InsufficientEscrow {
                held: event.escrowed_balance,
                requested: refund,
            })?;

        let now = self.clock.now();
        let Some(ticket) = self.state.ticket_mut(ticket_id) else {
            return Err(LedgerError::TicketNotFound(ticket_id));
        };
        ticket.is_refunded = true;
        let Some(event) = self.state.event_mut(event_id) else {
            return Err(LedgerError::EventNotFound(event_id));
        };
        event.available_tickets += 1;
        event.escrowed_balance = remaining;
        self.journal.push(LedgerEvent::TicketCancelled {
            ticket_id,
            event_id,
            owner: caller,
            refund,
            at: now,
        });

        tracing::info!(ticket_id = %ticket_id, event_id = %event_id, refund = %refund, "ticket cancelled");
        Ok(refund)
    }

    /// Claims the refund for a ticket of a cancelled event.
    ///
    /// Unlike [`Ledger::cancel_ticket`] this never touches
    /// `available_tickets`: a cancelled event is closed to new sales, so
    /// capacity accounting is moot. Returns the refunded amount.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TicketNotFound`],
    /// [`LedgerError::NotTicketOwner`], [`LedgerError::TicketRefunded`]
    /// (already claimed), [`LedgerError::TicketUsed`],
    /// [`LedgerError::EventNotCancelled`], or
    /// [`LedgerError::InsufficientEscrow`] on an internal accounting fault.
    pub fn refund_ticket(&mut self, caller: AccountId, ticket_id: TicketId) -> Result<Money> {
        let ticket = self.ticket(ticket_id)?;
        if ticket.owner != caller {
            return Err(LedgerError::NotTicketOwner);
        }
        if ticket.is_refunded {
            return Err(LedgerError::TicketRefunded);
        }
        if ticket.is_used {
            return Err(LedgerError::TicketUsed);
        }
        let event_id = ticket.event_id;
        let event = self.event(event_id)?;
        if !event.cancelled {
            return Err(LedgerError::EventNotCancelled);
        }
        let refund = event.price;
        let remaining = event
            .escrowed_balance
            .checked_sub(refund)
            .ok_or(LedgerError::InsufficientEscrow {
                held: event.escrowed_balance,
                requested: refund,
            })?;

        let now = self.clock.now();
        let Some(ticket) = self.state.ticket_mut(ticket_id) else {
            return Err(LedgerError::TicketNotFound(ticket_id));
        };
        ticket.is_refunded = true;
        let Some(event) = self.state.event_mut(event_id) else {
            return Err(LedgerError::EventNotFound(event_id));
        };
        event.escrowed_balance = remaining;
        self.journal.push(LedgerEvent::TicketRefunded {
            ticket_id,
            event_id,
            owner: caller,
            refund,
            at: now,
        });

        tracing::info!(ticket_id = %ticket_id, event_id = %event_id, refund = %refund, "ticket refunded");
        Ok(refund)
    }

    /// Organizer-side redemption, e.g. at venue entry. One-way gate with no
    /// reversal operation.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TicketNotFound`], [`LedgerError::EventNotFound`],
    /// [`LedgerError::NotOrganizer`] (the caller must be the event's
    /// organizer, not the ticket owner), [`LedgerError::TicketUsed`],
    /// [`LedgerError::TicketRefunded`], [`LedgerError::EventCancelled`], or
    /// [`LedgerError::EventCompleted`].
    pub fn use_ticket(&mut self, caller: AccountId, ticket_id: TicketId) -> Result<()> {
        let ticket = self.ticket(ticket_id)?;
        let event_id = ticket.event_id;
        let is_used = ticket.is_used;
        let is_refunded = ticket.is_refunded;
        let event = self.event(event_id)?;
        if event.organizer != caller {
            return Err(LedgerError::NotOrganizer);
        }
        if is_used {
            return Err(LedgerError::TicketUsed);
        }
        if is_refunded {
            return Err(LedgerError::TicketRefunded);
        }
        if event.cancelled {
            return Err(LedgerError::EventCancelled);
        }
        if event.completed {
            return Err(LedgerError::EventCompleted);
        }

        let now = self.clock.now();
        let Some(ticket) = self.state.ticket_mut(ticket_id) else {
            return Err(LedgerError::TicketNotFound(ticket_id));
        };
        ticket.is_used = true;
        self.journal.push(LedgerEvent::TicketUsed {
            ticket_id,
            event_id,
            at: now,
        });

        tracing::info!(ticket_id = %ticket_id, event_id = %event_id, "ticket used");
        Ok(())
    }

    // ========================================================================
    // Queries (read-only)
    // ========================================================================

    /// Total number of events ever created
    #[must_use]
    pub const fn event_count(&self) -> u64 {
        self.state.event_count()
    }

    /// Total number of tickets ever minted
    #[must_use]
    pub const fn ticket_count(&self) -> u64 {
        self.state.ticket_count()
    }

    /// Looks up an event record.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::EventNotFound`] for an unknown id.
    pub fn event(&self, id: EventId) -> Result<&Event> {
        self.state.event(id).ok_or(LedgerError::EventNotFound(id))
    }

    /// Looks up a ticket record.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TicketNotFound`] for an unknown id.
    pub fn ticket(&self, id: TicketId) -> Result<&Ticket> {
        self.state.ticket(id).ok_or(LedgerError::TicketNotFound(id))
    }

    /// Ticket ids held by `owner`, ascending, served from the owner index
    #[must_use]
    pub fn tickets_owned_by(&self, owner: AccountId) -> Vec<TicketId> {
        self.state.tickets_owned_by(owner)
    }

    /// Read access to the backing record store
    #[must_use]
    pub const fn state(&self) -> &LedgerState {
        &self.state
    }

    /// The full notification journal, oldest first
    #[must_use]
    pub fn journal(&self) -> &[LedgerEvent] {
        &self.journal
    }

    /// Journal records starting at `offset`, for incremental readers
    #[must_use]
    pub fn journal_since(&self, offset: usize) -> &[LedgerEvent] {
        self.journal.get(offset..).unwrap_or(&[])
    }

    // ========================================================================
    // Validation helpers
    // ========================================================================

    fn validate_new_event(name: &str, total_tickets: u32, metadata_cid: &str) -> Result<()> {
        if name.is_empty() || name.len() > MAX_EVENT_NAME_LENGTH {
            return Err(LedgerError::InvalidEvent {
                reason: format!("name must be 1..={MAX_EVENT_NAME_LENGTH} bytes"),
            });
        }
        if metadata_cid.is_empty() || metadata_cid.len() > MAX_METADATA_CID_LENGTH {
            return Err(LedgerError::InvalidEvent {
                reason: format!("metadata CID must be 1..={MAX_METADATA_CID_LENGTH} bytes"),
            });
        }
        if total_tickets == 0 || total_tickets > MAX_TICKETS_PER_EVENT {
            return Err(LedgerError::InvalidEvent {
                reason: format!("total tickets must be 1..={MAX_TICKETS_PER_EVENT}"),
            });
        }
        Ok(())
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("events", &self.state.event_count())
            .field("tickets", &self.state.ticket_count())
            .field("journal_len", &self.journal.len())
            .finish()
    }
}
