//! The ledger's record tables and derived owner index.
//!
//! Two append-friendly tables keyed by sequential integer id, plus the
//! owner → ticket-ids lookup used for per-account enumeration. No operation
//! ever deletes a record; "deletion" is always modeled as a flag on the
//! record itself.

use crate::types::{AccountId, Event, EventId, Ticket, TicketId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Backing storage for the ledger.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerState {
    /// Event records keyed by id
    events: BTreeMap<EventId, Event>,
    /// Ticket records keyed by id
    tickets: BTreeMap<TicketId, Ticket>,
    /// Derived index: owner to the ids of the tickets they hold
    owner_tickets: HashMap<AccountId, BTreeSet<TicketId>>,
    /// Next event id to assign
    event_counter: u64,
    /// Next ticket id to assign
    ticket_counter: u64,
}

impl LedgerState {
    /// Creates empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of events ever created
    #[must_use]
    pub const fn event_count(&self) -> u64 {
        self.event_counter
    }

    /// Total number of tickets ever minted
    #[must_use]
    pub const fn ticket_count(&self) -> u64 {
        self.ticket_counter
    }

    /// Returns an event record by id
    #[must_use]
    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.get(&id)
    }

    /// Returns a ticket record by id
    #[must_use]
    pub fn ticket(&self, id: TicketId) -> Option<&Ticket> {
        self.tickets.get(&id)
    }

    /// Iterates all event records in id order
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.values()
    }

    /// Iterates all ticket records in id order
    pub fn tickets(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.values()
    }

    /// Ticket ids held by `owner`, in ascending id order.
    ///
    /// Served from the owner index, not by scanning the ticket table.
    #[must_use]
    pub fn tickets_owned_by(&self, owner: AccountId) -> Vec<TicketId> {
        self.owner_tickets
            .get(&owner)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Number of tickets `owner` currently holds
    #[must_use]
    pub fn holdings(&self, owner: AccountId) -> usize {
        self.owner_tickets.get(&owner).map_or(0, BTreeSet::len)
    }

    /// Iterates the owner index entries
    pub fn owner_index(&self) -> impl Iterator<Item = (&AccountId, &BTreeSet<TicketId>)> {
        self.owner_tickets.iter()
    }

    pub(crate) fn event_mut(&mut self, id: EventId) -> Option<&mut Event> {
        self.events.get_mut(&id)
    }

    pub(crate) fn ticket_mut(&mut self, id: TicketId) -> Option<&mut Ticket> {
        self.tickets.get_mut(&id)
    }

    /// Allocates the next sequential event id.
    pub(crate) fn next_event_id(&mut self) -> EventId {
        let id = EventId::new(self.event_counter);
        self.event_counter += 1;
        id
    }

    /// Allocates the next sequential ticket id.
    pub(crate) fn next_ticket_id(&mut self) -> TicketId {
        let id = TicketId::new(self.ticket_counter);
        self.ticket_counter += 1;
        id
    }

    pub(crate) fn insert_event(&mut self, event: Event) {
        self.events.insert(event.id, event);
    }

    /// Stores a freshly minted ticket and indexes it under its owner.
    pub(crate) fn insert_ticket(&mut self, ticket: Ticket) {
        self.owner_tickets
            .entry(ticket.owner)
            .or_default()
            .insert(ticket.id);
        self.tickets.insert(ticket.id, ticket);
    }

    /// Moves a ticket id between owner index entries on transfer.
    pub(crate) fn reindex_ticket(&mut self, id: TicketId, from: AccountId, to: AccountId) {
        if let Some(ids) = self.owner_tickets.get_mut(&from) {
            ids.remove(&id);
        }
        self.owner_tickets.entry(to).or_default().insert(id);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Money;
    use chrono::Utc;

    fn ticket(id: u64, owner: AccountId) -> Ticket {
        Ticket {
            id: TicketId::new(id),
            event_id: EventId::new(0),
            owner,
            purchase_time: Utc::now(),
            is_used: false,
            is_refunded: false,
        }
    }

    #[test]
    fn ids_are_sequential_from_zero() {
        let mut state = LedgerState::new();
        assert_eq!(state.next_event_id(), EventId::new(0));
        assert_eq!(state.next_event_id(), EventId::new(1));
        assert_eq!(state.next_ticket_id(), TicketId::new(0));
        assert_eq!(state.event_count(), 2);
        assert_eq!(state.ticket_count(), 1);
    }

    #[test]
    fn insert_ticket_updates_owner_index() {
        let mut state = LedgerState::new();
        let owner = AccountId::new();

        state.insert_ticket(ticket(0, owner));
        state.insert_ticket(ticket(1, owner));

        assert_eq!(
            state.tickets_owned_by(owner),
            vec![TicketId::new(0), TicketId::new(1)]
        );
        assert_eq!(state.holdings(owner), 2);
    }

    #[test]
    fn reindex_moves_between_owners() {
        let mut state = LedgerState::new();
        let alice = AccountId::new();
        let bob = AccountId::new();

        state.insert_ticket(ticket(0, alice));
        state.reindex_ticket(TicketId::new(0), alice, bob);

        assert!(state.tickets_owned_by(alice).is_empty());
        assert_eq!(state.tickets_owned_by(bob), vec![TicketId::new(0)]);
    }

    #[test]
    fn unknown_owner_has_no_holdings() {
        let state = LedgerState::new();
        assert!(state.tickets_owned_by(AccountId::new()).is_empty());
        assert_eq!(state.holdings(AccountId::new()), 0);
    }

    #[test]
    fn event_lookup_by_id() {
        let mut state = LedgerState::new();
        let id = state.next_event_id();
        state.insert_event(Event {
            id,
            organizer: AccountId::new(),
            name: "Meetup".to_string(),
            price: Money::ZERO,
            total_tickets: 5,
            available_tickets: 5,
            metadata_cid: "QmMeetup".to_string(),
            created_at: Utc::now(),
            active: true,
            cancelled: false,
            completed: false,
            escrowed_balance: Money::ZERO,
        });

        assert!(state.event(id).is_some());
        assert!(state.event(EventId::new(99)).is_none());
    }
}
