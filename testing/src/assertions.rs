//! Whole-ledger invariant assertions.
//!
//! The executable form of the accounting rules every committed operation
//! must preserve. Integration and property tests call
//! [`assert_invariants`] after each step; any violation is a bug in the
//! operation that committed last.

use std::collections::HashMap;
use ticketline_ledger::{EventId, Ledger, LedgerEvent};

/// Per-event tallies reconstructed from the notification journal.
#[derive(Debug, Default, Clone, Copy)]
struct Flow {
    /// Capacity slots returned by holder-initiated cancellations
    slots_returned: u32,
    /// Cents accepted into escrow by purchases
    inflow: u128,
    /// Cents paid out by refunds and withdrawals
    outflow: u128,
}

/// Checks every ledger invariant against the current state and journal.
///
/// - `0 <= available_tickets <= total_tickets` for every event.
/// - `total - available` equals tickets minted minus capacity slots returned
///   by holder cancellations.
/// - No event is both cancelled and completed.
/// - No ticket is both used and refunded.
/// - Every event's escrow equals purchases minus refunds minus withdrawals.
/// - The owner index and the ticket table agree exactly.
///
/// # Panics
///
/// Panics with a description of the violated invariant.
#[allow(clippy::panic)]
pub fn assert_invariants(ledger: &Ledger) {
    let state = ledger.state();

    let mut minted: HashMap<EventId, u32> = HashMap::new();
    for ticket in state.tickets() {
        *minted.entry(ticket.event_id).or_default() += 1;
        assert!(
            !(ticket.is_used && ticket.is_refunded),
            "ticket {} is both used and refunded",
            ticket.id
        );
        assert!(
            state.tickets_owned_by(ticket.owner).contains(&ticket.id),
            "ticket {} missing from owner index of {}",
            ticket.id,
            ticket.owner
        );
    }

    let mut flows: HashMap<EventId, Flow> = HashMap::new();
    for record in ledger.journal() {
        match record {
            LedgerEvent::TicketPurchased {
                event_id, price, ..
            } => {
                flows.entry(*event_id).or_default().inflow += u128::from(price.cents());
            }
            LedgerEvent::TicketCancelled {
                event_id, refund, ..
            } => {
                let flow = flows.entry(*event_id).or_default();
                flow.slots_returned += 1;
                flow.outflow += u128::from(refund.cents());
            }
            LedgerEvent::TicketRefunded {
                event_id, refund, ..
            } => {
                flows.entry(*event_id).or_default().outflow += u128::from(refund.cents());
            }
            LedgerEvent::EarningsWithdrawn {
                event_id, amount, ..
            } => {
                flows.entry(*event_id).or_default().outflow += u128::from(amount.cents());
            }
            _ => {}
        }
    }

    for event in state.events() {
        assert!(
            event.available_tickets <= event.total_tickets,
            "event {} has {} available of {} total",
            event.id,
            event.available_tickets,
            event.total_tickets
        );
        assert!(
            !(event.cancelled && event.completed),
            "event {} is both cancelled and completed",
            event.id
        );

        let minted_here = minted.get(&event.id).copied().unwrap_or(0);
        let flow = flows.get(&event.id).copied().unwrap_or_default();
        assert!(
            minted_here >= flow.slots_returned,
            "event {} returned more slots than it minted tickets",
            event.id
        );
        assert!(
            flow.inflow >= flow.outflow,
            "event {} paid out more than it collected",
            event.id
        );
        assert_eq!(
            event.total_tickets - event.available_tickets,
            minted_here - flow.slots_returned,
            "capacity accounting broken for event {}",
            event.id
        );
        assert_eq!(
            u128::from(event.escrowed_balance.cents()),
            flow.inflow - flow.outflow,
            "escrow accounting broken for event {}",
            event.id
        );
    }

    // No stale entries: every indexed id maps back to a ticket with that owner
    let mut indexed = 0usize;
    for (owner, ids) in state.owner_index() {
        for id in ids {
            indexed += 1;
            let ticket = state
                .ticket(*id)
                .unwrap_or_else(|| panic!("owner index references unknown ticket {id}"));
            assert_eq!(
                ticket.owner, *owner,
                "owner index disagrees with ticket {id}"
            );
        }
    }
    assert_eq!(
        indexed,
        state.tickets().count(),
        "owner index size disagrees with the ticket table"
    );
}
