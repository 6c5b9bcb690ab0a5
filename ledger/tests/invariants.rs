//! Property tests: random operation soups against the invariant checker.
//!
//! Any sequence of calls, in any order, with any mix of valid and invalid
//! arguments, must leave the accounting invariants intact, and a rejected
//! call must leave the ledger byte-for-byte unchanged.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use ticketline_ledger::{AccountId, EventId, Ledger, Money, TicketId};
use ticketline_testing::assertions::assert_invariants;
use ticketline_testing::fixtures;

/// One externally invoked operation with small-domain arguments, so runs hit
/// plenty of both success and failure paths.
#[derive(Clone, Debug)]
enum Op {
    CreateEvent { organizer: usize, price: u64, capacity: u32 },
    BuyTicket { buyer: usize, event: u64, payment: u64 },
    TransferTicket { caller: usize, ticket: u64, to: usize },
    CancelTicket { caller: usize, ticket: u64 },
    RefundTicket { caller: usize, ticket: u64 },
    UseTicket { caller: usize, ticket: u64 },
    CancelEvent { caller: usize, event: u64 },
    CompleteEvent { caller: usize, event: u64 },
    WithdrawEarnings { caller: usize, event: u64 },
}

const ACTORS: usize = 4;

// Prices and payments are drawn from the same small set so exact matches
// happen often enough to mint tickets.
const AMOUNTS: [u64; 4] = [0, 50, 100, 150];

fn amount() -> impl Strategy<Value = u64> {
    (0..AMOUNTS.len()).prop_map(|i| AMOUNTS[i])
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..ACTORS, amount(), 1..4u32)
            .prop_map(|(organizer, price, capacity)| Op::CreateEvent { organizer, price, capacity }),
        (0..ACTORS, 0..6u64, amount())
            .prop_map(|(buyer, event, payment)| Op::BuyTicket { buyer, event, payment }),
        (0..ACTORS, 0..10u64, 0..ACTORS)
            .prop_map(|(caller, ticket, to)| Op::TransferTicket { caller, ticket, to }),
        (0..ACTORS, 0..10u64).prop_map(|(caller, ticket)| Op::CancelTicket { caller, ticket }),
        (0..ACTORS, 0..10u64).prop_map(|(caller, ticket)| Op::RefundTicket { caller, ticket }),
        (0..ACTORS, 0..10u64).prop_map(|(caller, ticket)| Op::UseTicket { caller, ticket }),
        (0..ACTORS, 0..6u64).prop_map(|(caller, event)| Op::CancelEvent { caller, event }),
        (0..ACTORS, 0..6u64).prop_map(|(caller, event)| Op::CompleteEvent { caller, event }),
        (0..ACTORS, 0..6u64).prop_map(|(caller, event)| Op::WithdrawEarnings { caller, event }),
    ]
}

/// Applies one operation, reporting whether the ledger rejected it.
fn apply(ledger: &mut Ledger, actors: &[AccountId], op: &Op) -> bool {
    let actor = |idx: usize| actors[idx % actors.len()];
    match *op {
        Op::CreateEvent {
            organizer,
            price,
            capacity,
        } => ledger
            .create_event(
                actor(organizer),
                "Soup Event".to_string(),
                Money::from_cents(price),
                capacity,
                "QmSoup".to_string(),
            )
            .is_err(),
        Op::BuyTicket {
            buyer,
            event,
            payment,
        } => ledger
            .buy_ticket(actor(buyer), EventId::new(event), Money::from_cents(payment))
            .is_err(),
        Op::TransferTicket { caller, ticket, to } => ledger
            .transfer_ticket(actor(caller), TicketId::new(ticket), actor(to))
            .is_err(),
        Op::CancelTicket { caller, ticket } => ledger
            .cancel_ticket(actor(caller), TicketId::new(ticket))
            .is_err(),
        Op::RefundTicket { caller, ticket } => ledger
            .refund_ticket(actor(caller), TicketId::new(ticket))
            .is_err(),
        Op::UseTicket { caller, ticket } => ledger
            .use_ticket(actor(caller), TicketId::new(ticket))
            .is_err(),
        Op::CancelEvent { caller, event } => ledger
            .cancel_event(actor(caller), EventId::new(event))
            .is_err(),
        Op::CompleteEvent { caller, event } => ledger
            .complete_event(actor(caller), EventId::new(event))
            .is_err(),
        Op::WithdrawEarnings { caller, event } => ledger
            .withdraw_earnings(actor(caller), EventId::new(event))
            .is_err(),
    }
}

proptest! {
    #[test]
    fn operation_soups_preserve_every_invariant(
        ops in proptest::collection::vec(op_strategy(), 1..80)
    ) {
        let (mut ledger, _clock) = fixtures::ledger();
        let actors: Vec<AccountId> = (0..ACTORS).map(|_| AccountId::new()).collect();

        for op in &ops {
            let state_before = ledger.state().clone();
            let journal_before = ledger.journal().len();

            let rejected = apply(&mut ledger, &actors, op);

            if rejected {
                // A failed call is a round-trip no-op
                prop_assert_eq!(ledger.state(), &state_before);
                prop_assert_eq!(ledger.journal().len(), journal_before);
            }
            assert_invariants(&ledger);
        }
    }

    #[test]
    fn successful_mutations_always_journal(
        ops in proptest::collection::vec(op_strategy(), 1..40)
    ) {
        let (mut ledger, _clock) = fixtures::ledger();
        let actors: Vec<AccountId> = (0..ACTORS).map(|_| AccountId::new()).collect();

        for op in &ops {
            let journal_before = ledger.journal().len();
            let rejected = apply(&mut ledger, &actors, op);

            // Self-transfer is the one accepted mutation that journals nothing
            let self_transfer = matches!(
                *op,
                Op::TransferTicket { caller, to, .. } if caller % ACTORS == to % ACTORS
            );
            if !rejected && !self_transfer {
                prop_assert_eq!(ledger.journal().len(), journal_before + 1);
            }
        }
    }
}
