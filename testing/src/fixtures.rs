//! Ready-made ledger setups for tests.

use crate::FixedClock;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use ticketline_ledger::{AccountId, EventId, Ledger, Money};

/// The timestamp fixture clocks start from
#[must_use]
pub fn base_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_750_000_000, 0).unwrap_or_default()
}

/// An empty ledger on a fixed clock, plus a handle to advance the clock
#[must_use]
pub fn ledger() -> (Ledger, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(base_time()));
    (Ledger::with_clock(clock.clone()), clock)
}

/// A ledger holding one live event, with its organizer and id.
#[must_use]
#[allow(clippy::expect_used)]
pub fn seeded(price: u64, capacity: u32) -> (Ledger, AccountId, EventId) {
    let (mut ledger, _clock) = self::ledger();
    let organizer = AccountId::new();
    let event_id = ledger
        .create_event(
            organizer,
            "Fixture Event".to_string(),
            Money::from_cents(price),
            capacity,
            "QmFixture".to_string(),
        )
        .expect("fixture event parameters are valid");
    (ledger, organizer, event_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_ledger_has_one_event() {
        let (ledger, organizer, event_id) = seeded(500, 3);
        assert_eq!(ledger.event_count(), 1);
        let event = ledger.state().event(event_id);
        assert!(event.is_some_and(|e| e.organizer == organizer && e.available_tickets == 3));
    }
}
