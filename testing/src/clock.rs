//! Deterministic test clock.

use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;
use ticketline_ledger::Clock;

/// Clock that returns a fixed, manually advanced time.
///
/// Lets tests pin purchase timestamps and journal record times exactly.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    /// Creates a clock frozen at `now`
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock to an absolute time
    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock() = now;
    }

    /// Advances the clock by a duration
    pub fn advance(&self, by: Duration) {
        let mut now = self.lock();
        *now += by;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        // A poisoned lock only means another test thread panicked; the
        // stored timestamp is still valid.
        self.now.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_moves_time_forward() {
        let start = DateTime::<Utc>::UNIX_EPOCH;
        let clock = FixedClock::new(start);
        assert_eq!(Clock::now(&clock), start);

        clock.advance(Duration::minutes(5));
        assert_eq!(Clock::now(&clock), start + Duration::minutes(5));
    }
}
