//! Application state for Axum handlers.

use std::sync::Arc;
use ticketline_ledger::Ledger;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Application state shared across all HTTP handlers.
///
/// The ledger sits behind a single `RwLock`; mutating handlers hold the
/// write guard from precondition check to commit, which is the
/// one-lock-per-operation boundary the ledger's accounting requires.
/// Read-only handlers share the read guard.
#[derive(Clone)]
pub struct AppState {
    ledger: Arc<RwLock<Ledger>>,
}

impl AppState {
    /// Creates state around an empty ledger on the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ledger(Ledger::new())
    }

    /// Creates state around a prepared ledger (tests inject fixed clocks
    /// and seeded records this way).
    #[must_use]
    pub fn with_ledger(ledger: Ledger) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Shared read access for query handlers.
    pub async fn read(&self) -> RwLockReadGuard<'_, Ledger> {
        self.ledger.read().await
    }

    /// Exclusive access for one whole mutating operation.
    pub async fn write(&self) -> RwLockWriteGuard<'_, Ledger> {
        self.ledger.write().await
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[tokio::test]
    async fn guards_see_the_same_ledger() {
        let state = AppState::new();
        assert_eq!(state.read().await.event_count(), 0);
    }
}
