//! Time source abstraction.

use chrono::{DateTime, Utc};

/// Clock trait - abstracts time operations for testability
///
/// Purchase timestamps and journal records take their time from an injected
/// clock so tests can pin them down.
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by system time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
