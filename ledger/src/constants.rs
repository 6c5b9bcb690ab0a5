//! Validation bounds for ledger inputs.

/// Maximum tickets a single event may issue
pub const MAX_TICKETS_PER_EVENT: u32 = 1_000_000;

/// Maximum length of an event name, in bytes
pub const MAX_EVENT_NAME_LENGTH: usize = 200;

/// Maximum length of a metadata CID reference, in bytes
pub const MAX_METADATA_CID_LENGTH: usize = 1000;

/// Maximum tickets a single account may hold at once
pub const MAX_TICKETS_PER_ACCOUNT: usize = 1000;
