//! # Ticketline Ledger
//!
//! A ticket-issuance ledger: a record store tracking events and the tickets
//! minted against them, enforcing ownership, payment, and lifecycle rules.
//!
//! ## Core Concepts
//!
//! - **Event**: an organizer's ticketed offering with fixed price and
//!   capacity, created once and moving `active → (cancelled | completed)`,
//!   terminal.
//! - **Ticket**: a unique, ownable claim against one event, minted on
//!   purchase and moving `minted → [transferred]* → (used | refunded)`.
//! - **Escrow**: payments collected per event and held against future
//!   refunds or organizer withdrawal. Purchases require an exact price
//!   match; every debit checks sufficiency first.
//! - **Journal**: an append-only notification log with one record per
//!   committed mutation, so external observers can reconstruct history.
//!
//! ## Atomicity and concurrency
//!
//! Every operation is all-or-nothing: preconditions are validated before the
//! first mutation, so an error return implies zero observable change. The
//! [`Ledger`] takes `&mut self` for every mutation; callers sharing an
//! instance wrap it in a lock and hold the write guard for a whole
//! operation, giving each call exclusive access to the entire state.
//!
//! ## Example
//!
//! ```
//! use ticketline_ledger::{AccountId, Ledger, Money};
//!
//! let mut ledger = Ledger::new();
//! let organizer = AccountId::new();
//! let buyer = AccountId::new();
//!
//! let event_id = ledger.create_event(
//!     organizer,
//!     "Rust Meetup".to_string(),
//!     Money::from_cents(5000),
//!     100,
//!     "QmMeetupCid".to_string(),
//! )?;
//!
//! let ticket_id = ledger.buy_ticket(buyer, event_id, Money::from_cents(5000))?;
//! assert_eq!(ledger.tickets_owned_by(buyer), vec![ticket_id]);
//! # Ok::<(), ticketline_ledger::LedgerError>(())
//! ```

pub mod clock;
pub mod constants;
pub mod error;
pub mod journal;
pub mod ledger;
pub mod state;
pub mod types;

pub use clock::{Clock, SystemClock};
pub use error::{ErrorKind, LedgerError};
pub use journal::LedgerEvent;
pub use ledger::Ledger;
pub use state::LedgerState;
pub use types::{AccountId, Event, EventId, Money, Ticket, TicketId};
