//! HTTP handlers, one module per record family.

pub mod events;
pub mod health;
pub mod queries;
pub mod tickets;
