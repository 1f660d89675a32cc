//! Connection management
//!
//! Tracks open pages and the domain each one listens on.

mod connection;
mod manager;

pub use connection::{Connection, Outbound};
pub use manager::{ConnectionGuard, ConnectionManager, DomainInterest, InterestReceiver};
