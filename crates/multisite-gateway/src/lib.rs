//! # multisite-gateway
//!
//! WebSocket fan-out of site change notifications. Public pages connect to
//! `/realtime?domain=...` and receive a `SITE_UPDATE` dispatch whenever the
//! site behind that domain is edited. [`client::LiveSiteView`] is the Rust
//! side of the same protocol.

pub mod broadcast;
pub mod client;
pub mod connection;
pub mod handlers;
pub mod protocol;
pub mod server;

#[cfg(test)]
mod testing;

pub use client::{GatewayError, LiveSiteView};
pub use server::{create_app, create_gateway_state, create_gateway_state_with, run, GatewaySettings, GatewayState};
