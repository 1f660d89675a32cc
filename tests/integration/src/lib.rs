//! Integration test utilities for the multi-site server
//!
//! This crate provides helpers for running end-to-end tests against
//! the web server, its JSON API and the realtime gateway.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
