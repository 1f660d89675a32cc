//! # multisite-web
//!
//! Axum server for the ten public site pages, the admin dashboard and the
//! `/api/v1` JSON API. HTML is rendered on the server with Dioxus SSR.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
