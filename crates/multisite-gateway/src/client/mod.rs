//! Gateway client
//!
//! Keeps a [`PublicPageView`](multisite_core::PublicPageView) in sync with the
//! gateway from Rust code.

mod error;
mod live_view;

pub use error::{GatewayError, GatewayResult};
pub use live_view::{LiveSiteView, HELLO_TIMEOUT};
