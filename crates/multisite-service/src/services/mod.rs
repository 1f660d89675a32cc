//! Business logic services
//!
//! Services borrow a [`ServiceContext`] and orchestrate repositories, the
//! pub/sub publisher and the JWT service.

pub mod auth;
pub mod context;
pub mod error;
pub mod site;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use site::{SiteService, DEFAULT_CHANGE_LOG_LIMIT, MAX_CHANGE_LOG_LIMIT};
