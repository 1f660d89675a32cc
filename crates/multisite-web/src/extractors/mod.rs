//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation and path parameters.

mod auth;
mod path;
mod validated;

pub use auth::{
    authenticate, AdminSession, AuthAdmin, OptionalAdminSession, SESSION_COOKIE,
};
pub use path::SiteIdPath;
pub use validated::ValidatedJson;
