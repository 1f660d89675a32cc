//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in multisite-core.

mod admin;
mod change_log;
mod error;
mod site;

pub use admin::PgAdminRepository;
pub use change_log::PgChangeLogRepository;
pub use site::PgSiteRepository;
