//! Database models - SQLx-compatible structs for PostgreSQL tables

mod admin;
mod change_log;
mod site;

pub use admin::AdminUserModel;
pub use change_log::SiteChangeLogModel;
pub use site::SiteModel;
