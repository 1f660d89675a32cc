//! Domain entities - core business objects

mod admin;
mod change_log;
mod site;

pub use admin::AdminUser;
pub use change_log::{ChangeType, SiteChangeLog};
pub use site::Site;
