//! Page components.

mod dashboard;
mod landing;
mod login;
mod not_found;
mod site;

pub use dashboard::DashboardPage;
pub use landing::LandingPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use site::{SitePage, SiteTemplate, DEFAULT_DESCRIPTION, DEFAULT_LOGO};
