//! # multisite-core
//!
//! Domain layer containing site entities, value objects, repository traits,
//! change events and the view state behind the public pages and the admin dashboard.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;
pub mod views;

// Re-export commonly used types at crate root
pub use entities::{AdminUser, ChangeType, Site, SiteChangeLog};
pub use error::DomainError;
pub use events::{SiteEvent, SiteUpdatedEvent, SITE_UPDATE};
pub use traits::{
    AdminRepository, ChangeLogRepository, ContactNumberChange, RepoResult, SiteRepository,
};
pub use value_objects::{whatsapp_link, ContactNumber, SiteSlot, MAX_CONTACT_NUMBER_LEN, SITE_SLOTS};
pub use views::{
    DashboardView, DisplaySource, EditState, LoadOutcome, PendingSave, PublicPageView,
    SiteDisplay, Toast, ToastVariant,
};
