//! Domain events

mod site_event;

pub use site_event::{SiteEvent, SiteUpdatedEvent, SITE_UPDATE};
