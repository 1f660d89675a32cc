//! Value objects - immutable types that represent domain concepts

mod contact_number;
mod site_slot;

pub use contact_number::{whatsapp_link, ContactNumber, MAX_CONTACT_NUMBER_LEN};
pub use site_slot::{SiteSlot, SITE_SLOTS};
