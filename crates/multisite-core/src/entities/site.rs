//! Site entity - one public page's display name and contact number

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::{whatsapp_link, ContactNumber};

/// Site record keyed by its domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub id: Uuid,
    pub domain: String,
    pub site_name: String,
    pub whatsapp_number: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Site {
    /// Create a new active site
    pub fn new(domain: String, site_name: String, whatsapp_number: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            domain,
            site_name,
            whatsapp_number,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the site is active
    #[inline]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Label shown in the dashboard status column
    pub fn status_label(&self) -> &'static str {
        if self.is_active {
            "Active"
        } else {
            "Inactive"
        }
    }

    /// Public URL of the deployed site
    pub fn preview_url(&self) -> String {
        format!("https://{}", self.domain)
    }

    /// WhatsApp deep link for the current contact number
    pub fn whatsapp_link(&self) -> String {
        whatsapp_link(&self.whatsapp_number)
    }

    /// Replace the contact number
    pub fn set_contact_number(&mut self, number: &ContactNumber, at: DateTime<Utc>) {
        self.whatsapp_number = number.as_str().to_string();
        self.updated_at = at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> Site {
        Site::new(
            "site1.example.com".to_string(),
            "Site One".to_string(),
            "+1 (234) 567-890".to_string(),
        )
    }

    #[test]
    fn test_new_site_is_active() {
        let site = site();
        assert!(site.is_active());
        assert_eq!(site.status_label(), "Active");
        assert_eq!(site.created_at, site.updated_at);
    }

    #[test]
    fn test_preview_and_whatsapp_links() {
        let site = site();
        assert_eq!(site.preview_url(), "https://site1.example.com");
        assert_eq!(site.whatsapp_link(), "https://wa.me/1234567890");
    }

    #[test]
    fn test_set_contact_number_bumps_updated_at() {
        let mut site = site();
        let later = site.updated_at + chrono::Duration::seconds(5);
        let number = ContactNumber::parse("+44 7700 900123").unwrap();

        site.set_contact_number(&number, later);

        assert_eq!(site.whatsapp_number, "+44 7700 900123");
        assert_eq!(site.updated_at, later);
        assert_ne!(site.created_at, site.updated_at);
    }
}
