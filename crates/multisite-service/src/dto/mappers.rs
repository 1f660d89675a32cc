//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use multisite_core::{Site, SiteChangeLog};

use super::responses::{ChangeLogResponse, ContactUpdateResponse, SiteResponse};

impl From<&Site> for SiteResponse {
    fn from(site: &Site) -> Self {
        Self {
            id: site.id,
            domain: site.domain.clone(),
            site_name: site.site_name.clone(),
            whatsapp_number: site.whatsapp_number.clone(),
            whatsapp_link: site.whatsapp_link(),
            is_active: site.is_active,
            status: site.status_label(),
            created_at: site.created_at,
            updated_at: site.updated_at,
        }
    }
}

impl From<Site> for SiteResponse {
    fn from(site: Site) -> Self {
        Self::from(&site)
    }
}

impl From<SiteChangeLog> for ChangeLogResponse {
    fn from(log: SiteChangeLog) -> Self {
        Self {
            id: log.id,
            site_id: log.site_id,
            admin_user_id: log.admin_user_id,
            change_type: log.change_type,
            old_value: log.old_value,
            new_value: log.new_value,
            description: log.description,
            created_at: log.created_at,
        }
    }
}

impl From<(Site, SiteChangeLog)> for ContactUpdateResponse {
    fn from((site, log): (Site, SiteChangeLog)) -> Self {
        Self {
            site: SiteResponse::from(site),
            change_log: ChangeLogResponse::from(log),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_site_response_mapping() {
        let mut site = Site::new(
            "site1.example.com".to_string(),
            "Site One".to_string(),
            "+1 (234) 567-8900".to_string(),
        );
        site.is_active = false;

        let response = SiteResponse::from(&site);
        assert_eq!(response.whatsapp_link, "https://wa.me/12345678900");
        assert_eq!(response.status, "Inactive");
        assert_eq!(response.domain, "site1.example.com");
    }

    #[test]
    fn test_contact_update_mapping() {
        let site = Site::new(
            "site2.example.com".to_string(),
            "Site Two".to_string(),
            "+200".to_string(),
        );
        let log = SiteChangeLog::whatsapp_update(site.id, Uuid::new_v4(), "+100", "+200");

        let response = ContactUpdateResponse::from((site, log));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["site"]["whatsapp_number"], "+200");
        assert_eq!(json["change_log"]["change_type"], "whatsapp_update");
        assert_eq!(
            json["change_log"]["description"],
            "WhatsApp number updated from +100 to +200"
        );
    }
}
