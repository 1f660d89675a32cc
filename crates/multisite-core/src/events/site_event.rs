//! Site events - emitted when a site record changes
//!
//! These events are used for:
//! - Pushing new display values to every open public page of that domain
//! - Letting other processes react to dashboard edits

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Site;

/// Event type name carried on the wire
pub const SITE_UPDATE: &str = "SITE_UPDATE";

/// All possible site events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SiteEvent {
    SiteUpdate(SiteUpdatedEvent),
}

impl SiteEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::SiteUpdate(_) => SITE_UPDATE,
        }
    }

    /// Domain key the event is scoped to
    pub fn domain(&self) -> &str {
        match self {
            Self::SiteUpdate(e) => &e.domain,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::SiteUpdate(e) => e.timestamp,
        }
    }
}

/// New values of a site row after an update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteUpdatedEvent {
    pub site_id: Uuid,
    pub domain: String,
    pub site_name: String,
    pub whatsapp_number: String,
    pub is_active: bool,
    pub timestamp: DateTime<Utc>,
}

impl SiteUpdatedEvent {
    pub fn from_site(site: &Site) -> Self {
        Self {
            site_id: site.id,
            domain: site.domain.clone(),
            site_name: site.site_name.clone(),
            whatsapp_number: site.whatsapp_number.clone(),
            is_active: site.is_active,
            timestamp: Utc::now(),
        }
    }
}

impl From<SiteUpdatedEvent> for SiteEvent {
    fn from(event: SiteUpdatedEvent) -> Self {
        Self::SiteUpdate(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let site = Site::new(
            "site2.example.com".to_string(),
            "Site Two".to_string(),
            "+1234567891".to_string(),
        );
        let event = SiteEvent::from(SiteUpdatedEvent::from_site(&site));

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "SITE_UPDATE");
        assert_eq!(json["domain"], "site2.example.com");
        assert_eq!(json["whatsapp_number"], "+1234567891");

        let parsed: SiteEvent = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_event_accessors() {
        let site = Site::new(
            "site5.example.com".to_string(),
            "Site Five".to_string(),
            "+1234567894".to_string(),
        );
        let event: SiteEvent = SiteUpdatedEvent::from_site(&site).into();
        assert_eq!(event.event_type(), SITE_UPDATE);
        assert_eq!(event.domain(), "site5.example.com");
    }
}
