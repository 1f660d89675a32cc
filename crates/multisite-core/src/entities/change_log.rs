//! Change-log entity - append-only audit entry for one edit to a site

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Kind of change recorded in the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeType {
    WhatsappUpdate,
}

impl ChangeType {
    /// Tag stored in the `change_type` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WhatsappUpdate => "whatsapp_update",
        }
    }

    /// Parse a stored tag
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "whatsapp_update" => Some(Self::WhatsappUpdate),
            _ => None,
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit record written once per edit and never mutated afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteChangeLog {
    pub id: Uuid,
    pub site_id: Uuid,
    pub admin_user_id: Option<Uuid>,
    /// Kept as the stored string so unknown tags survive a round trip
    pub change_type: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SiteChangeLog {
    /// Build the entry for a contact number change
    pub fn whatsapp_update(
        site_id: Uuid,
        admin_user_id: Uuid,
        old_value: &str,
        new_value: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            site_id,
            admin_user_id: Some(admin_user_id),
            change_type: ChangeType::WhatsappUpdate.as_str().to_string(),
            old_value: Some(old_value.to_string()),
            new_value: Some(new_value.to_string()),
            description: Some(format!(
                "WhatsApp number updated from {old_value} to {new_value}"
            )),
            created_at: Utc::now(),
        }
    }

    /// Typed change kind, if the stored tag is known
    pub fn kind(&self) -> Option<ChangeType> {
        ChangeType::parse(&self.change_type)
    }
}
