//! Admin user entity - an operator allowed into the dashboard

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Dashboard operator account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl AdminUser {
    /// Create a new admin with a normalized email
    pub fn new(email: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: Self::normalize_email(email),
            created_at: Utc::now(),
        }
    }

    /// Lowercase and trim an email so lookups are case-insensitive
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }
}
