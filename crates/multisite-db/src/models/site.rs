//! Site database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for sites table
#[derive(Debug, Clone, FromRow)]
pub struct SiteModel {
    pub id: Uuid,
    pub domain: String,
    pub site_name: String,
    pub whatsapp_number: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
