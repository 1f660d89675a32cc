//! Site change log database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for site_change_logs table
#[derive(Debug, Clone, FromRow)]
pub struct SiteChangeLogModel {
    pub id: Uuid,
    pub site_id: Uuid,
    pub admin_user_id: Option<Uuid>,
    pub change_type: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
