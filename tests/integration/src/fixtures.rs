//! Test fixtures and data generators

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Admin account every test server seeds on startup
pub const TEST_ADMIN_EMAIL: &str = "integration-admin@example.com";
pub const TEST_ADMIN_PASSWORD: &str = "IntegrationPass123";

/// A contact number no other test run has written
pub fn unique_number() -> String {
    let digits = Uuid::new_v4().as_u128() % 10_000_000;
    format!("+1 555 {digits:07}")
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn admin() -> Self {
        Self {
            email: TEST_ADMIN_EMAIL.to_string(),
            password: TEST_ADMIN_PASSWORD.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, Serialize)]
pub struct UpdateContactRequest {
    pub whatsapp_number: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteResponse {
    pub id: Uuid,
    pub domain: String,
    pub site_name: String,
    pub whatsapp_number: String,
    pub whatsapp_link: String,
    pub is_active: bool,
    pub status: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangeLogResponse {
    pub id: Uuid,
    pub site_id: Uuid,
    pub admin_user_id: Option<Uuid>,
    pub change_type: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContactUpdateResponse {
    pub site: SiteResponse,
    pub change_log: ChangeLogResponse,
}

#[derive(Debug, Deserialize)]
pub struct RedeployResponse {
    pub status: String,
    pub site_id: Uuid,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
