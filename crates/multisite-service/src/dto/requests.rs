//! Request DTOs for API endpoints and HTML forms
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

/// Admin login request, used by both the JSON API and the login form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Contact number edit
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateContactRequest {
    #[validate(length(min = 1, max = 32, message = "WhatsApp number must be 1-32 characters"))]
    pub whatsapp_number: String,
}

/// Query string of the change history endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeLogQuery {
    pub limit: Option<i64>,
}
