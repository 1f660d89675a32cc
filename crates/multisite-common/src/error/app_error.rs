//! Application error types
//!
//! One error type shared by the web server and the gateway. Every variant
//! knows the HTTP status it is reported with and a stable `SCREAMING_SNAKE`
//! code clients can match on.

use multisite_core::DomainError;
use serde::Serialize;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// HTTP status a domain error is reported with
#[must_use]
pub fn domain_status(err: &DomainError) -> u16 {
    if err.is_not_found() {
        404
    } else if err.is_validation() {
        400
    } else if err.is_conflict() {
        409
    } else {
        500
    }
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidCredentials | Self::InvalidToken | Self::TokenExpired => 401,
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Domain(e) => domain_status(e),
            Self::Database(_) | Self::Cache(_) | Self::Internal(_) | Self::Config(_) => 500,
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

/// `error` member of a JSON error body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: Option<serde_json::Value>) -> Self {
        self.details = details;
        self
    }
}

/// Server errors keep their message in the log only
impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        let message = if err.is_server_error() {
            "Internal server error".to_string()
        } else {
            err.to_string()
        };
        Self::new(err.error_code(), message)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InvalidCredentials.status_code(), 401);
        assert_eq!(AppError::TokenExpired.status_code(), 401);
        assert_eq!(AppError::NotFound("site".to_string()).status_code(), 404);
        assert_eq!(AppError::Validation("test".to_string()).status_code(), 400);
        assert_eq!(AppError::Database("test".to_string()).status_code(), 500);
    }

    #[test]
    fn test_domain_status_codes() {
        let err = AppError::from(DomainError::SiteNotFound("site1.example.com".to_string()));
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "UNKNOWN_SITE");

        assert_eq!(domain_status(&DomainError::EmptyContactNumber), 400);
        assert_eq!(domain_status(&DomainError::NotEditing), 409);
        assert_eq!(domain_status(&DomainError::DatabaseError("down".to_string())), 500);
    }

    #[test]
    fn test_server_errors() {
        assert!(!AppError::InvalidCredentials.is_server_error());
        assert!(AppError::Cache("refused".to_string()).is_server_error());
        assert!(AppError::Config("bad port".to_string()).is_server_error());
    }

    #[test]
    fn test_error_response_for_client_error() {
        let response = ErrorResponse::from(&AppError::NotFound("site".to_string()));

        assert_eq!(response.code, "NOT_FOUND");
        assert_eq!(response.message, "Resource not found: site");
        assert!(response.details.is_none());
    }

    #[test]
    fn test_error_response_hides_server_details() {
        let err = AppError::Database("password authentication failed".to_string());
        let response = ErrorResponse::from(&err);

        assert_eq!(response.code, "DATABASE_ERROR");
        assert_eq!(response.message, "Internal server error");
    }

    #[test]
    fn test_error_response_serializes_details_only_when_present() {
        let plain = serde_json::to_value(ErrorResponse::new("X", "y")).unwrap();
        assert!(plain.get("details").is_none());

        let detailed = ErrorResponse::new("X", "y")
            .with_details(Some(serde_json::json!({"field": "email"})));
        let value = serde_json::to_value(detailed).unwrap();
        assert_eq!(value["details"]["field"], "email");
    }
}
