//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Site not found: {0}")]
    SiteNotFound(String),

    #[error("Admin user not found: {0}")]
    AdminNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("WhatsApp number cannot be empty")]
    EmptyContactNumber,

    #[error("WhatsApp number too long: max {max} characters")]
    ContactNumberTooLong { max: usize },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Unknown site domain: {0}")]
    UnknownDomain(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Site is not in edit mode")]
    NotEditing,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::SiteNotFound(_) => "UNKNOWN_SITE",
            Self::AdminNotFound(_) => "UNKNOWN_ADMIN",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::EmptyContactNumber => "EMPTY_CONTACT_NUMBER",
            Self::ContactNumberTooLong { .. } => "CONTACT_NUMBER_TOO_LONG",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::UnknownDomain(_) => "UNKNOWN_DOMAIN",

            // Conflict
            Self::NotEditing => "NOT_EDITING",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SiteNotFound(_) | Self::AdminNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::EmptyContactNumber
                | Self::ContactNumberTooLong { .. }
                | Self::InvalidEmail
                | Self::UnknownDomain(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::NotEditing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::SiteNotFound("site1.example.com".to_string());
        assert_eq!(err.code(), "UNKNOWN_SITE");

        assert_eq!(DomainError::EmptyContactNumber.code(), "EMPTY_CONTACT_NUMBER");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::SiteNotFound("x".to_string()).is_not_found());
        assert!(DomainError::AdminNotFound("x".to_string()).is_not_found());
        assert!(!DomainError::EmptyContactNumber.is_not_found());
    }

    #[test]
    fn test_is_validation() {
        assert!(DomainError::EmptyContactNumber.is_validation());
        assert!(DomainError::ContactNumberTooLong { max: 32 }.is_validation());
        assert!(!DomainError::DatabaseError("down".to_string()).is_validation());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::SiteNotFound("site3.example.com".to_string());
        assert_eq!(err.to_string(), "Site not found: site3.example.com");

        let err = DomainError::ContactNumberTooLong { max: 32 };
        assert_eq!(err.to_string(), "WhatsApp number too long: max 32 characters");
    }
}
