//! Error handling utilities for repositories

use multisite_core::error::DomainError;
use sqlx::Error as SqlxError;
use uuid::Uuid;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Create a "site not found" error
pub fn site_not_found(id: Uuid) -> DomainError {
    DomainError::SiteNotFound(id.to_string())
}
