//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{AdminUser, Site, SiteChangeLog};
use crate::error::DomainError;
use crate::value_objects::ContactNumber;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// A contact number edit made by an admin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactNumberChange {
    pub site_id: Uuid,
    pub admin_user_id: Uuid,
    pub new_number: ContactNumber,
}

// ============================================================================
// Site Repository
// ============================================================================

#[async_trait]
pub trait SiteRepository: Send + Sync {
    /// Find site by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Site>>;

    /// Find site by its domain key
    async fn find_by_domain(&self, domain: &str) -> RepoResult<Option<Site>>;

    /// List all sites ordered by display name
    async fn list_ordered_by_name(&self) -> RepoResult<Vec<Site>>;

    /// Replace a site's contact number and append the matching change log.
    ///
    /// Both writes commit together or not at all. The old value recorded in
    /// the log is the one stored at the time of the update.
    async fn update_contact_number(
        &self,
        change: &ContactNumberChange,
    ) -> RepoResult<(Site, SiteChangeLog)>;
}

// ============================================================================
// Change Log Repository
// ============================================================================

#[async_trait]
pub trait ChangeLogRepository: Send + Sync {
    /// List change logs of a site, newest first
    async fn list_for_site(&self, site_id: Uuid, limit: i64) -> RepoResult<Vec<SiteChangeLog>>;
}

// ============================================================================
// Admin Repository
// ============================================================================

#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Find admin by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<AdminUser>>;

    /// Find admin and password hash by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<(AdminUser, String)>>;

    /// Create the admin or replace the password hash of an existing one with the same email
    async fn upsert(&self, admin: &AdminUser, password_hash: &str) -> RepoResult<AdminUser>;
}
