//! Service context - dependency container for services
//!
//! Holds the repositories, the Redis publisher and the JWT service.

use std::sync::Arc;

use multisite_cache::{Publisher, SharedRedisPool};
use multisite_common::auth::JwtService;
use multisite_core::traits::{AdminRepository, ChangeLogRepository, SiteRepository};
use multisite_db::{PgAdminRepository, PgChangeLogRepository, PgPool, PgSiteRepository};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cheap to clone; every field is reference counted.
#[derive(Clone)]
pub struct ServiceContext {
    pool: PgPool,
    redis_pool: SharedRedisPool,

    site_repo: Arc<dyn SiteRepository>,
    change_log_repo: Arc<dyn ChangeLogRepository>,
    admin_repo: Arc<dyn AdminRepository>,

    publisher: Publisher,
    jwt_service: Arc<JwtService>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        pool: PgPool,
        redis_pool: SharedRedisPool,
        site_repo: Arc<dyn SiteRepository>,
        change_log_repo: Arc<dyn ChangeLogRepository>,
        admin_repo: Arc<dyn AdminRepository>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        let publisher = Publisher::new((*redis_pool).clone());

        Self {
            pool,
            redis_pool,
            site_repo,
            change_log_repo,
            admin_repo,
            publisher,
            jwt_service,
        }
    }

    /// Wire the Postgres repositories on top of `pool`
    pub fn postgres(pool: PgPool, redis_pool: SharedRedisPool, jwt_service: Arc<JwtService>) -> Self {
        Self::new(
            pool.clone(),
            redis_pool,
            Arc::new(PgSiteRepository::new(pool.clone())),
            Arc::new(PgChangeLogRepository::new(pool.clone())),
            Arc::new(PgAdminRepository::new(pool)),
            jwt_service,
        )
    }

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &SharedRedisPool {
        &self.redis_pool
    }

    pub fn site_repo(&self) -> &dyn SiteRepository {
        self.site_repo.as_ref()
    }

    pub fn change_log_repo(&self) -> &dyn ChangeLogRepository {
        self.change_log_repo.as_ref()
    }

    pub fn admin_repo(&self) -> &dyn AdminRepository {
        self.admin_repo.as_ref()
    }

    /// Get the Redis pub/sub publisher
    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &self.redis_pool)
            .field("repositories", &"...")
            .finish()
    }
}

/// Builder for creating a ServiceContext with custom repositories
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    site_repo: Option<Arc<dyn SiteRepository>>,
    change_log_repo: Option<Arc<dyn ChangeLogRepository>>,
    admin_repo: Option<Arc<dyn AdminRepository>>,
    jwt_service: Option<Arc<JwtService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn site_repo(mut self, repo: Arc<dyn SiteRepository>) -> Self {
        self.site_repo = Some(repo);
        self
    }

    pub fn change_log_repo(mut self, repo: Arc<dyn ChangeLogRepository>) -> Self {
        self.change_log_repo = Some(repo);
        self
    }

    pub fn admin_repo(mut self, repo: Arc<dyn AdminRepository>) -> Self {
        self.admin_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::MissingDependency` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &'static str) -> ServiceResult<T> {
            value.ok_or(ServiceError::MissingDependency(name))
        }

        Ok(ServiceContext::new(
            required(self.pool, "pool")?,
            required(self.redis_pool, "redis_pool")?,
            required(self.site_repo, "site_repo")?,
            required(self.change_log_repo, "change_log_repo")?,
            required(self.admin_repo, "admin_repo")?,
            required(self.jwt_service, "jwt_service")?,
        ))
    }
}
