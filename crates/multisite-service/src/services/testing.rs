//! In-memory repositories and a context wired to them, for service tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use multisite_cache::{create_shared_pool, RedisPoolConfig};
use multisite_common::auth::JwtService;
use multisite_core::traits::{
    AdminRepository, ChangeLogRepository, ContactNumberChange, RepoResult, SiteRepository,
};
use multisite_core::{AdminUser, DomainError, Site, SiteChangeLog, SITE_SLOTS};
use parking_lot::Mutex;
use uuid::Uuid;

use super::context::{ServiceContext, ServiceContextBuilder};

#[derive(Default)]
pub struct MemoryStore {
    pub sites: Mutex<Vec<Site>>,
    pub logs: Mutex<Vec<SiteChangeLog>>,
    pub admins: Mutex<Vec<(AdminUser, String)>>,
    pub fail_updates: Mutex<bool>,
}

impl MemoryStore {
    /// Store holding the ten placeholder sites
    pub fn seeded() -> Arc<Self> {
        let store = Self::default();
        *store.sites.lock() = SITE_SLOTS
            .iter()
            .map(|slot| {
                Site::new(
                    slot.domain.to_string(),
                    slot.placeholder_name.to_string(),
                    slot.placeholder_number.to_string(),
                )
            })
            .collect();
        Arc::new(store)
    }

    pub fn site_by_domain(&self, domain: &str) -> Site {
        self.sites
            .lock()
            .iter()
            .find(|s| s.domain == domain)
            .cloned()
            .expect("seeded site")
    }
}

#[async_trait]
impl SiteRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Site>> {
        Ok(self.sites.lock().iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_domain(&self, domain: &str) -> RepoResult<Option<Site>> {
        Ok(self
            .sites
            .lock()
            .iter()
            .find(|s| s.domain.eq_ignore_ascii_case(domain))
            .cloned())
    }

    async fn list_ordered_by_name(&self) -> RepoResult<Vec<Site>> {
        let mut sites = self.sites.lock().clone();
        sites.sort_by(|a, b| a.site_name.cmp(&b.site_name).then(a.domain.cmp(&b.domain)));
        Ok(sites)
    }

    async fn update_contact_number(
        &self,
        change: &ContactNumberChange,
    ) -> RepoResult<(Site, SiteChangeLog)> {
        if *self.fail_updates.lock() {
            return Err(DomainError::DatabaseError("connection reset".to_string()));
        }
        let mut sites = self.sites.lock();
        let site = sites
            .iter_mut()
            .find(|s| s.id == change.site_id)
            .ok_or_else(|| DomainError::SiteNotFound(change.site_id.to_string()))?;

        let log = SiteChangeLog::whatsapp_update(
            site.id,
            change.admin_user_id,
            &site.whatsapp_number,
            change.new_number.as_str(),
        );
        site.set_contact_number(&change.new_number, Utc::now());
        self.logs.lock().push(log.clone());
        Ok((site.clone(), log))
    }
}

#[async_trait]
impl ChangeLogRepository for MemoryStore {
    async fn list_for_site(&self, site_id: Uuid, limit: i64) -> RepoResult<Vec<SiteChangeLog>> {
        let mut logs: Vec<SiteChangeLog> = self
            .logs
            .lock()
            .iter()
            .filter(|l| l.site_id == site_id)
            .cloned()
            .collect();
        logs.reverse();
        logs.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(logs)
    }
}

#[async_trait]
impl AdminRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<AdminUser>> {
        Ok(self
            .admins
            .lock()
            .iter()
            .find(|(a, _)| a.id == id)
            .map(|(a, _)| a.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<(AdminUser, String)>> {
        let email = AdminUser::normalize_email(email);
        Ok(self.admins.lock().iter().find(|(a, _)| a.email == email).cloned())
    }

    async fn upsert(&self, admin: &AdminUser, password_hash: &str) -> RepoResult<AdminUser> {
        let mut admins = self.admins.lock();
        if let Some(entry) = admins.iter_mut().find(|(a, _)| a.email == admin.email) {
            entry.1 = password_hash.to_string();
            return Ok(entry.0.clone());
        }
        admins.push((admin.clone(), password_hash.to_string()));
        Ok(admin.clone())
    }
}

/// Context over `store`; Postgres is never contacted and Redis is unreachable,
/// so every publish fails.
pub fn context(store: &Arc<MemoryStore>) -> ServiceContext {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgres://localhost/multisite_unused")
        .expect("lazy pool");
    let redis_pool = create_shared_pool(RedisPoolConfig {
        url: "redis://127.0.0.1:1".to_string(),
        max_connections: 1,
    })
    .expect("redis pool");

    ServiceContextBuilder::new()
        .pool(pool)
        .redis_pool(redis_pool)
        .site_repo(store.clone())
        .change_log_repo(store.clone())
        .admin_repo(store.clone())
        .jwt_service(Arc::new(JwtService::new("test-secret-for-service-tests", 3600)))
        .build()
        .expect("context")
}
