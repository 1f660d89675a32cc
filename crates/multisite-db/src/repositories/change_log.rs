//! PostgreSQL implementation of ChangeLogRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use multisite_core::entities::SiteChangeLog;
use multisite_core::traits::{ChangeLogRepository, RepoResult};

use crate::models::SiteChangeLogModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ChangeLogRepository
#[derive(Clone)]
pub struct PgChangeLogRepository {
    pool: PgPool,
}

impl PgChangeLogRepository {
    /// Create a new PgChangeLogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChangeLogRepository for PgChangeLogRepository {
    #[instrument(skip(self))]
    async fn list_for_site(&self, site_id: Uuid, limit: i64) -> RepoResult<Vec<SiteChangeLog>> {
        let rows = sqlx::query_as::<_, SiteChangeLogModel>(
            r"
            SELECT id, site_id, admin_user_id, change_type, old_value, new_value,
                   description, created_at
            FROM site_change_logs
            WHERE site_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            ",
        )
        .bind(site_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(SiteChangeLog::from).collect())
    }
}
