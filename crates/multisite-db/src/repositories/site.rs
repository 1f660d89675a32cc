//! PostgreSQL implementation of SiteRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use multisite_core::entities::{Site, SiteChangeLog};
use multisite_core::traits::{ContactNumberChange, RepoResult, SiteRepository};

use crate::models::{SiteChangeLogModel, SiteModel};

use super::error::{map_db_error, site_not_found};

/// PostgreSQL implementation of SiteRepository
#[derive(Clone)]
pub struct PgSiteRepository {
    pool: PgPool,
}

impl PgSiteRepository {
    /// Create a new PgSiteRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SiteRepository for PgSiteRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Site>> {
        let result = sqlx::query_as::<_, SiteModel>(
            r"
            SELECT id, domain, site_name, whatsapp_number, is_active, created_at, updated_at
            FROM sites
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Site::from))
    }

    #[instrument(skip(self))]
    async fn find_by_domain(&self, domain: &str) -> RepoResult<Option<Site>> {
        let result = sqlx::query_as::<_, SiteModel>(
            r"
            SELECT id, domain, site_name, whatsapp_number, is_active, created_at, updated_at
            FROM sites
            WHERE lower(domain) = lower($1)
            ",
        )
        .bind(domain)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Site::from))
    }

    #[instrument(skip(self))]
    async fn list_ordered_by_name(&self) -> RepoResult<Vec<Site>> {
        let rows = sqlx::query_as::<_, SiteModel>(
            r"
            SELECT id, domain, site_name, whatsapp_number, is_active, created_at, updated_at
            FROM sites
            ORDER BY site_name ASC, domain ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Site::from).collect())
    }

    #[instrument(skip(self), fields(site_id = %change.site_id))]
    async fn update_contact_number(
        &self,
        change: &ContactNumberChange,
    ) -> RepoResult<(Site, SiteChangeLog)> {
        // The update and its log row commit together; dropping `tx` rolls back.
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let old_number: Option<String> = sqlx::query_scalar(
            r"
            SELECT whatsapp_number
            FROM sites
            WHERE id = $1
            FOR UPDATE
            ",
        )
        .bind(change.site_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let old_number = old_number.ok_or_else(|| site_not_found(change.site_id))?;

        let site = sqlx::query_as::<_, SiteModel>(
            r"
            UPDATE sites
            SET whatsapp_number = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, domain, site_name, whatsapp_number, is_active, created_at, updated_at
            ",
        )
        .bind(change.site_id)
        .bind(change.new_number.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let entry = SiteChangeLog::whatsapp_update(
            change.site_id,
            change.admin_user_id,
            &old_number,
            change.new_number.as_str(),
        );

        let log = sqlx::query_as::<_, SiteChangeLogModel>(
            r"
            INSERT INTO site_change_logs
                (id, site_id, admin_user_id, change_type, old_value, new_value, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, site_id, admin_user_id, change_type, old_value, new_value,
                      description, created_at
            ",
        )
        .bind(entry.id)
        .bind(entry.site_id)
        .bind(entry.admin_user_id)
        .bind(&entry.change_type)
        .bind(&entry.old_value)
        .bind(&entry.new_value)
        .bind(&entry.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok((Site::from(site), SiteChangeLog::from(log)))
    }
}
