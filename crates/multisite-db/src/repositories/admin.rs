//! PostgreSQL implementation of AdminRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use multisite_core::entities::AdminUser;
use multisite_core::traits::{AdminRepository, RepoResult};

use crate::models::AdminUserModel;

use super::error::map_db_error;

/// PostgreSQL implementation of AdminRepository
#[derive(Clone)]
pub struct PgAdminRepository {
    pool: PgPool,
}

impl PgAdminRepository {
    /// Create a new PgAdminRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminRepository for PgAdminRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<AdminUser>> {
        let result = sqlx::query_as::<_, AdminUserModel>(
            r"
            SELECT id, email, password_hash, created_at
            FROM admin_users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(AdminUser::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<(AdminUser, String)>> {
        let result = sqlx::query_as::<_, AdminUserModel>(
            r"
            SELECT id, email, password_hash, created_at
            FROM admin_users
            WHERE email = $1
            ",
        )
        .bind(AdminUser::normalize_email(email))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(AdminUserModel::into_parts))
    }

    #[instrument(skip(self, password_hash), fields(email = %admin.email))]
    async fn upsert(&self, admin: &AdminUser, password_hash: &str) -> RepoResult<AdminUser> {
        let row = sqlx::query_as::<_, AdminUserModel>(
            r"
            INSERT INTO admin_users (id, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO UPDATE SET password_hash = EXCLUDED.password_hash
            RETURNING id, email, password_hash, created_at
            ",
        )
        .bind(admin.id)
        .bind(&admin.email)
        .bind(password_hash)
        .bind(admin.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(AdminUser::from(row))
    }
}
