//! Authentication service
//!
//! Handles admin login and the startup bootstrap of the configured admin.

use multisite_common::auth::{hash_password, validate_password_strength, verify_or_reject};
use multisite_common::{AppError, SessionToken};
use multisite_core::AdminUser;
use tracing::{info, instrument, warn};

use crate::dto::LoginRequest;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Login with email and password.
    ///
    /// An unknown email and a wrong password produce the same error.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> ServiceResult<(AdminUser, SessionToken)> {
        let Some((admin, password_hash)) =
            self.ctx.admin_repo().find_by_email(&request.email).await?
        else {
            warn!("Login failed: unknown admin");
            return Err(AppError::InvalidCredentials.into());
        };

        if let Err(e) = verify_or_reject(&request.password, &password_hash) {
            warn!(admin_id = %admin.id, "Login failed: invalid password");
            return Err(e.into());
        }

        let token = self.ctx.jwt_service().issue(admin.id)?;
        info!(admin_id = %admin.id, "Admin logged in");

        Ok((admin, token))
    }

    /// Create the admin account, or reset its password if it exists
    #[instrument(skip(self, password))]
    pub async fn ensure_admin(&self, email: &str, password: &str) -> ServiceResult<AdminUser> {
        validate_password_strength(password)?;
        let password_hash = hash_password(password)?;

        let admin = self
            .ctx
            .admin_repo()
            .upsert(&AdminUser::new(email), &password_hash)
            .await?;

        info!(admin_id = %admin.id, email = %admin.email, "Admin account ready");
        Ok(admin)
    }
}
