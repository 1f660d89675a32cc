//! Authentication extractors
//!
//! API routes accept a Bearer token or the session cookie. Dashboard pages
//! accept only the cookie and redirect to the login page without one.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::Redirect,
};
use axum_extra::{
    extract::CookieJar,
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use multisite_common::{AppError, Claims};
use uuid::Uuid;

use crate::response::ApiError;
use crate::state::AppState;

/// Name of the HttpOnly cookie carrying the session JWT
pub const SESSION_COOKIE: &str = "multisite_session";

/// Authenticated admin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthAdmin {
    pub admin_id: Uuid,
    /// Login session; keys the dashboard view of this admin
    pub session_id: String,
    /// Token expiry, Unix seconds
    pub expires_at: i64,
}

impl AuthAdmin {
    fn from_claims(claims: &Claims) -> Result<Self, AppError> {
        Ok(Self {
            admin_id: claims.admin_id()?,
            session_id: claims.session_id.clone(),
            expires_at: claims.exp,
        })
    }
}

/// Decode a session token into the admin it belongs to
pub fn authenticate(state: &AppState, token: &str) -> Result<AuthAdmin, AppError> {
    let claims = state.jwt_service().decode_token(token)?;
    AuthAdmin::from_claims(&claims)
}

async fn cookie_token<S: Send + Sync>(parts: &mut Parts, state: &S) -> Option<String> {
    let jar = CookieJar::from_request_parts(parts, state).await.ok()?;
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthAdmin
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let bearer = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string());

        let token = match bearer {
            Some(token) => token,
            None => cookie_token(parts, state).await.ok_or(ApiError::MissingAuth)?,
        };

        authenticate(&AppState::from_ref(state), &token).map_err(|e| {
            tracing::warn!(error = %e, "Rejected session token");
            ApiError::InvalidToken
        })
    }
}

/// Admin signed in through the browser; anything else is sent to `/login`
#[derive(Debug, Clone)]
pub struct AdminSession(pub AuthAdmin);

#[async_trait]
impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(token) = cookie_token(parts, state).await else {
            return Err(Redirect::to("/login"));
        };

        authenticate(&AppState::from_ref(state), &token)
            .map(AdminSession)
            .map_err(|e| {
                tracing::debug!(error = %e, "Dashboard session rejected");
                Redirect::to("/login")
            })
    }
}

/// Browser session if one is present and valid
#[derive(Debug, Clone)]
pub struct OptionalAdminSession(pub Option<AuthAdmin>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAdminSession
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let admin = AdminSession::from_request_parts(parts, state)
            .await
            .ok()
            .map(|AdminSession(admin)| admin);
        Ok(OptionalAdminSession(admin))
    }
}
