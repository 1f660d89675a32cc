//! Authentication handlers

use axum::{extract::State, Json};
use multisite_common::SessionToken;
use multisite_service::dto::LoginRequest;
use multisite_service::AuthService;

use crate::extractors::ValidatedJson;
use crate::response::ApiResult;
use crate::state::AppState;

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<SessionToken>> {
    let (_, token) = AuthService::new(state.service_context())
        .login(&request)
        .await?;
    Ok(Json(token))
}
