//! Browser sign-in and sign-out
//!
//! The session JWT travels in an HttpOnly cookie; the dashboard view of the
//! session is dropped on sign-out.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use dioxus::prelude::*;
use multisite_service::dto::LoginRequest;
use multisite_service::AuthService;
use tracing::{error, info};
use validator::Validate;

use super::pages::LoginPage;
use super::render_document;
use crate::extractors::{OptionalAdminSession, SESSION_COOKIE};
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const SIGN_IN_UNAVAILABLE: &str = "Sign in is unavailable right now, please try again";

fn render_login(error: Option<&str>, email: Option<&str>) -> Html<String> {
    let error = error.map(str::to_string);
    let email = email.map(str::to_string);
    render_document(rsx! { LoginPage { error, email } })
}

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// GET /login - Sign-in form, or straight to the dashboard when signed in
pub async fn login_page(OptionalAdminSession(admin): OptionalAdminSession) -> Response {
    if admin.is_some() {
        return Redirect::to("/admin").into_response();
    }
    render_login(None, None).into_response()
}

/// POST /login - Verify the credentials and start a browser session
pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(request): Form<LoginRequest>,
) -> Response {
    if request.validate().is_err() {
        return (
            StatusCode::UNAUTHORIZED,
            render_login(Some(INVALID_CREDENTIALS), Some(&request.email)),
        )
            .into_response();
    }

    match AuthService::new(state.service_context()).login(&request).await {
        Ok((admin, token)) => {
            info!(admin_id = %admin.id, "Dashboard session started");
            let secure = state.config().app.env.is_production();
            let jar = jar.add(session_cookie(token.access_token, secure));
            (jar, Redirect::to("/admin")).into_response()
        }
        Err(e) if e.status_code() == StatusCode::UNAUTHORIZED.as_u16() => (
            StatusCode::UNAUTHORIZED,
            render_login(Some(INVALID_CREDENTIALS), Some(&request.email)),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Sign in failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                render_login(Some(SIGN_IN_UNAVAILABLE), Some(&request.email)),
            )
                .into_response()
        }
    }
}

/// POST /logout - End the browser session
pub async fn logout(
    State(state): State<AppState>,
    OptionalAdminSession(admin): OptionalAdminSession,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    if let Some(admin) = admin {
        state.dashboards().remove(&admin.session_id);
        info!(admin_id = %admin.admin_id, "Dashboard session ended");
    }
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to("/login"))
}
