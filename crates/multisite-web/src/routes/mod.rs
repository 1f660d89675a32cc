//! Route definitions
//!
//! HTML pages at the root, the JSON API under /api/v1 and the health probes.

use axum::{
    extract::State,
    routing::{get, patch, post},
    Router,
};
use multisite_core::SITE_SLOTS;

use crate::handlers::{auth, health, sites};
use crate::state::AppState;
use crate::ui;

/// Create the main router with all pages and API routes (excluding health for
/// separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(page_routes())
        .merge(dashboard_routes())
        .merge(site_page_routes())
        .nest("/api/v1", api_v1_routes())
        .fallback(ui::not_found)
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Landing page and the sign-in flow
fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(ui::landing_page))
        .route("/login", get(ui::login_page).post(ui::login_submit))
        .route("/logout", post(ui::logout))
}

/// Admin dashboard and its row actions
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(ui::dashboard))
        .route("/admin/sites/:site_id/edit", post(ui::start_edit))
        .route("/admin/sites/:site_id/cancel", post(ui::cancel_edit))
        .route("/admin/sites/:site_id/save", post(ui::save_edit))
        .route("/admin/sites/:site_id/redeploy", post(ui::redeploy))
}

/// One public page per catalogue entry
fn site_page_routes() -> Router<AppState> {
    SITE_SLOTS.into_iter().fold(Router::new(), |router, slot| {
        router.route(
            slot.path,
            get(move |state: State<AppState>| ui::site_page(state, slot)),
        )
    })
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .merge(site_routes())
}

/// Site routes
fn site_routes() -> Router<AppState> {
    Router::new()
        .route("/sites", get(sites::list_sites))
        .route("/sites/by-domain/:domain", get(sites::get_site_by_domain))
        .route("/sites/:site_id/contact", patch(sites::update_contact))
        .route("/sites/:site_id/redeploy", post(sites::redeploy))
        .route("/sites/:site_id/change-logs", get(sites::list_change_logs))
}
