//! Admin dashboard handlers
//!
//! The [`DashboardView`] of each signed-in session lives in
//! [`AppState::dashboards`]. `GET /admin` mounts it from a fresh fetch; the
//! row actions mutate it and render the page again. Map guards are never held
//! across an `.await`.

use axum::{extract::State, response::Html, Form};
use dioxus::prelude::*;
use multisite_core::DashboardView;
use multisite_service::SiteService;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::pages::DashboardPage;
use super::render_document;
use crate::extractors::{AdminSession, AuthAdmin, SiteIdPath};
use crate::state::AppState;

/// Form posted by the save button of the row in edit mode
#[derive(Debug, Deserialize)]
pub struct SaveContactForm {
    #[serde(default)]
    pub whatsapp_number: String,
}

async fn fetch_view(state: &AppState) -> DashboardView {
    match SiteService::new(state.service_context()).list_sites().await {
        Ok(sites) => DashboardView::mount(sites),
        Err(e) => {
            warn!(error = %e, "Failed to fetch sites for the dashboard");
            DashboardView::mount_failed()
        }
    }
}

/// Mount the session's view if it has none yet
async fn ensure_mounted(state: &AppState, admin: &AuthAdmin) {
    if state.dashboards().contains(&admin.session_id) {
        return;
    }
    let view = fetch_view(state).await;
    state
        .dashboards()
        .store_if_absent(&admin.session_id, admin.expires_at, view);
}

/// Apply `action` to the session's view, mounting it first when needed
async fn with_view<R>(
    state: &AppState,
    admin: &AuthAdmin,
    action: impl FnOnce(&mut DashboardView) -> R,
) -> Option<R> {
    ensure_mounted(state, admin).await;
    let mut session = state.dashboards().get_mut(&admin.session_id)?;
    Some(action(&mut session.view))
}

/// Render the session's view, consuming its pending toast
fn render_dashboard(state: &AppState, session_id: &str) -> Html<String> {
    let (view, toast) = match state.dashboards().get_mut(session_id) {
        Some(mut session) => {
            let toast = session.view.take_toast();
            (session.view.clone(), toast)
        }
        None => (DashboardView::default(), None),
    };
    render_document(rsx! { DashboardPage { view, toast } })
}

/// GET /admin - Mount the dashboard from a fresh fetch
pub async fn dashboard(
    State(state): State<AppState>,
    AdminSession(admin): AdminSession,
) -> Html<String> {
    let view = fetch_view(&state).await;
    state
        .dashboards()
        .store(&admin.session_id, admin.expires_at, view);
    render_dashboard(&state, &admin.session_id)
}

/// POST /admin/sites/:site_id/edit
pub async fn start_edit(
    State(state): State<AppState>,
    AdminSession(admin): AdminSession,
    SiteIdPath(site_id): SiteIdPath,
) -> Html<String> {
    let started = with_view(&state, &admin, |view| view.start_edit(site_id)).await;
    if started != Some(true) {
        debug!(%site_id, "Edit requested for a site not on the dashboard");
    }
    render_dashboard(&state, &admin.session_id)
}

/// POST /admin/sites/:site_id/cancel
pub async fn cancel_edit(
    State(state): State<AppState>,
    AdminSession(admin): AdminSession,
    SiteIdPath(_site_id): SiteIdPath,
) -> Html<String> {
    with_view(&state, &admin, DashboardView::cancel_edit).await;
    render_dashboard(&state, &admin.session_id)
}

/// POST /admin/sites/:site_id/save - Persist the typed number.
///
/// The view validates first; an invalid value never reaches the backend.
/// On success the row is patched in place, on failure edit mode stays on.
pub async fn save_edit(
    State(state): State<AppState>,
    AdminSession(admin): AdminSession,
    SiteIdPath(site_id): SiteIdPath,
    Form(form): Form<SaveContactForm>,
) -> Html<String> {
    let pending = with_view(&state, &admin, |view| {
        view.set_edit_value(form.whatsapp_number);
        view.begin_save(site_id)
    })
    .await;

    let pending = match pending {
        Some(Ok(pending)) => pending,
        Some(Err(e)) => {
            debug!(%site_id, error = %e, "Save rejected");
            return render_dashboard(&state, &admin.session_id);
        }
        None => return render_dashboard(&state, &admin.session_id),
    };

    let result = SiteService::new(state.service_context())
        .update_contact_number(pending.site_id, admin.admin_id, pending.new_value.as_str())
        .await;

    if let Some(mut session) = state.dashboards().get_mut(&admin.session_id) {
        let view = &mut session.view;
        match result {
            Ok((site, _)) => {
                info!(
                    %site_id,
                    old = %pending.old_value,
                    new = %pending.new_value.as_str(),
                    "Contact number saved from dashboard"
                );
                view.apply_saved(&pending, site.updated_at);
            }
            Err(e) => {
                warn!(%site_id, error = %e, "Failed to save contact number");
                view.apply_save_failed();
            }
        }
    }

    render_dashboard(&state, &admin.session_id)
}

/// POST /admin/sites/:site_id/redeploy - Acknowledge only; nothing is deployed
pub async fn redeploy(
    State(state): State<AppState>,
    AdminSession(admin): AdminSession,
    SiteIdPath(site_id): SiteIdPath,
) -> Html<String> {
    with_view(&state, &admin, |view| view.redeploy(site_id)).await;
    render_dashboard(&state, &admin.session_id)
}
