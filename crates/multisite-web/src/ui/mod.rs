//! Server-rendered HTML
//!
//! Pages are Dioxus components rendered to strings on every request:
//! - components/ - layout and toast shared by the management pages
//! - pages/ - landing, sign-in, dashboard, public site template, 404
//!
//! The management pages use Pico CSS. Public site pages carry their own
//! styles and a small script that listens to the realtime gateway.

pub mod components;
pub mod pages;

mod admin;
mod session;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use dioxus::prelude::*;
use multisite_core::{LoadOutcome, PublicPageView, SiteSlot};
use multisite_service::SiteService;
use tracing::warn;

use crate::state::AppState;
use pages::{LandingPage, NotFoundPage, SitePage};

pub use admin::{cancel_edit, dashboard, redeploy, save_edit, start_edit};
pub use session::{login_page, login_submit, logout};

/// Wrap rendered markup into a full HTML document
pub(crate) fn render_document(element: Element) -> Html<String> {
    let html = dioxus::ssr::render_element(element);
    Html(format!("<!DOCTYPE html>\n<html lang=\"en\">\n{html}</html>"))
}

/// GET / - Landing page
pub async fn landing_page() -> Html<String> {
    render_document(rsx! { LandingPage {} })
}

/// Fallback for every unmatched path
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, render_document(rsx! { NotFoundPage {} }))
}

/// GET /siteN - Public page of one catalogue entry.
///
/// Fetches the site once by domain. A missing row or a backend failure keeps
/// the placeholder values; the page is rendered either way.
pub async fn site_page(State(state): State<AppState>, slot: SiteSlot) -> Html<String> {
    let mut view = PublicPageView::mount(slot);

    let fetched = SiteService::new(state.service_context())
        .find_by_domain(slot.domain)
        .await;
    match view.apply_fetch(fetched) {
        LoadOutcome::Loaded => {}
        LoadOutcome::Missing => {
            warn!(domain = slot.domain, "No site data for domain, showing placeholder");
        }
        LoadOutcome::Failed(error) => {
            warn!(domain = slot.domain, error = %error, "Failed to fetch site data, showing placeholder");
        }
    }

    let display = view.display();
    render_document(rsx! {
        SitePage {
            domain: view.domain().to_string(),
            site_name: display.site_name.clone(),
            whatsapp_number: display.whatsapp_number.clone(),
            realtime_url: state.config().gateway.realtime_url(view.domain()),
        }
    })
}
