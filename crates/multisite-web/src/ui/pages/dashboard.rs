//! Admin dashboard.
//!
//! Every action is a small form posting to `/admin/sites/{id}/{action}`; the
//! server applies it to the session's [`DashboardView`] and renders the page
//! again. The row in edit mode puts its number input outside the save form
//! and binds it with the `form` attribute so the table stays valid markup.

use dioxus::prelude::*;
use multisite_core::{DashboardView, Site, Toast};

use crate::ui::components::{Layout, ToastBanner};

/// Format used in the Last Updated column
const UPDATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

#[component]
fn ActionButton(site_id: String, action: &'static str, label: &'static str, secondary: bool) -> Element {
    let class = if secondary { "secondary outline" } else { "" };
    rsx! {
        form { method: "post", action: "/admin/sites/{site_id}/{action}",
            button { r#type: "submit", class: "{class}", "{label}" }
        }
    }
}

#[component]
fn SiteRow(site: Site, editing_value: Option<String>) -> Element {
    let id = site.id.to_string();
    let updated = site.updated_at.format(UPDATED_AT_FORMAT).to_string();
    let badge = if site.is_active() {
        "badge badge-active"
    } else {
        "badge badge-inactive"
    };
    let preview = site.preview_url();
    let status = site.status_label();

    rsx! {
        tr {
            td { strong { "{site.site_name}" } }
            td { class: "muted", "{site.domain}" }
            td {
                if let Some(value) = editing_value.clone() {
                    input {
                        name: "whatsapp_number",
                        value: "{value}",
                        "form": "save-{id}",
                        "aria-label": "WhatsApp number for {site.site_name}",
                        autofocus: true,
                    }
                } else {
                    span { class: "number", "{site.whatsapp_number}" }
                }
            }
            td { span { class: "{badge}", "{status}" } }
            td { class: "muted", "{updated}" }
            td {
                div { class: "actions",
                    if editing_value.is_some() {
                        form { id: "save-{id}", method: "post", action: "/admin/sites/{id}/save",
                            button { r#type: "submit", "Save" }
                        }
                        ActionButton { site_id: id.clone(), action: "cancel", label: "Cancel", secondary: true }
                    } else {
                        ActionButton { site_id: id.clone(), action: "edit", label: "Edit", secondary: false }
                        a {
                            href: "{preview}",
                            target: "_blank",
                            rel: "noopener noreferrer",
                            role: "button",
                            class: "secondary outline",
                            "Preview"
                        }
                        ActionButton { site_id: id.clone(), action: "redeploy", label: "Redeploy", secondary: true }
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct DashboardPageProps {
    pub view: DashboardView,
    /// Toast taken from the view for this render
    #[props(default)]
    pub toast: Option<Toast>,
}

#[component]
pub fn DashboardPage(props: DashboardPageProps) -> Element {
    let view = &props.view;
    let rows: Vec<(Site, Option<String>)> = view
        .sites()
        .iter()
        .map(|site| {
            let editing_value = view
                .editing()
                .filter(|edit| edit.site_id == site.id)
                .map(|edit| edit.value.clone());
            (site.clone(), editing_value)
        })
        .collect();
    let count = rows.len();

    rsx! {
        Layout { title: "Dashboard".to_string(),
            header { class: "page-header",
                div {
                    h1 { "Site Dashboard" }
                    p { class: "muted", "Manage WhatsApp numbers across {count} sites" }
                }
                form { method: "post", action: "/logout",
                    button { r#type: "submit", class: "secondary", "Sign Out" }
                }
            }
            ToastBanner { toast: props.toast.clone() }
            article {
                div { class: "overflow-auto",
                    table {
                        thead {
                            tr {
                                th { "Site Name" }
                                th { "Domain" }
                                th { "WhatsApp Number" }
                                th { "Status" }
                                th { "Last Updated" }
                                th { "Actions" }
                            }
                        }
                        tbody {
                            if rows.is_empty() {
                                tr {
                                    td { colspan: "6", class: "muted", "No sites found" }
                                }
                            }
                            for (site, editing_value) in rows {
                                SiteRow { key: "{site.id}", site, editing_value }
                            }
                        }
                    }
                }
            }
        }
    }
}
