//! Landing page.

use dioxus::prelude::*;

use crate::ui::components::Layout;

#[component]
fn FeatureCard(title: &'static str, body: &'static str) -> Element {
    rsx! {
        article {
            header { strong { "{title}" } }
            p { class: "muted", "{body}" }
        }
    }
}

#[component]
pub fn LandingPage() -> Element {
    rsx! {
        Layout { title: "Home".to_string(),
            section { class: "hero",
                h1 { "Multi-Site Management System" }
                p { class: "muted",
                    "Manage the contact numbers of all your sites from one dashboard."
                }
            }
            section { class: "feature-grid",
                FeatureCard {
                    title: "Central Dashboard",
                    body: "See every site, its domain and its WhatsApp number in a single table.",
                }
                FeatureCard {
                    title: "Instant Updates",
                    body: "Edits reach the public pages in real time, without a reload.",
                }
                FeatureCard {
                    title: "Change History",
                    body: "Every number change is recorded with who made it and when.",
                }
            }
            p { class: "hero",
                a { href: "/login", role: "button", "Access Admin Dashboard" }
            }
        }
    }
}
