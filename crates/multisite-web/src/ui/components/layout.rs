//! Layout shared by the landing, login, dashboard and 404 pages.

use dioxus::prelude::*;

/// CSS on top of Pico CSS
const CUSTOM_STYLES: &str = r#"
:root { --pico-font-size: 15px; }
.muted { color: var(--pico-muted-color); }
.feature-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 1rem; }
.hero { text-align: center; padding: 3rem 0 2rem; }
.page-header { display: flex; justify-content: space-between; align-items: center; gap: 1rem; flex-wrap: wrap; }
.actions { display: flex; gap: 0.5rem; align-items: center; }
.actions form, .actions a { margin: 0; }
.actions button, .actions a[role=button] { margin: 0; padding: 0.35rem 0.75rem; font-size: 0.85rem; }
.number { font-family: var(--pico-font-family-monospace); }
.badge { display: inline-block; padding: 0.1rem 0.5rem; border-radius: 999px; font-size: 0.8rem; }
.badge-active { background: var(--pico-primary-background); color: var(--pico-primary-inverse); }
.badge-inactive { background: var(--pico-secondary-background); color: var(--pico-secondary-inverse); }
.toast { border-left: 4px solid var(--pico-primary-background); }
.toast-destructive { border-left-color: var(--pico-del-color); }
.toast-destructive strong { color: var(--pico-del-color); }
.narrow { max-width: 420px; margin: 3rem auto; }
"#;

#[derive(Props, Clone, PartialEq)]
pub struct LayoutProps {
    /// Page title (shown in browser tab)
    pub title: String,
    pub children: Element,
}

/// Main layout component wrapping the management pages.
#[component]
pub fn Layout(props: LayoutProps) -> Element {
    rsx! {
        head {
            meta { charset: "utf-8" }
            meta { name: "viewport", content: "width=device-width, initial-scale=1" }
            title { "{props.title} - Multi-Site Management" }
            link {
                rel: "stylesheet",
                href: "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css"
            }
            style { {CUSTOM_STYLES} }
        }
        body {
            main { class: "container",
                {props.children}
            }
        }
    }
}
