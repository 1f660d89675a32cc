//! One-shot notification banner.

use dioxus::prelude::*;
use multisite_core::Toast;

#[component]
pub fn ToastBanner(toast: Option<Toast>) -> Element {
    let Some(toast) = toast else {
        return rsx! {};
    };
    let class = if toast.is_error() {
        "toast toast-destructive"
    } else {
        "toast"
    };

    rsx! {
        article { class: "{class}", role: "status",
            strong { "{toast.title}" }
            p { "{toast.description}" }
        }
    }
}
