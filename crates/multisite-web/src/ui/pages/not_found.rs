use dioxus::prelude::*;

use crate::ui::components::Layout;

#[component]
pub fn NotFoundPage() -> Element {
    rsx! {
        Layout { title: "Not Found".to_string(),
            section { class: "hero",
                h1 { "404" }
                p { "Page not found" }
                a { href: "/", "Return to Home" }
            }
        }
    }
}
