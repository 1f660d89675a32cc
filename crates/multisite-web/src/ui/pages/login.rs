//! Sign-in form.

use dioxus::prelude::*;

use crate::ui::components::Layout;

#[component]
pub fn LoginPage(error: Option<String>, email: Option<String>) -> Element {
    let email = email.unwrap_or_default();

    rsx! {
        Layout { title: "Sign In".to_string(),
            article { class: "narrow",
                header {
                    h2 { "Admin Sign In" }
                    p { class: "muted", "Sign in to manage your sites." }
                }
                if let Some(error) = error {
                    p { class: "toast toast-destructive", role: "alert", "{error}" }
                }
                form { method: "post", action: "/login",
                    label { r#for: "email", "Email" }
                    input {
                        id: "email",
                        name: "email",
                        r#type: "email",
                        value: "{email}",
                        autocomplete: "username",
                        required: true,
                    }
                    label { r#for: "password", "Password" }
                    input {
                        id: "password",
                        name: "password",
                        r#type: "password",
                        autocomplete: "current-password",
                        required: true,
                    }
                    button { r#type: "submit", "Sign In" }
                }
                footer {
                    a { href: "/", "Back to home" }
                }
            }
        }
    }
}
