//! Shared Dioxus components.

mod layout;
mod toast;

pub use layout::Layout;
pub use toast::ToastBanner;
