//! View state - what each page displays, and how it changes
//!
//! Pages keep their state in these plain values and mutate it only through
//! their operations, so rendering stays a pure function of the state.

mod dashboard;
mod public_page;

pub use dashboard::{DashboardView, EditState, PendingSave, Toast, ToastVariant};
pub use public_page::{DisplaySource, LoadOutcome, PublicPageView, SiteDisplay};
