//! State of one public site page

use std::fmt;

use crate::entities::Site;
use crate::events::SiteUpdatedEvent;
use crate::value_objects::{whatsapp_link, SiteSlot};

/// Values the page renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteDisplay {
    pub site_name: String,
    pub whatsapp_number: String,
}

impl SiteDisplay {
    pub fn whatsapp_link(&self) -> String {
        whatsapp_link(&self.whatsapp_number)
    }
}

/// Where the displayed values came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplaySource {
    Placeholder,
    Fetched,
    Live,
}

/// Result of the initial fetch, for the caller to log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Missing,
    Failed(String),
}

/// A mounted public page bound to one domain key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicPageView {
    slot: SiteSlot,
    display: SiteDisplay,
    source: DisplaySource,
}

impl PublicPageView {
    /// Mount the page showing its placeholder values
    pub fn mount(slot: SiteSlot) -> Self {
        Self {
            slot,
            display: SiteDisplay {
                site_name: slot.placeholder_name.to_string(),
                whatsapp_number: slot.placeholder_number.to_string(),
            },
            source: DisplaySource::Placeholder,
        }
    }

    /// Apply the result of the one-time fetch by domain.
    ///
    /// A missing row or an error keeps the placeholder. The error text is
    /// returned for logging and is never rendered.
    pub fn apply_fetch<E: fmt::Display>(&mut self, result: Result<Option<Site>, E>) -> LoadOutcome {
        match result {
            Ok(Some(site)) => {
                self.display = SiteDisplay {
                    site_name: site.site_name,
                    whatsapp_number: site.whatsapp_number,
                };
                self.source = DisplaySource::Fetched;
                LoadOutcome::Loaded
            }
            Ok(None) => LoadOutcome::Missing,
            Err(e) => LoadOutcome::Failed(e.to_string()),
        }
    }

    /// Replace the displayed values with a change notification's new values.
    ///
    /// Returns `false` and leaves the state alone when the event belongs to
    /// another domain.
    pub fn apply_update(&mut self, event: &SiteUpdatedEvent) -> bool {
        if !event.domain.eq_ignore_ascii_case(self.slot.domain) {
            return false;
        }
        self.display = SiteDisplay {
            site_name: event.site_name.clone(),
            whatsapp_number: event.whatsapp_number.clone(),
        };
        self.source = DisplaySource::Live;
        true
    }

    #[inline]
    pub fn slot(&self) -> &SiteSlot {
        &self.slot
    }

    #[inline]
    pub fn domain(&self) -> &'static str {
        self.slot.domain
    }

    #[inline]
    pub fn display(&self) -> &SiteDisplay {
        &self.display
    }

    #[inline]
    pub fn source(&self) -> DisplaySource {
        self.source
    }
}
