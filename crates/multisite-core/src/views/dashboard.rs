//! State of the admin dashboard
//!
//! At most one row is in edit mode. A save is split in two: [`DashboardView::begin_save`]
//! validates the typed value and hands back a [`PendingSave`] for the caller to persist,
//! then [`DashboardView::apply_saved`] or [`DashboardView::apply_save_failed`] records the
//! outcome. The list is patched in place and never refetched by a save.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::Site;
use crate::error::DomainError;
use crate::value_objects::ContactNumber;

/// Row currently in edit mode and the value typed into it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub site_id: Uuid,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

/// One-shot notification shown after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn success(description: impl Into<String>) -> Self {
        Self::info("Success", description)
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.variant == ToastVariant::Destructive
    }
}

/// A validated edit waiting to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSave {
    pub site_id: Uuid,
    pub old_value: String,
    pub new_value: ContactNumber,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardView {
    sites: Vec<Site>,
    editing: Option<EditState>,
    toast: Option<Toast>,
}

impl DashboardView {
    /// Mount with the fetched rows, already ordered by name
    pub fn mount(sites: Vec<Site>) -> Self {
        Self {
            sites,
            editing: None,
            toast: None,
        }
    }

    /// Mount after the fetch failed: empty table and an error toast
    pub fn mount_failed() -> Self {
        Self {
            sites: Vec::new(),
            editing: None,
            toast: Some(Toast::error("Failed to fetch sites")),
        }
    }

    /// Put a row into edit mode, leaving any other row's edit
    pub fn start_edit(&mut self, site_id: Uuid) -> bool {
        let Some(site) = self.find(site_id) else {
            return false;
        };
        self.editing = Some(EditState {
            site_id,
            value: site.whatsapp_number.clone(),
        });
        true
    }

    /// Record what the operator typed into the edit field
    pub fn set_edit_value(&mut self, value: impl Into<String>) {
        if let Some(editing) = self.editing.as_mut() {
            editing.value = value.into();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Validate the typed value of the row in edit mode.
    ///
    /// On error the rows and edit mode are untouched and an error toast is set.
    pub fn begin_save(&mut self, site_id: Uuid) -> Result<PendingSave, DomainError> {
        let result = self.validate_save(site_id);
        if let Err(e) = &result {
            let description = if e.is_validation() {
                e.to_string()
            } else {
                "Failed to update WhatsApp number".to_string()
            };
            self.toast = Some(Toast::error(description));
        }
        result
    }

    fn validate_save(&self, site_id: Uuid) -> Result<PendingSave, DomainError> {
        let editing = match &self.editing {
            Some(editing) if editing.site_id == site_id => editing,
            _ => return Err(DomainError::NotEditing),
        };
        let site = self
            .find(site_id)
            .ok_or_else(|| DomainError::SiteNotFound(site_id.to_string()))?;

        Ok(PendingSave {
            site_id,
            old_value: site.whatsapp_number.clone(),
            new_value: ContactNumber::parse(&editing.value)?,
        })
    }

    /// Patch the saved row in place and leave edit mode.
    ///
    /// Returns `false` when the row is no longer in the list.
    pub fn apply_saved(&mut self, pending: &PendingSave, updated_at: DateTime<Utc>) -> bool {
        let Some(site) = self.sites.iter_mut().find(|s| s.id == pending.site_id) else {
            return false;
        };
        site.set_contact_number(&pending.new_value, updated_at);

        if self.editing_id() == Some(pending.site_id) {
            self.editing = None;
        }
        self.toast = Some(Toast::success("WhatsApp number updated successfully"));
        true
    }

    /// Keep edit mode so the operator can retry
    pub fn apply_save_failed(&mut self) {
        self.toast = Some(Toast::error("Failed to update WhatsApp number"));
    }

    /// Acknowledge a redeploy request. Nothing is deployed.
    pub fn redeploy(&mut self, site_id: Uuid) -> bool {
        let Some(site) = self.find(site_id) else {
            return false;
        };
        let description = format!("Redeploy initiated for {}", site.site_name);
        self.toast = Some(Toast::info("Redeploy Triggered", description));
        true
    }

    /// Take the pending toast so it is shown once
    pub fn take_toast(&mut self) -> Option<Toast> {
        self.toast.take()
    }

    pub fn find(&self, site_id: Uuid) -> Option<&Site> {
        self.sites.iter().find(|s| s.id == site_id)
    }

    #[inline]
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    #[inline]
    pub fn editing(&self) -> Option<&EditState> {
        self.editing.as_ref()
    }

    pub fn editing_id(&self) -> Option<Uuid> {
        self.editing.as_ref().map(|e| e.site_id)
    }

    pub fn is_editing(&self, site_id: Uuid) -> bool {
        self.editing_id() == Some(site_id)
    }

    #[inline]
    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }
}
