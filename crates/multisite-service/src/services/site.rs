//! Site service
//!
//! Reads sites for the public pages and the dashboard, applies contact number
//! edits and announces them to the realtime gateway.

use multisite_core::traits::ContactNumberChange;
use multisite_core::{ContactNumber, Site, SiteChangeLog, SiteEvent, SiteUpdatedEvent};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::RedeployResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Change log page size when the caller gives none
pub const DEFAULT_CHANGE_LOG_LIMIT: i64 = 50;
/// Largest change log page a caller may ask for
pub const MAX_CHANGE_LOG_LIMIT: i64 = 100;

/// Site service
pub struct SiteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SiteService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Look up the site behind a domain key
    #[instrument(skip(self))]
    pub async fn find_by_domain(&self, domain: &str) -> ServiceResult<Option<Site>> {
        Ok(self.ctx.site_repo().find_by_domain(domain).await?)
    }

    /// Same as [`Self::find_by_domain`] but a missing site is an error
    pub async fn get_by_domain(&self, domain: &str) -> ServiceResult<Site> {
        self.find_by_domain(domain)
            .await?
            .ok_or_else(|| ServiceError::not_found("Site", domain))
    }

    #[instrument(skip(self))]
    pub async fn get_site(&self, site_id: Uuid) -> ServiceResult<Site> {
        self.ctx
            .site_repo()
            .find_by_id(site_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Site", site_id.to_string()))
    }

    /// All sites ordered by name
    #[instrument(skip(self))]
    pub async fn list_sites(&self) -> ServiceResult<Vec<Site>> {
        Ok(self.ctx.site_repo().list_ordered_by_name().await?)
    }

    /// Replace a site's contact number and record the change.
    ///
    /// The update and its change log are written atomically. Viewers of the
    /// site are notified afterwards; a failed notification is logged and
    /// does not fail the save.
    #[instrument(skip(self, raw_number))]
    pub async fn update_contact_number(
        &self,
        site_id: Uuid,
        admin_id: Uuid,
        raw_number: &str,
    ) -> ServiceResult<(Site, SiteChangeLog)> {
        let new_number = ContactNumber::parse(raw_number)?;
        let change = ContactNumberChange {
            site_id,
            admin_user_id: admin_id,
            new_number,
        };

        let (site, log) = self.ctx.site_repo().update_contact_number(&change).await?;

        info!(
            site_id = %site.id,
            domain = %site.domain,
            change_log_id = %log.id,
            "Contact number updated"
        );

        self.publish_site_update(&site).await;

        Ok((site, log))
    }

    /// Acknowledge a redeploy request. Nothing is rebuilt.
    #[instrument(skip(self))]
    pub async fn redeploy(&self, site_id: Uuid) -> ServiceResult<RedeployResponse> {
        let site = self.get_site(site_id).await?;
        info!(domain = %site.domain, "Redeploy requested");
        Ok(RedeployResponse::acknowledged(&site))
    }

    /// Change history of a site, newest first
    #[instrument(skip(self))]
    pub async fn list_change_logs(
        &self,
        site_id: Uuid,
        limit: Option<i64>,
    ) -> ServiceResult<Vec<SiteChangeLog>> {
        // 404 for unknown sites rather than an empty list
        self.get_site(site_id).await?;

        let limit = limit
            .unwrap_or(DEFAULT_CHANGE_LOG_LIMIT)
            .clamp(1, MAX_CHANGE_LOG_LIMIT);
        Ok(self.ctx.change_log_repo().list_for_site(site_id, limit).await?)
    }

    async fn publish_site_update(&self, site: &Site) {
        let event = SiteEvent::from(SiteUpdatedEvent::from_site(site));
        match self.ctx.publisher().publish_site_event(&event).await {
            Ok(receivers) => {
                tracing::debug!(domain = %site.domain, receivers, "SITE_UPDATE published");
            }
            Err(e) => {
                warn!(domain = %site.domain, error = %e, "Failed to publish SITE_UPDATE");
            }
        }
    }
}
