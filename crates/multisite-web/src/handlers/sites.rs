//! Site handlers
//!
//! Listing, lookup by domain, contact number edits, change history and the
//! redeploy stub.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use multisite_service::dto::{
    ChangeLogQuery, ChangeLogResponse, ContactUpdateResponse, RedeployResponse,
    SiteResponse, UpdateContactRequest,
};
use multisite_service::SiteService;

use crate::extractors::{AuthAdmin, SiteIdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// List all sites ordered by name
///
/// GET /sites
pub async fn list_sites(
    State(state): State<AppState>,
    _admin: AuthAdmin,
) -> ApiResult<Json<Vec<SiteResponse>>> {
    let sites = SiteService::new(state.service_context()).list_sites().await?;
    Ok(Json(sites.into_iter().map(SiteResponse::from).collect()))
}

/// Public lookup used by the site pages
///
/// GET /sites/by-domain/:domain
pub async fn get_site_by_domain(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> ApiResult<Json<SiteResponse>> {
    let site = SiteService::new(state.service_context())
        .get_by_domain(&domain)
        .await?;
    Ok(Json(SiteResponse::from(site)))
}

/// Replace a site's contact number
///
/// PATCH /sites/:site_id/contact
pub async fn update_contact(
    State(state): State<AppState>,
    admin: AuthAdmin,
    SiteIdPath(site_id): SiteIdPath,
    ValidatedJson(request): ValidatedJson<UpdateContactRequest>,
) -> ApiResult<Json<ContactUpdateResponse>> {
    let updated = SiteService::new(state.service_context())
        .update_contact_number(site_id, admin.admin_id, &request.whatsapp_number)
        .await?;
    Ok(Json(ContactUpdateResponse::from(updated)))
}

/// Acknowledge a redeploy request
///
/// POST /sites/:site_id/redeploy
pub async fn redeploy(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    SiteIdPath(site_id): SiteIdPath,
) -> ApiResult<Json<RedeployResponse>> {
    let response = SiteService::new(state.service_context())
        .redeploy(site_id)
        .await?;
    Ok(Json(response))
}

/// Change history, newest first
///
/// GET /sites/:site_id/change-logs
pub async fn list_change_logs(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    SiteIdPath(site_id): SiteIdPath,
    Query(query): Query<ChangeLogQuery>,
) -> ApiResult<Json<Vec<ChangeLogResponse>>> {
    let logs = SiteService::new(state.service_context())
        .list_change_logs(site_id, query.limit)
        .await?;
    Ok(Json(logs.into_iter().map(ChangeLogResponse::from).collect()))
}
