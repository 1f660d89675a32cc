//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use multisite_core::Site;
use serde::Serialize;
use uuid::Uuid;

// ============================================================================
// Site Responses
// ============================================================================

/// Site record as served to the dashboard and public clients
#[derive(Debug, Clone, Serialize)]
pub struct SiteResponse {
    pub id: Uuid,
    pub domain: String,
    pub site_name: String,
    pub whatsapp_number: String,
    /// `https://wa.me/<digits>`
    pub whatsapp_link: String,
    pub is_active: bool,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One change history entry
#[derive(Debug, Clone, Serialize)]
pub struct ChangeLogResponse {
    pub id: Uuid,
    pub site_id: Uuid,
    pub admin_user_id: Option<Uuid>,
    pub change_type: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Result of a contact number edit
#[derive(Debug, Clone, Serialize)]
pub struct ContactUpdateResponse {
    pub site: SiteResponse,
    pub change_log: ChangeLogResponse,
}

/// Acknowledgement of the redeploy stub
#[derive(Debug, Clone, Serialize)]
pub struct RedeployResponse {
    pub status: &'static str,
    pub site_id: Uuid,
    pub message: String,
}

impl RedeployResponse {
    pub fn acknowledged(site: &Site) -> Self {
        Self {
            status: "acknowledged",
            site_id: site.id,
            message: format!("Redeploy initiated for {}", site.site_name),
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

fn health_label(healthy: bool) -> String {
    let label = if healthy { "healthy" } else { "unhealthy" };
    label.to_string()
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, redis_healthy: bool) -> Self {
        let all_healthy = database_healthy && redis_healthy;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: health_label(database_healthy),
                redis: health_label(redis_healthy),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
