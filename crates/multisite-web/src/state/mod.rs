//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! the configuration and the per-session dashboard views.

use std::sync::Arc;

use chrono::Utc;
use dashmap::mapref::one::RefMut;
use dashmap::DashMap;
use multisite_common::{AppConfig, JwtService};
use multisite_core::DashboardView;
use multisite_service::ServiceContext;

/// Dashboard view of one login session
#[derive(Debug, Clone)]
pub struct SessionDashboard {
    pub view: DashboardView,
    /// `exp` of the session token, Unix seconds
    pub expires_at: i64,
}

impl SessionDashboard {
    fn is_expired(&self, now: i64) -> bool {
        self.expires_at < now
    }
}

/// Dashboard views keyed by login session id.
///
/// Entries outlive their token only until the next view is stored; every
/// store sweeps the expired ones.
#[derive(Debug, Default)]
pub struct DashboardSessions {
    views: DashMap<String, SessionDashboard>,
}

impl DashboardSessions {
    /// Replace the session's view
    pub fn store(&self, session_id: &str, expires_at: i64, view: DashboardView) {
        self.evict_expired(Utc::now().timestamp());
        self.views
            .insert(session_id.to_string(), SessionDashboard { view, expires_at });
    }

    /// Store `view` unless the session already has one
    pub fn store_if_absent(&self, session_id: &str, expires_at: i64, view: DashboardView) {
        self.evict_expired(Utc::now().timestamp());
        self.views
            .entry(session_id.to_string())
            .or_insert(SessionDashboard { view, expires_at });
    }

    /// Drop every view whose token expired before `now`
    pub fn evict_expired(&self, now: i64) -> usize {
        let before = self.views.len();
        self.views.retain(|_, session| !session.is_expired(now));
        let evicted = before.saturating_sub(self.views.len());
        if evicted > 0 {
            tracing::debug!(evicted, "Dropped dashboards of expired sessions");
        }
        evicted
    }

    pub fn get_mut(&self, session_id: &str) -> Option<RefMut<'_, String, SessionDashboard>> {
        self.views.get_mut(session_id)
    }

    /// Copy of the session's current view
    pub fn view(&self, session_id: &str) -> Option<DashboardView> {
        self.views.get(session_id).map(|s| s.view.clone())
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.views.contains_key(session_id)
    }

    pub fn remove(&self, session_id: &str) -> bool {
        self.views.remove(session_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    config: Arc<AppConfig>,
    dashboards: Arc<DashboardSessions>,
}

impl AppState {
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            dashboards: Arc::new(DashboardSessions::default()),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the JWT service from the service context
    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }

    /// Dashboard view of every signed-in session
    pub fn dashboards(&self) -> &DashboardSessions {
        &self.dashboards
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .field("dashboards", &self.dashboards.len())
            .finish()
    }
}
