//! Gateway state
//!
//! Application state for the gateway server.

use std::sync::Arc;
use std::time::Duration;

use multisite_common::AppConfig;

use crate::broadcast::EventDispatcher;
use crate::connection::ConnectionManager;

/// Default heartbeat interval announced in Hello
pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(45);

/// Default silence after which a page is considered gone
pub const DEFAULT_HEARTBEAT_TIMEOUT: Duration = Duration::from_secs(90);

/// Socket timing used by every connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewaySettings {
    pub heartbeat_interval: Duration,
    pub heartbeat_timeout: Duration,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            heartbeat_interval: DEFAULT_HEARTBEAT_INTERVAL,
            heartbeat_timeout: DEFAULT_HEARTBEAT_TIMEOUT,
        }
    }
}

/// Gateway application state
///
/// Holds all shared dependencies for the gateway server.
#[derive(Clone)]
pub struct GatewayState {
    /// Open sockets grouped by domain
    connection_manager: Arc<ConnectionManager>,
    /// Redis Pub/Sub fan-out
    event_dispatcher: Arc<EventDispatcher>,
    config: Arc<AppConfig>,
    settings: GatewaySettings,
}

impl GatewayState {
    /// Create a new gateway state
    pub fn new(
        connection_manager: Arc<ConnectionManager>,
        event_dispatcher: Arc<EventDispatcher>,
        config: AppConfig,
        settings: GatewaySettings,
    ) -> Self {
        Self {
            connection_manager,
            event_dispatcher,
            config: Arc::new(config),
            settings,
        }
    }

    /// Get the connection manager
    pub fn connection_manager(&self) -> &Arc<ConnectionManager> {
        &self.connection_manager
    }

    /// Get the event dispatcher
    pub fn event_dispatcher(&self) -> &Arc<EventDispatcher> {
        &self.event_dispatcher
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn settings(&self) -> GatewaySettings {
        self.settings
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("connection_manager", &self.connection_manager)
            .field("settings", &self.settings)
            .finish()
    }
}
