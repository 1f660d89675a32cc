//! Gateway server setup
//!
//! Provides the WebSocket server routes, state wiring and runner.

mod handler;
mod state;

pub use handler::{realtime_handler, RealtimeQuery};
pub use state::{GatewaySettings, GatewayState, DEFAULT_HEARTBEAT_INTERVAL, DEFAULT_HEARTBEAT_TIMEOUT};

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use multisite_cache::RedisPool;
use multisite_common::{AppConfig, AppError};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::broadcast::{EventDispatcher, EventDispatcherConfig};
use crate::connection::ConnectionManager;

/// Create the gateway router
pub fn create_router() -> Router<GatewayState> {
    Router::new()
        .route("/realtime", get(realtime_handler))
        .route("/health", get(health_check))
}

/// Health check endpoint
async fn health_check(State(state): State<GatewayState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "connections": state.connection_manager().connection_count(),
        "domains": state.connection_manager().domain_count(),
    }))
}

/// Build the complete application
pub fn create_app(state: GatewayState) -> Router {
    create_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize all dependencies and create `GatewayState`
pub async fn create_gateway_state(config: AppConfig) -> Result<GatewayState, AppError> {
    create_gateway_state_with(config, GatewaySettings::default()).await
}

/// Same as [`create_gateway_state`] with explicit socket timing
pub async fn create_gateway_state_with(
    config: AppConfig,
    settings: GatewaySettings,
) -> Result<GatewayState, AppError> {
    let redis_pool = RedisPool::from_config(&config.redis)
        .map_err(|e| AppError::Cache(e.to_string()))?;
    if let Err(e) = redis_pool.health_check().await {
        // The subscriber keeps retrying in the background
        tracing::warn!(error = %e, "Redis is not reachable, pages will not receive updates until it is");
    }

    let (connection_manager, interests) = ConnectionManager::new_shared();

    let dispatcher_config = EventDispatcherConfig {
        redis_url: config.redis.url.clone(),
        ..EventDispatcherConfig::default()
    };
    let event_dispatcher = EventDispatcher::new(dispatcher_config, Arc::clone(&connection_manager))
        .await
        .map_err(|e| AppError::Cache(format!("Failed to create event dispatcher: {e}")))?;
    let event_dispatcher = Arc::new(event_dispatcher);
    Arc::clone(&event_dispatcher).start(interests);

    Ok(GatewayState::new(
        connection_manager,
        event_dispatcher,
        config,
        settings,
    ))
}

/// Run the gateway server until ctrl-c
pub async fn run_server(app: Router, address: &str) -> Result<(), AppError> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {address}: {e}")))?;

    tracing::info!("Gateway listening on ws://{address}/realtime");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    tracing::info!("Gateway stopped");
    Ok(())
}

/// Run the complete gateway server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let address = config.gateway.server.address();
    let state = create_gateway_state(config).await?;
    let dispatcher = Arc::clone(state.event_dispatcher());
    let result = run_server(create_app(state), &address).await;
    dispatcher.stop().await;
    result
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
