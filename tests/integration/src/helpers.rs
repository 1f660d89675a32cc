//! Test helpers for integration tests
//!
//! Provides utilities for spawning the web server and the gateway side by
//! side, and for making HTTP requests against them.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::Duration;

use anyhow::Result;
use multisite_common::AppConfig;
use multisite_gateway::GatewayState;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{LoginRequest, SiteResponse, TokenResponse, TEST_ADMIN_EMAIL, TEST_ADMIN_PASSWORD};

/// Counter for unique test ports
static PORT_COUNTER: AtomicU16 = AtomicU16::new(19100);

/// Get a unique port for testing
pub fn get_test_port() -> u16 {
    PORT_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Web server and gateway running on local ports
pub struct TestServer {
    pub addr: SocketAddr,
    pub gateway_addr: SocketAddr,
    pub client: Client,
    pub gateway: GatewayState,
    _handles: Vec<JoinHandle<()>>,
}

impl TestServer {
    /// Start both servers with the environment's database and Redis
    pub async fn start() -> Result<Self> {
        let web_port = get_test_port();
        let gateway_port = get_test_port();
        let config = test_config(web_port, gateway_port)?;

        let gateway = multisite_gateway::create_gateway_state(config.clone()).await?;
        let gateway_listener = TcpListener::bind(("127.0.0.1", gateway_port)).await?;
        let gateway_addr = gateway_listener.local_addr()?;
        let gateway_app = multisite_gateway::create_app(gateway.clone());
        let gateway_handle = tokio::spawn(async move {
            axum::serve(gateway_listener, gateway_app).await.ok();
        });

        let state = multisite_web::create_app_state(config).await?;
        let listener = TcpListener::bind(("127.0.0.1", web_port)).await?;
        let addr = listener.local_addr()?;
        let app = multisite_web::create_app(state);
        let web_handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .cookie_store(true)
            .build()?;

        Ok(Self {
            addr,
            gateway_addr,
            client,
            gateway,
            _handles: vec![gateway_handle, web_handle],
        })
    }

    /// Get base URL for the web server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Base URL `LiveSiteView` connects to
    pub fn gateway_url(&self) -> String {
        format!("ws://{}", self.gateway_addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).bearer_auth(token).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request with auth token and no body
    pub async fn post_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).bearer_auth(token).send().await?)
    }

    /// Submit an HTML form
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).form(fields).send().await?)
    }

    /// Make a PATCH request with auth token
    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .patch(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Sign in as the seeded admin and return the bearer token
    pub async fn admin_token(&self) -> Result<String> {
        let response = self.post("/api/v1/auth/login", &LoginRequest::admin()).await?;
        let token: TokenResponse = assert_json(response, StatusCode::OK).await?;
        Ok(token.access_token)
    }

    /// Fetch a seeded site by its domain key
    pub async fn site(&self, domain: &str) -> Result<SiteResponse> {
        let response = self.get(&format!("/api/v1/sites/by-domain/{domain}")).await?;
        assert_json(response, StatusCode::OK).await
    }
}

/// Create a test configuration
///
/// Database and Redis come from the environment; everything else is pinned
/// so servers started by parallel tests do not collide.
pub fn test_config(web_port: u16, gateway_port: u16) -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let overrides: HashMap<&str, String> = HashMap::from([
        ("WEB_HOST", "127.0.0.1".to_string()),
        ("WEB_PORT", web_port.to_string()),
        ("GATEWAY_HOST", "127.0.0.1".to_string()),
        ("GATEWAY_PORT", gateway_port.to_string()),
        ("GATEWAY_PUBLIC_URL", format!("ws://127.0.0.1:{gateway_port}")),
        (
            "DATABASE_MIGRATIONS_DIR",
            concat!(env!("CARGO_MANIFEST_DIR"), "/../../migrations").to_string(),
        ),
        ("ADMIN_EMAIL", TEST_ADMIN_EMAIL.to_string()),
        ("ADMIN_PASSWORD", TEST_ADMIN_PASSWORD.to_string()),
        ("RATE_LIMIT_RPS", "1000".to_string()),
        ("RATE_LIMIT_BURST", "1000".to_string()),
    ]);

    let config = AppConfig::from_lookup(|key| {
        overrides
            .get(key)
            .cloned()
            .or_else(|| std::env::var(key).ok())
            .or_else(|| (key == "JWT_SECRET").then(|| "integration-test-secret-0123456789".to_string()))
    })
    .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

    Ok(config)
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    if std::env::var("REDIS_URL").is_err() {
        eprintln!("Skipping test: REDIS_URL not set");
        return false;
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status and return the body text
pub async fn assert_text(response: Response, expected_status: StatusCode) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;
    if status != expected_status {
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(body)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    assert_text(response, expected_status).await.map(|_| ())
}
