//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, assert_text, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use uuid::Uuid;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
    assert_eq!(body["checks"]["redis"], "healthy");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post("/api/v1/auth/login", &LoginRequest::admin())
        .await
        .unwrap();
    let token: TokenResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(!token.access_token.is_empty());
    assert_eq!(token.token_type, "Bearer");
    assert!(token.expires_in > 0);
}

#[tokio::test]
async fn test_login_wrong_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = LoginRequest {
        email: TEST_ADMIN_EMAIL.to_string(),
        password: "WrongPassword123".to_string(),
    };

    let response = server.post("/api/v1/auth/login", &request).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_login_form_opens_dashboard() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post_form(
            "/login",
            &[("email", TEST_ADMIN_EMAIL), ("password", TEST_ADMIN_PASSWORD)],
        )
        .await
        .unwrap();

    // The redirect to /admin is followed with the session cookie
    assert_eq!(response.url().path(), "/admin");
    let html = assert_text(response, StatusCode::OK).await.unwrap();
    assert!(html.contains("site1.example.com"));
    assert!(html.contains("site10.example.com"));
}

// ============================================================================
// Site Tests
// ============================================================================

#[tokio::test]
async fn test_list_sites_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/sites").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn test_list_sites_ordered_by_name() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();

    let response = server.get_auth("/api/v1/sites", &token).await.unwrap();
    let sites: Vec<SiteResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(sites.len() >= 10);
    let names: Vec<&str> = sites.iter().map(|s| s.site_name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}

#[tokio::test]
async fn test_get_site_by_domain() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let site = server.site("site1.example.com").await.unwrap();

    assert_eq!(site.domain, "site1.example.com");
    assert!(site.whatsapp_link.starts_with("https://wa.me/"));
}

#[tokio::test]
async fn test_get_unknown_domain() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get("/api/v1/sites/by-domain/nowhere.example.org")
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_update_contact_writes_change_log() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();
    let before = server.site("site7.example.com").await.unwrap();
    let number = unique_number();

    let response = server
        .patch_auth(
            &format!("/api/v1/sites/{}/contact", before.id),
            &token,
            &UpdateContactRequest {
                whatsapp_number: number.clone(),
            },
        )
        .await
        .unwrap();
    let updated: ContactUpdateResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(updated.site.whatsapp_number, number);
    assert_eq!(updated.change_log.site_id, before.id);
    assert_eq!(updated.change_log.change_type, "whatsapp_update");
    assert_eq!(updated.change_log.new_value.as_deref(), Some(number.as_str()));
    assert!(updated.change_log.admin_user_id.is_some());

    let response = server
        .get_auth(
            &format!("/api/v1/sites/{}/change-logs?limit=5", before.id),
            &token,
        )
        .await
        .unwrap();
    let logs: Vec<ChangeLogResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(logs.iter().any(|log| log.id == updated.change_log.id));
    assert!(logs.len() <= 5);

    let after = server.site("site7.example.com").await.unwrap();
    assert_eq!(after.whatsapp_number, number);
}

#[tokio::test]
async fn test_update_contact_rejects_blank_number() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();
    let site = server.site("site2.example.com").await.unwrap();

    let response = server
        .patch_auth(
            &format!("/api/v1/sites/{}/contact", site.id),
            &token,
            &UpdateContactRequest {
                whatsapp_number: "   ".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let unchanged = server.site("site2.example.com").await.unwrap();
    assert_eq!(unchanged.whatsapp_number, site.whatsapp_number);
}

#[tokio::test]
async fn test_update_contact_unknown_site() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();

    let response = server
        .patch_auth(
            &format!("/api/v1/sites/{}/contact", Uuid::new_v4()),
            &token,
            &UpdateContactRequest {
                whatsapp_number: unique_number(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_redeploy_is_acknowledged() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();
    let site = server.site("site4.example.com").await.unwrap();

    let response = server
        .post_auth(&format!("/api/v1/sites/{}/redeploy", site.id), &token)
        .await
        .unwrap();
    let body: RedeployResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body.site_id, site.id);
    assert!(body.message.contains(&site.site_name));
}

// ============================================================================
// Public Page Tests
// ============================================================================

#[tokio::test]
async fn test_public_page_shows_stored_values() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let site = server.site("site1.example.com").await.unwrap();

    let response = server.get("/site1").await.unwrap();
    let html = assert_text(response, StatusCode::OK).await.unwrap();

    assert!(html.contains(&site.site_name));
    assert!(html.contains(&site.whatsapp_link));
    assert!(html.contains(&format!(
        "ws://{}/realtime?domain=site1.example.com",
        server.gateway_addr
    )));
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/site11").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}
