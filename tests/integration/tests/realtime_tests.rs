//! Realtime Integration Tests
//!
//! A contact edit through the API reaches a connected page through Redis
//! and the gateway. Requires DATABASE_URL and REDIS_URL.
//!
//! Run with: cargo test -p integration-tests --test realtime_tests

use std::time::Duration;

use integration_tests::{assert_json, check_test_env, fixtures::*, TestServer};
use multisite_core::{PublicPageView, SiteSlot};
use multisite_gateway::LiveSiteView;
use reqwest::StatusCode;

async fn wait_for_subscription(server: &TestServer, domain: &str) -> bool {
    for _ in 0..100 {
        if server.gateway.event_dispatcher().is_subscribed(domain).await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    false
}

#[tokio::test]
async fn test_contact_edit_reaches_live_page() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let slot = *SiteSlot::by_path("/site8").unwrap();

    let live = LiveSiteView::connect(&server.gateway_url(), PublicPageView::mount(slot))
        .await
        .expect("connect to gateway");
    assert!(wait_for_subscription(&server, slot.domain).await);

    let mut changes = live.subscribe();
    let token = server.admin_token().await.unwrap();
    let site = server.site(slot.domain).await.unwrap();
    let number = unique_number();

    let response = server
        .patch_auth(
            &format!("/api/v1/sites/{}/contact", site.id),
            &token,
            &UpdateContactRequest {
                whatsapp_number: number.clone(),
            },
        )
        .await
        .unwrap();
    let _: ContactUpdateResponse = assert_json(response, StatusCode::OK).await.unwrap();

    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if changes.borrow_and_update().display().whatsapp_number == number {
                break;
            }
            changes.changed().await.expect("live view closed");
        }
    })
    .await
    .expect("update did not arrive");

    assert_eq!(live.view().display().site_name, site.site_name);
}

#[tokio::test]
async fn test_last_page_leaving_unsubscribes() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let slot = *SiteSlot::by_path("/site10").unwrap();

    let live = LiveSiteView::connect(&server.gateway_url(), PublicPageView::mount(slot))
        .await
        .expect("connect to gateway");
    assert!(wait_for_subscription(&server, slot.domain).await);

    drop(live);

    let mut released = false;
    for _ in 0..100 {
        if !server.gateway.event_dispatcher().is_subscribed(slot.domain).await {
            released = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(released);
    assert_eq!(server.gateway.connection_manager().connection_count(), 0);
}
