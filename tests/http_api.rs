//! HTTP trigger surface tests: function-key auth, outcome mapping, event
//! batches, health.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use rotavault::api::{build_router, ApiState, FunctionKey};
use rotavault::rotation::{RetirementPolicy, Rotator};

use common::{record_expiring_in, request, FakeDirectory, FakeVault};

const KEY: &str = "rotation-key";

fn key_header() -> (HeaderName, HeaderValue) {
    (HeaderName::from_static("x-functions-key"), HeaderValue::from_static(KEY))
}

fn server_with(
    directory: Arc<FakeDirectory>,
    vault: Arc<FakeVault>,
    policy: RetirementPolicy,
) -> TestServer {
    let rotator = Arc::new(Rotator::new(directory, vault.clone()));
    let state = ApiState { rotator, request: Arc::new(request(policy)), vault };
    let router = build_router(state, Arc::new(FunctionKey::new(KEY)));
    TestServer::new(router).expect("test server")
}

fn default_server() -> (Arc<FakeDirectory>, Arc<FakeVault>, TestServer) {
    let directory = Arc::new(FakeDirectory::default());
    let vault = Arc::new(FakeVault::default());
    let server = server_with(directory.clone(), vault.clone(), RetirementPolicy::CreateOnly);
    (directory, vault, server)
}

#[tokio::test]
async fn rotate_without_function_key_is_unauthorized() {
    let (_, vault, server) = default_server();

    let response = server.post("/rotate").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(vault.put_count(), 0);
}

#[tokio::test]
async fn rotate_with_wrong_function_key_is_unauthorized() {
    let (_, vault, server) = default_server();

    let (name, _) = key_header();
    let response =
        server.post("/rotate").add_header(name, HeaderValue::from_static("wrong-key")).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(vault.put_count(), 0);
}

#[tokio::test]
async fn rotate_with_header_key_succeeds() {
    let (_, vault, server) = default_server();

    let (name, value) = key_header();
    let response = server.post("/rotate").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["outcome"]["persistence"]["status"], "completed");
    assert_eq!(body["outcome"]["retirement"]["status"], "skipped");
    assert_eq!(vault.put_count(), 1);
}

#[tokio::test]
async fn rotate_with_query_code_succeeds() {
    let (_, _, server) = default_server();

    let response = server.get("/rotate").add_query_param("code", KEY).await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn failed_issuance_maps_to_bad_gateway() {
    let directory = Arc::new(FakeDirectory::default());
    directory.fail_create.store(true, Ordering::SeqCst);
    let vault = Arc::new(FakeVault::default());
    let server = server_with(directory, vault.clone(), RetirementPolicy::CreateOnly);

    let (name, value) = key_header();
    let response = server.post("/rotate").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);

    let body: Value = response.json();
    assert_eq!(body["outcome"]["issuance"]["status"], "failed");
    assert_eq!(vault.put_count(), 0);
}

#[tokio::test]
async fn degraded_rotation_is_still_ok() {
    let directory = Arc::new(FakeDirectory::with_records(vec![record_expiring_in("key-a", 5)]));
    directory.fail_delete.store(true, Ordering::SeqCst);
    let vault = Arc::new(FakeVault::default());
    let server = server_with(directory, vault.clone(), RetirementPolicy::RetireOldestFirst);

    let (name, value) = key_header();
    let response = server.post("/rotate").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["outcome"]["retirement"]["status"], "failed");
    assert_eq!(body["outcome"]["persistence"]["status"], "completed");
    assert_eq!(vault.put_count(), 1);
}

#[tokio::test]
async fn event_batch_is_acknowledged_with_per_event_results() {
    let (_, vault, server) = default_server();

    let batch = json!([
        {
            "id": "event-1",
            "eventType": "Vendor.KeyVault.SecretExpired",
            "subject": "entraSecret",
            "eventTime": "2026-08-01T00:00:00Z",
            "data": {"ObjectName": "entraSecret"}
        },
        42,
        {
            "id": "event-2",
            "eventType": "Vendor.KeyVault.SecretNewVersionCreated",
            "subject": "entraSecret",
            "eventTime": "2026-08-01T00:00:00Z"
        }
    ]);

    let (name, value) = key_header();
    let response = server.post("/events").add_header(name, value).json(&batch).await;

    // The batch is acknowledged as a whole even though one entry is garbage.
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["received"], 3);
    assert_eq!(body["rotated"], 1);
    assert_eq!(body["malformed"], 1);
    assert_eq!(body["ignored"], 1);
    assert_eq!(body["failed"], 0);

    // Exactly one rotation ran for the well-formed expiry event.
    assert_eq!(vault.put_count(), 1);
}

#[tokio::test]
async fn events_without_function_key_are_unauthorized() {
    let (_, vault, server) = default_server();

    let response = server.post("/events").json(&json!([])).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(vault.put_count(), 0);
}

#[tokio::test]
async fn health_reports_vault_state() {
    let (_, vault, server) = default_server();

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    vault.fail_health.store(true, Ordering::SeqCst);
    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}
