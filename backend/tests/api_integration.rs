//! Integration tests for linedesk backend API endpoints.
//!
//! Tests the full HTTP API: connections, selection, reminders,
//! notifications, activity log and theme.

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use linedesk_backend::{build_router, clock::FixedClock, config::Config, AppState, Store};
use serde_json::{json, Value};
use std::sync::Arc;

fn test_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 10)
        .unwrap()
        .and_hms_opt(14, 30, 0)
        .unwrap()
}

fn test_config() -> Config {
    let mut config = Config::default();
    config.seed_demo_data = false;
    config.notification_display = std::time::Duration::from_secs(8);
    config
}

/// Build test server around a store on a fixed clock
fn build_test_server() -> (TestServer, Arc<Store>, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(test_now()));
    let store = Arc::new(Store::with_clock(&test_config(), clock.clone()));
    let app = build_router(AppState::new(store.clone()));
    (TestServer::new(app).unwrap(), store, clock)
}

/// Date `days` from the test clock's today, as the form sends it
fn day(days: i64) -> String {
    (test_now().date() + Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

fn connection_form(number: &str, due_in: i64, expiry_in: i64) -> Value {
    json!({
        "connection_number": number,
        "status": "Active",
        "balance": 15.5,
        "data_remaining_mb": 65536,
        "data_total_mb": 102400,
        "start_date": day(-30),
        "due_date": day(due_in),
        "expiry_date": day(expiry_in)
    })
}

async fn add(server: &TestServer, form: Value) -> String {
    let response = server.post("/v1/connections").json(&form).await;
    response.assert_status_ok();
    let body: Value = response.json();
    body["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Health Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (server, _, _) = build_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

// =============================================================================
// Connection Tests
// =============================================================================

#[tokio::test]
async fn test_add_connection_then_selected() {
    let (server, _, _) = build_test_server();

    let response = server
        .post("/v1/connections")
        .json(&json!({
            "connection_number": "0399-0000000",
            "balance": 10,
            "data_remaining_mb": 1000,
            "data_total_mb": 2000,
            "start_date": "2024-01-01",
            "due_date": "2024-02-01",
            "expiry_date": "2024-03-01"
        }))
        .await;
    response.assert_status_ok();
    let id = response.json::<Value>()["id"].as_str().unwrap().to_string();

    let list: Value = server.get("/v1/connections").await.json();
    let connections = list["connections"].as_array().unwrap();
    assert_eq!(connections.len(), 1);
    assert_eq!(connections[0]["id"], id);
    assert_eq!(connections[0]["status"], "Active");
    assert_eq!(connections[0]["usage_percentage"], 50.0);

    let selection: Value = server.get("/v1/selection").await.json();
    assert_eq!(selection["connection"]["id"], id);
    assert_eq!(selection["connection"]["due_date"], "2024-02-01");
}

#[tokio::test]
async fn test_list_keeps_insertion_order() {
    let (server, _, _) = build_test_server();
    let a = add(&server, connection_form("a", 20, 40)).await;
    let b = add(&server, connection_form("b", 20, 40)).await;
    let c = add(&server, connection_form("c", 20, 40)).await;

    let list: Value = server.get("/v1/connections").await.json();
    let ids: Vec<&str> = list["connections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![a.as_str(), b.as_str(), c.as_str()]);
}

#[tokio::test]
async fn test_add_connection_invalid_date() {
    let (server, _, _) = build_test_server();

    let mut form = connection_form("0399-0000000", 20, 40);
    form["due_date"] = json!("next tuesday");

    let response = server.post("/v1/connections").json(&form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");

    let list: Value = server.get("/v1/connections").await.json();
    assert!(list["connections"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_add_connection_numbers_as_text() {
    let (server, _, _) = build_test_server();

    let mut form = connection_form("0399-0000000", 20, 40);
    form["balance"] = json!("10");
    form["data_remaining_mb"] = json!("1000");
    form["data_total_mb"] = json!("2000");
    add(&server, form).await;

    let selection: Value = server.get("/v1/selection").await.json();
    assert_eq!(selection["connection"]["balance"], 10.0);
    assert_eq!(selection["connection"]["data_remaining_mb"], 1000);
    assert_eq!(selection["connection"]["usage_percentage"], 50.0);
}

#[tokio::test]
async fn test_malformed_body_uses_error_shape() {
    let (server, _, _) = build_test_server();

    let mut form = connection_form("0399-0000000", 20, 40);
    form["balance"] = json!("ten");
    let response = server.post("/v1/connections").json(&form).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "INVALID_INPUT");

    let response = server
        .post("/v1/reminders")
        .json(&json!({ "contact": "a@b.com" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(body["error"].as_str().unwrap().starts_with("malformed request body"));
}

#[tokio::test]
async fn test_update_connection_replaces_record() {
    let (server, _, _) = build_test_server();
    let id = add(&server, connection_form("0312-3456789", 20, 40)).await;

    let mut form = connection_form("0312-3456789", 20, 40);
    form["balance"] = json!(42.25);
    form["status"] = json!("Inactive");

    let response = server
        .put(&format!("/v1/connections/{id}"))
        .json(&form)
        .await;
    response.assert_status_ok();

    let selection: Value = server.get("/v1/selection").await.json();
    assert_eq!(selection["connection"]["balance"], 42.25);
    assert_eq!(selection["connection"]["status"], "Inactive");
}

#[tokio::test]
async fn test_update_unknown_connection() {
    let (server, _, _) = build_test_server();
    add(&server, connection_form("a", 20, 40)).await;

    let response = server
        .put("/v1/connections/9a1f4a8e-0d2b-4c41-9b8a-2f0a1d8e7c55")
        .json(&connection_form("ghost", 1, 1))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["code"], "CONNECTION_NOT_FOUND");

    let response = server
        .put("/v1/connections/conn1")
        .json(&connection_form("ghost", 1, 1))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let list: Value = server.get("/v1/connections").await.json();
    assert_eq!(list["connections"].as_array().unwrap().len(), 1);
}

// =============================================================================
// Selection Tests
// =============================================================================

#[tokio::test]
async fn test_select_nonexistent_falls_back_to_first() {
    let (server, _, _) = build_test_server();
    let first = add(&server, connection_form("first", 20, 40)).await;
    add(&server, connection_form("second", 20, 40)).await;

    for bogus in ["0b5f7b4e-5a43-4f0e-8f87-6a1f7d2c9e10", "conn999", ""] {
        let response = server
            .post("/v1/selection")
            .json(&json!({ "connection_id": bogus }))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["connection"]["id"], first);
    }
}

#[tokio::test]
async fn test_selection_on_empty_registry() {
    let (server, _, _) = build_test_server();

    let response = server.get("/v1/selection").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["code"], "NO_CONNECTIONS");
}

// =============================================================================
// Notification Tests
// =============================================================================

#[tokio::test]
async fn test_selection_raises_advisory() {
    let (server, _, _) = build_test_server();
    let due_soon = add(&server, connection_form("0312-3456789", 2, 1)).await;
    let quiet = add(&server, connection_form("0333-1122334", 15, 45)).await;

    server
        .post("/v1/selection")
        .json(&json!({ "connection_id": due_soon }))
        .await
        .assert_status_ok();

    let body: Value = server.get("/v1/notification").await.json();
    assert_eq!(body["notification"]["kind"], "advisory");
    assert_eq!(
        body["notification"]["message"],
        "Reminder: Your bill of $15.50 is due in 2 day(s) for 0312-3456789."
    );

    server
        .post("/v1/selection")
        .json(&json!({ "connection_id": quiet }))
        .await
        .assert_status_ok();

    let body: Value = server.get("/v1/notification").await.json();
    assert!(body["notification"].is_null());
}

#[tokio::test]
async fn test_notification_expires_and_dismisses() {
    let (server, _, clock) = build_test_server();
    add(&server, connection_form("0312-3456789", 10, 3)).await;

    let body: Value = server.get("/v1/notification").await.json();
    assert_eq!(
        body["notification"]["message"],
        "Warning: Your data plan for 0312-3456789 expires in 3 day(s)."
    );

    clock.advance(Duration::seconds(8));
    let body: Value = server.get("/v1/notification").await.json();
    assert!(body["notification"].is_null());

    clock.set(test_now());
    let body: Value = server.delete("/v1/notification").await.json();
    assert_eq!(body["dismissed"], true);
    let body: Value = server.get("/v1/notification").await.json();
    assert!(body["notification"].is_null());

    let body: Value = server.delete("/v1/notification").await.json();
    assert_eq!(body["dismissed"], false);
}

// =============================================================================
// Reminder Tests
// =============================================================================

#[tokio::test]
async fn test_save_reminder_confirms() {
    let (server, _, _) = build_test_server();
    let id = add(&server, connection_form("0300-9876543", 20, 40)).await;

    let response = server
        .post("/v1/reminders")
        .json(&json!({
            "connection_id": id,
            "contact": "+1234567890",
            "method": "SMS"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["notification"]["kind"], "confirmation");
    assert_eq!(
        body["notification"]["message"],
        "Success! Reminders for 0300-9876543 will be sent to +1234567890 via SMS."
    );

    let current: Value = server.get("/v1/notification").await.json();
    assert_eq!(current["notification"]["kind"], "confirmation");
}

#[tokio::test]
async fn test_save_reminder_rejects_blank_contact() {
    let (server, store, _) = build_test_server();
    let id = add(&server, connection_form("0300-9876543", -1, 40)).await;

    let response = server
        .post("/v1/reminders")
        .json(&json!({ "connection_id": id, "contact": "   ", "method": "Email" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "INVALID_INPUT");

    // Nothing registered, so the scan has nothing to log
    assert!(store.run_overdue_scan().await.is_empty());
}

#[tokio::test]
async fn test_save_reminder_invalid_connection_id() {
    let (server, _, _) = build_test_server();

    let response = server
        .post("/v1/reminders")
        .json(&json!({ "connection_id": "conn1", "contact": "a@b.com", "method": "Email" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

// =============================================================================
// Activity Log Tests
// =============================================================================

#[tokio::test]
async fn test_overdue_scan_logs_once() {
    let (server, store, clock) = build_test_server();
    let id = add(&server, connection_form("0300-9876543", -1, 40)).await;

    server
        .post("/v1/reminders")
        .json(&json!({ "connection_id": id, "contact": "a@b.com", "method": "Email" }))
        .await
        .assert_status_ok();

    store.run_overdue_scan().await;
    store.run_overdue_scan().await;
    clock.advance(Duration::seconds(10));
    store.run_overdue_scan().await;

    let body: Value = server.get("/v1/logs").await.json();
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries[0]["body"],
        "Auto-Email sent to a@b.com for 0300-9876543: Payment is overdue."
    );
    assert_eq!(
        entries[0]["line"],
        "[2:30:00 PM] Auto-Email sent to a@b.com for 0300-9876543: Payment is overdue."
    );
}

// =============================================================================
// Theme / Dashboard Tests
// =============================================================================

#[tokio::test]
async fn test_theme_toggle() {
    let (server, _, _) = build_test_server();

    let body: Value = server.post("/v1/theme/toggle").await.json();
    assert_eq!(body["theme"], "light");
    let body: Value = server.post("/v1/theme/toggle").await.json();
    assert_eq!(body["theme"], "dark");
}

#[tokio::test]
async fn test_dashboard_view() {
    let (server, _, _) = build_test_server();
    let body: Value = server.get("/v1/dashboard").await.json();
    assert!(body["selected"].is_null());
    assert_eq!(body["theme"], "dark");

    let id = add(&server, connection_form("0312-3456789", 3, 25)).await;

    let body: Value = server.get("/v1/dashboard").await.json();
    assert_eq!(body["connections"].as_array().unwrap().len(), 1);
    assert_eq!(body["selected"]["id"], id);
    assert_eq!(body["selected"]["data_remaining_gb"], 64.0);
    assert_eq!(body["notification"]["kind"], "advisory");
    assert!(body["logs"].as_array().unwrap().is_empty());
}
