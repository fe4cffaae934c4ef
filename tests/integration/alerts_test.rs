//! Alert listing, acknowledgement, usage detail, and health endpoints.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::json;

use authwatch_core::types::TenantId;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_list_alerts_reports_firing_conditions() {
    let app = TestApp::new();
    let expired = app.seed(10.0, 100.0, -3);
    let _healthy = app.seed(10.0, 100.0, 120);

    let (status, body) = app.get("/api/alerts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let alerts = body["data"]["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["id"], format!("expired-{expired}"));
    assert_eq!(alerts[0]["type"], "EXPIRED");
    assert_eq!(alerts[0]["severity"], "CRITICAL");

    let summary = &body["data"]["summary"];
    assert_eq!(summary["total"], 1);
    assert_eq!(summary["critical"], 1);
    assert_eq!(summary["expiring"], 1);
    assert_eq!(summary["low_units"], 0);
    assert!(body["data"]["saved_alerts"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_alerts_orders_by_severity() {
    let app = TestApp::new();
    let high_usage = app.seed(95.0, 100.0, 120);
    let critical = app.seed(10.0, 100.0, 3);

    let (status, body) = app.get("/api/alerts").await;
    assert_eq!(status, StatusCode::OK);

    let alerts = body["data"]["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0]["id"], format!("expiring_critical-{critical}"));
    assert_eq!(alerts[1]["id"], format!("usage-90-{high_usage}"));
    assert_eq!(alerts[1]["severity"], "HIGH");
}

#[tokio::test]
async fn test_list_alerts_is_tenant_scoped() {
    let app = TestApp::new();
    app.seed(100.0, 100.0, -1);

    let (status, body) = app.get_as(TenantId::new(), "/api/alerts").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["alerts"].as_array().unwrap().is_empty());
    assert_eq!(body["data"]["summary"]["total"], 0);
}

#[tokio::test]
async fn test_missing_tenant_header_is_unauthorized() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/alerts")
        .body(Body::empty())
        .unwrap();

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_acknowledge_realtime_alert() {
    let app = TestApp::new();
    let authorization = app.seed(100.0, 100.0, 60);

    let (status, body) = app
        .acknowledge(json!({ "alertId": format!("exhausted-{authorization}") }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["type"], "UNITS_EXHAUSTED");
    assert_eq!(body["data"]["is_read"], true);
    assert_eq!(body["data"]["action_taken"], "ACKNOWLEDGED");
    assert_eq!(body["data"]["action_taken_by_id"], app.user_id.to_string());
    assert_eq!(app.records.len(), 1);

    let (status, body) = app.get("/api/alerts?acknowledged=true").await;
    assert_eq!(status, StatusCode::OK);
    let saved = body["data"]["saved_alerts"].as_array().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0]["authorization_id"], authorization.to_string());

    // Acknowledging does not silence the real-time alert.
    assert_eq!(body["data"]["alerts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_acknowledge_requires_alert_id() {
    let app = TestApp::new();
    let (status, body) = app.acknowledge(json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_acknowledge_alert_that_is_not_firing() {
    let app = TestApp::new();
    let authorization = app.seed(10.0, 100.0, 120);

    let (status, _) = app
        .acknowledge(json!({ "alert_id": format!("expired-{authorization}") }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.acknowledge(json!({ "alert_id": "not-an-alert" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(app.records.is_empty());
}

#[tokio::test]
async fn test_acknowledge_without_user_is_unauthorized() {
    let app = TestApp::new();
    let authorization = app.seed(100.0, 100.0, 60);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/alerts")
        .header("content-type", "application/json")
        .header("x-tenant-id", app.tenant_id.to_string())
        .body(Body::from(
            json!({ "alert_id": format!("exhausted-{authorization}") }).to_string(),
        ))
        .unwrap();

    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(app.records.is_empty());
}

#[tokio::test]
async fn test_authorization_usage_detail() {
    let app = TestApp::new();
    let authorization = app.seed(45.0, 60.0, 10);

    let (status, body) = app
        .get(&format!("/api/authorizations/{authorization}/usage"))
        .await;
    assert_eq!(status, StatusCode::OK);

    let usage = &body["data"];
    assert_eq!(usage["used_units"], 45.0);
    assert_eq!(usage["authorized_units"], 60.0);
    assert_eq!(usage["usage_percentage"], 75.0);
    assert_eq!(usage["remaining_units"], 15.0);
    assert_eq!(usage["is_expiring_soon"], true);
    assert_eq!(usage["is_expired"], false);
    assert_eq!(usage["is_nearing_limit"], false);
}

#[tokio::test]
async fn test_authorization_usage_of_other_tenant_is_not_found() {
    let app = TestApp::new();
    let authorization = app.seed(45.0, 60.0, 10);

    let (status, body) = app
        .get_as(
            TenantId::new(),
            &format!("/api/authorizations/{authorization}/usage"),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["store"], "memory");
}
