mod common;

use axum::http::{Method, StatusCode};
use chrono::{Datelike, Utc};
use serde_json::json;

use common::{response_json, TestApp};

fn log_payload(batch_id: &str) -> serde_json::Value {
    json!({
        "date": "2024-05-01",
        "operator": "Asha",
        "batchId": batch_id,
        "materialName": "Brass Rod",
        "quantity": 100.0,
        "productName": "Hinge",
        "unitsProduced": 90
    })
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = TestApp::new().await;
    let response = app.request(Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "prodtrack-api");
}

#[tokio::test]
async fn production_log_create_and_list() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/production",
            Some(log_payload("B-2024-0001")),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = response_json(response).await;
    let id = created["id"].as_str().unwrap();
    assert!(id.starts_with("LOG-"));
    assert!(created["timestamp"].is_string());

    let response = app.request(Method::GET, "/api/v1/production", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let logs = response_json(response).await;
    assert_eq!(logs.as_array().unwrap().len(), 1);
    assert_eq!(logs[0]["materialName"], "Brass Rod");
    assert_eq!(logs[0]["unitsProduced"], 90);
}

#[tokio::test]
async fn blank_material_name_is_rejected() {
    let app = TestApp::new().await;

    let mut payload = log_payload("B-2024-0001");
    payload["materialName"] = json!("");

    let response = app
        .request(Method::POST, "/api/v1/production", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Bad Request");
    assert!(body["message"].as_str().unwrap().contains("Validation"));
}

#[tokio::test]
async fn batch_id_allocation_follows_the_stored_history() {
    let app = TestApp::new().await;
    let year = Utc::now().year();

    let response = app
        .request(Method::GET, "/api/v1/production/batch-id", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["id"], format!("B-{year}-0001"));

    app.request(
        Method::POST,
        "/api/v1/production",
        Some(log_payload(&format!("B-{year}-0007"))),
    )
    .await;

    let response = app
        .request(Method::GET, "/api/v1/production/batch-id", None)
        .await;
    let body = response_json(response).await;
    assert_eq!(body["id"], format!("B-{year}-0008"));
}

#[tokio::test]
async fn deleting_a_log_removes_it_from_the_history() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/production",
            Some(log_payload("B-2024-0001")),
        )
        .await;
    let created = response_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = app
        .request(Method::DELETE, &format!("/api/v1/production/{id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["success"], true);

    let logs = response_json(app.request(Method::GET, "/api/v1/production", None).await).await;
    assert!(logs.as_array().unwrap().is_empty());

    let response = app
        .request(Method::DELETE, &format!("/api/v1/production/{id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
