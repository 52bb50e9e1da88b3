mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{response_json, TestApp};
use prodtrack_api::models::ProductionLogEntry;

fn legacy_row(batch_id: &str, raw: f64, produced: i64) -> ProductionLogEntry {
    // Pre-migration field names: rmUsed/rmQuantity and
    // componentProduced/quantityProduced.
    ProductionLogEntry {
        id: format!("LOG-legacy-{batch_id}"),
        date: "2023-11-14".into(),
        operator: "Ravi".into(),
        batch_id: Some(batch_id.into()),
        rm_used: Some("Steel Sheet".into()),
        rm_quantity: Some(raw),
        component_produced: Some("Bracket".into()),
        quantity_produced: Some(produced),
        ..Default::default()
    }
}

#[tokio::test]
async fn daily_report_correlates_current_and_legacy_rows() {
    let app = TestApp::new().await;

    app.seed_log(legacy_row("B-2023-0005", 100.0, 70)).await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/production",
            Some(json!({
                "date": "2024-05-01",
                "operator": "Asha",
                "batchId": "B-2024-0001",
                "materialName": "Brass Rod",
                "quantity": 100.0,
                "productName": "Hinge",
                "unitsProduced": 90
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.request(Method::GET, "/api/v1/reports/daily", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let report = response_json(response).await;

    let records = report["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);

    let legacy = records
        .iter()
        .find(|r| r["batchId"] == "B-2023-0005")
        .unwrap();
    assert_eq!(legacy["rawMaterial"]["name"], "Steel Sheet");
    assert_eq!(legacy["finishedProduct"]["name"], "Bracket");
    assert_eq!(legacy["efficiency"], 70.0);
    assert_eq!(legacy["status"], "critical");

    let current = records
        .iter()
        .find(|r| r["batchId"] == "B-2024-0001")
        .unwrap();
    assert_eq!(current["efficiency"], 90.0);
    assert_eq!(current["status"], "optimal");

    assert_eq!(report["totalMaterialUsed"], 200.0);
    assert_eq!(report["totalProduced"], 160);
    assert_eq!(report["averageEfficiency"], 80.0);

    // Mean of exactly 80 does not trip the plant-wide alert, and both
    // products are above the low-stock threshold.
    assert!(report["alerts"].as_array().unwrap().is_empty());

    let inventory = report["inventory"].as_array().unwrap();
    assert_eq!(inventory.len(), 2);
}

#[tokio::test]
async fn deep_outlier_shows_up_as_an_anomaly_alert() {
    let app = TestApp::new().await;

    for (n, produced) in [40, 95, 96, 94, 92].into_iter().enumerate() {
        let response = app
            .request(
                Method::POST,
                "/api/v1/production",
                Some(json!({
                    "date": "2024-05-01",
                    "operator": "Asha",
                    "batchId": format!("B-2024-{:04}", n + 1),
                    "materialName": "Brass Rod",
                    "quantity": 100.0,
                    "productName": "Hinge",
                    "unitsProduced": produced
                })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let report = response_json(app.request(Method::GET, "/api/v1/reports/daily", None).await).await;

    let outlier = report["records"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["batchId"] == "B-2024-0001")
        .unwrap()
        .clone();
    assert_eq!(outlier["status"], "critical");

    let alerts = report["alerts"].as_array().unwrap();
    assert!(alerts.iter().any(|a| {
        let a = a.as_str().unwrap();
        a.contains("Anomaly Detect") && a.contains("B-2024-0001") && a.contains("40.0%")
    }));
}

#[tokio::test]
async fn low_mean_efficiency_and_low_stock_both_alert() {
    let app = TestApp::new().await;

    // Two weak batches: mean 71%, and only 142 units spread over one product
    // dispatched down below the threshold.
    for (n, produced) in [70, 72].into_iter().enumerate() {
        app.request(
            Method::POST,
            "/api/v1/production",
            Some(json!({
                "date": "2024-05-01",
                "operator": "Asha",
                "batchId": format!("B-2024-{:04}", n + 1),
                "materialName": "Brass Rod",
                "quantity": 100.0,
                "productName": "Hinge",
                "unitsProduced": produced
            })),
        )
        .await;
    }
    let response = app
        .request(
            Method::POST,
            "/api/v1/inventory/dispatch",
            Some(json!({
                "date": "2024-05-02",
                "productName": "Hinge",
                "quantity": 120,
                "destination": "Customer"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let report = response_json(app.request(Method::GET, "/api/v1/reports/daily", None).await).await;
    let alerts: Vec<&str> = report["alerts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a.as_str().unwrap())
        .collect();

    assert!(alerts.iter().any(|a| a.contains("below 80%")));
    assert!(alerts.iter().any(|a| a.contains("Low Stock: Hinge (22 units)")));
    assert!(alerts
        .iter()
        .any(|a| a.contains("Investigate raw material quality")));
}

#[tokio::test]
async fn production_records_endpoint_skips_the_analysis_pass() {
    let app = TestApp::new().await;
    app.seed_log(legacy_row("B-2023-0005", 100.0, 70)).await;

    let response = app
        .request(Method::GET, "/api/v1/reports/production", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let records = response_json(response).await;
    assert_eq!(records.as_array().unwrap().len(), 1);
    assert_eq!(records[0]["status"], "critical");
}
