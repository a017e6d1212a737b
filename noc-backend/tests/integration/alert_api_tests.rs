// tests/integration/alert_api_tests.rs

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use crate::common::{
    app_helper::setup_app,
    request::{body_json, empty_request, json_request},
    test_data::{seed_device_with_alerts, seed_incident},
};

#[tokio::test]
async fn test_create_and_get_alert() {
    let (app, db) = setup_app().await;
    let (device, _) = seed_device_with_alerts(&db.connection, 0).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/alerts",
            &json!({
                "deviceId": device.id,
                "severity": "major",
                "message": "Interface Gi0/1 down",
                "source": "syslog"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let alert_id = created["alertId"].as_i64().unwrap();

    let response = app
        .oneshot(empty_request("GET", &format!("/api/alerts/{}", alert_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let alert = body_json(response).await;
    assert_eq!(alert["severity"], "Major");
    assert_eq!(alert["status"], "New");
    assert_eq!(alert["deviceName"], "core-sw-01");
    assert!(alert["resolutionTimestamp"].is_null());
}

#[tokio::test]
async fn test_create_alert_for_unknown_device() {
    let (app, _db) = setup_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/alerts",
            &json!({
                "deviceId": 31337,
                "severity": "Critical",
                "message": "Power supply failure"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_alert_rejects_unknown_severity() {
    let (app, db) = setup_app().await;
    let (device, _) = seed_device_with_alerts(&db.connection, 0).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/alerts",
            &json!({
                "deviceId": device.id,
                "severity": "Apocalyptic",
                "message": "?"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_alerts_for_device() {
    let (app, db) = setup_app().await;
    let (device, alerts) = seed_device_with_alerts(&db.connection, 2).await;

    let response = app
        .clone()
        .oneshot(empty_request(
            "GET",
            &format!("/api/alerts/device/{}", device.id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    // 新しい順
    assert_eq!(listed[0]["id"].as_i64().unwrap(), alerts[1].id as i64);

    // 存在しない機器は空配列
    let response = app
        .oneshot(empty_request("GET", "/api/alerts/device/999"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_update_alert_status() {
    let (app, db) = setup_app().await;
    let (_, alerts) = seed_device_with_alerts(&db.connection, 1).await;
    let uri = format!("/api/alerts/{}/status", alerts[0].id);

    let response = app
        .clone()
        .oneshot(json_request("PUT", &uri, &json!({ "status": "resolved" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        "Alert status updated successfully"
    );

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/alerts/{}", alerts[0].id)))
        .await
        .unwrap();
    let alert = body_json(response).await;
    assert_eq!(alert["status"], "Resolved");
    assert!(alert["resolutionTimestamp"].is_string());

    let response = app
        .clone()
        .oneshot(json_request("PUT", &uri, &json!({ "status": "Snoozed" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/alerts/8080/status",
            &json!({ "status": "Resolved" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_alert() {
    let (app, db) = setup_app().await;
    let (_, alerts) = seed_device_with_alerts(&db.connection, 2).await;
    seed_incident(&db.connection, None, vec![alerts[0].id]).await;

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/api/alerts/{}", alerts[0].id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/api/alerts/{}", alerts[1].id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(empty_request("DELETE", &format!("/api/alerts/{}", alerts[1].id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
