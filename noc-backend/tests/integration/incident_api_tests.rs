// tests/integration/incident_api_tests.rs

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use crate::common::{
    app_helper::setup_app,
    request::{body_json, empty_request, json_request},
    test_data::{seed_device_with_alerts, update_incident_data},
};

#[tokio::test]
async fn test_incident_correlation_scenario() {
    let (app, db) = setup_app().await;
    let (device, alerts) = seed_device_with_alerts(&db.connection, 2).await;

    // 2件目は確認済みにしておく
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/alerts/{}/status", alerts[1].id),
            &json!({ "status": "Acknowledged" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // status を送っても Open で作成される
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/incidents",
            &json!({
                "title": "Core switch outage",
                "description": "Both uplinks flapping",
                "priority": "High",
                "status": "Closed",
                "deviceId": device.id,
                "assignedTo": "alice",
                "alertIds": [alerts[0].id, alerts[1].id]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["message"], "Incident created successfully");
    let incident_id = created["incidentId"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/incidents/{}", incident_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let detail = body_json(response).await;
    assert_eq!(detail["status"], "Open");
    assert_eq!(detail["deviceName"], "core-sw-01");
    assert!(detail["resolvedAt"].is_null());

    let related = detail["relatedAlerts"].as_array().unwrap();
    assert_eq!(related.len(), 2);
    assert!(related.iter().all(|a| a["status"] == "In Progress"));

    // 解決
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/incidents/{}", incident_id),
            &update_incident_data("Resolved"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/incidents/{}", incident_id)))
        .await
        .unwrap();
    let detail = body_json(response).await;
    assert_eq!(detail["status"], "Resolved");
    assert!(detail["resolvedAt"].is_string());
    assert!(detail["updatedAt"].is_string());
    // アラートは In Progress のまま
    assert!(detail["relatedAlerts"]
        .as_array()
        .unwrap()
        .iter()
        .all(|a| a["status"] == "In Progress"));

    let response = app
        .oneshot(empty_request("GET", "/api/incidents"))
        .await
        .unwrap();
    let incidents = body_json(response).await;
    assert_eq!(incidents.as_array().unwrap().len(), 1);
    assert!(incidents[0].get("relatedAlerts").is_none());
}

#[tokio::test]
async fn test_create_incident_with_missing_alert_persists_nothing() {
    let (app, db) = setup_app().await;
    let (_, alerts) = seed_device_with_alerts(&db.connection, 1).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/incidents",
            &json!({
                "title": "Partial",
                "description": "Second alert does not exist",
                "priority": "Low",
                "alertIds": [alerts[0].id, 700_000]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/incidents"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!([]));

    let response = app
        .oneshot(empty_request("GET", &format!("/api/alerts/{}", alerts[0].id)))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["status"], "New");
}

#[tokio::test]
async fn test_create_incident_validation() {
    let (app, _db) = setup_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/incidents",
            &json!({
                "title": "",
                "description": "missing title",
                "priority": "Urgent"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_incident_invalid_status() {
    let (app, _db) = setup_app().await;

    let mut payload = update_incident_data("Resolved");
    payload.status = "Done".to_string();

    let response = app
        .oneshot(json_request("PUT", "/api/incidents/1", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_missing_incident() {
    let (app, _db) = setup_app().await;

    let response = app
        .oneshot(empty_request("GET", "/api/incidents/123"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Incident not found");
}

#[tokio::test]
async fn test_incident_comments() {
    let (app, _db) = setup_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/incidents",
            &json!({
                "title": "Latency spike",
                "description": "p99 above 500ms",
                "priority": "Medium"
            }),
        ))
        .await
        .unwrap();
    let incident_id = body_json(response).await["incidentId"].as_i64().unwrap();
    let uri = format!("/api/incidents/{}/comments", incident_id);

    for (comment, author) in [("Looking into it", "bob"), ("Rolled back deploy", "carol")] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &uri,
                &json!({ "comment": comment, "author": author }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(body_json(response).await["commentId"].is_number());
    }

    let response = app
        .clone()
        .oneshot(empty_request("GET", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let comments = body_json(response).await;
    let comments = comments.as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["comment"], "Looking into it");
    assert_eq!(comments[1]["author"], "carol");
    assert_eq!(comments[0]["incidentId"].as_i64().unwrap(), incident_id);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &uri,
            &json!({ "comment": "   ", "author": "bob" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(empty_request("GET", "/api/incidents/9999/comments"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_incident_with_null_alert_ids() {
    let (app, _db) = setup_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/incidents",
            &json!({
                "title": "DB outage",
                "description": "Primary database unreachable",
                "priority": "Critical",
                "deviceId": null,
                "alertIds": null
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let incident_id = body_json(response).await["incidentId"].as_i64().unwrap();

    let response = app
        .oneshot(empty_request("GET", &format!("/api/incidents/{}", incident_id)))
        .await
        .unwrap();
    let detail = body_json(response).await;
    assert_eq!(detail["status"], "Open");
    assert_eq!(detail["relatedAlerts"], json!([]));
}
