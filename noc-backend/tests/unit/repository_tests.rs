// tests/unit/repository_tests.rs

use crate::common::db::TestDatabase;
use crate::common::test_data::{
    create_alert_data, create_device_data, seed_device_with_alerts, seed_incident,
    update_incident_data,
};
use chrono::{Duration, Utc};
use noc_backend::domain::alert_status::AlertStatus;
use noc_backend::domain::{alert_model, device_model, incident_comment_model, incident_model};
use noc_backend::repository::alert_repository::AlertRepository;
use noc_backend::repository::device_repository::DeviceRepository;
use noc_backend::repository::incident_comment_repository::IncidentCommentRepository;
use noc_backend::repository::incident_repository::IncidentRepository;
use noc_backend::repository::report_repository::{ReportRepository, TimelineSource};
use noc_backend::service::alert_service::AlertService;
use noc_backend::service::device_service::DeviceService;
use noc_backend::service::incident_service::IncidentService;
use sea_orm::{ActiveModelTrait, Set};

#[tokio::test]
async fn test_device_create_normalizes_and_defaults_status() {
    let db = TestDatabase::new().await;
    let repo = DeviceRepository::new(db.connection.clone());

    let mut payload = create_device_data("dist-sw-02");
    payload.status = None;
    let device = repo.create(payload).await.unwrap();

    assert_eq!(device.status, "Active");
    assert!(DeviceRepository::exists(&db.connection, device.id).await.unwrap());
    assert!(!DeviceRepository::exists(&db.connection, device.id + 1).await.unwrap());
}

#[tokio::test]
async fn test_device_update_refreshes_last_updated() {
    let db = TestDatabase::new().await;
    let repo = DeviceRepository::new(db.connection.clone());
    let device = repo.create(create_device_data("wan-rtr-01")).await.unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let mut payload = create_device_data("wan-rtr-01");
    payload.status = Some("Maintenance".to_string());
    let updated: device_model::Model = repo.update(device.id, payload).await.unwrap().unwrap();

    assert_eq!(updated.status, "Maintenance");
    assert!(updated.last_updated > device.last_updated);

    assert!(repo
        .update(device.id + 100, create_device_data("ghost"))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_alert_lists_are_newest_first_with_device_name() {
    let db = TestDatabase::new().await;
    let (device, alerts) = seed_device_with_alerts(&db.connection, 3).await;
    let repo = AlertRepository::new(db.connection.clone());

    let listed = repo.find_by_device_with_device(device.id).await.unwrap();
    let ids: Vec<i32> = listed.iter().map(|a| a.id).collect();
    let mut expected: Vec<i32> = alerts.iter().map(|a| a.id).collect();
    expected.reverse();

    assert_eq!(ids, expected);
    assert!(listed
        .iter()
        .all(|a| a.device_name.as_deref() == Some("core-sw-01")));

    assert!(repo
        .find_by_device_with_device(device.id + 1)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_mark_linked_overwrites_any_status() {
    let db = TestDatabase::new().await;
    let (_, alerts) = seed_device_with_alerts(&db.connection, 1).await;
    let repo = AlertRepository::new(db.connection.clone());

    AlertService::new(db.connection.clone())
        .update_alert_status(
            alerts[0].id,
            noc_backend::api::dto::alert_dto::UpdateAlertStatusDto {
                status: "Resolved".to_string(),
            },
        )
        .await
        .unwrap();

    let affected = AlertRepository::mark_linked(&db.connection, alerts[0].id)
        .await
        .unwrap();
    assert_eq!(affected, 1);

    let alert: alert_model::Model = repo.find_by_id(alerts[0].id).await.unwrap().unwrap();
    assert_eq!(alert.status, "In Progress");
    // 解決日時は残る
    assert!(alert.resolution_timestamp.is_some());
}

#[tokio::test]
async fn test_update_status_stamps_and_reports_missing_rows() {
    let db = TestDatabase::new().await;
    let (_, alerts) = seed_device_with_alerts(&db.connection, 1).await;
    let repo = AlertRepository::new(db.connection.clone());

    let acknowledged = repo
        .update_status(alerts[0].id, AlertStatus::Acknowledged)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(acknowledged.status, "Acknowledged");
    assert!(acknowledged.resolution_timestamp.is_none());

    let resolved = repo
        .update_status(alerts[0].id, AlertStatus::Resolved)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(resolved.status, "Resolved");
    assert!(resolved.resolution_timestamp.is_some());

    // 削除済みの行は None（サービス層で 404 になる）
    repo.delete(alerts[0].id).await.unwrap();
    assert!(repo
        .update_status(alerts[0].id, AlertStatus::Resolved)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_comments_with_same_created_at_are_ordered_by_id() {
    let db = TestDatabase::new().await;
    let incident = seed_incident(&db.connection, None, vec![]).await;
    let created_at = Utc::now();

    let mut inserted = Vec::new();
    for (text, at) in [
        ("first", created_at),
        ("second", created_at),
        ("earlier", created_at - Duration::minutes(5)),
        ("third", created_at),
    ] {
        let comment = incident_comment_model::ActiveModel {
            incident_id: Set(incident.id),
            comment: Set(text.to_string()),
            author: Set("operator".to_string()),
            created_at: Set(at),
            ..Default::default()
        }
        .insert(&db.connection)
        .await
        .unwrap();
        inserted.push(comment);
    }

    let comments = IncidentCommentRepository::new(db.connection.clone())
        .find_by_incident(incident.id)
        .await
        .unwrap();
    let texts: Vec<&str> = comments.iter().map(|c| c.comment.as_str()).collect();
    assert_eq!(texts, vec!["earlier", "first", "second", "third"]);

    let tied: Vec<i32> = comments[1..].iter().map(|c| c.id).collect();
    assert!(tied.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(tied[0], inserted[0].id);
}

#[tokio::test]
async fn test_related_alerts_and_links() {
    let db = TestDatabase::new().await;
    let (device, alerts) = seed_device_with_alerts(&db.connection, 2).await;
    let incident = seed_incident(
        &db.connection,
        Some(device.id),
        vec![alerts[1].id, alerts[0].id],
    )
    .await;
    let repo = IncidentRepository::new(db.connection.clone());

    let related = repo.find_related_alerts(incident.id).await.unwrap();
    let related_ids: Vec<i32> = related.iter().map(|a| a.id).collect();
    assert_eq!(related_ids, vec![alerts[0].id, alerts[1].id]);

    let links = repo.find_links(incident.id).await.unwrap();
    assert_eq!(links.len(), 2);
    assert!(links.iter().all(|l| l.incident_id == incident.id));

    let with_device = repo.find_with_device(incident.id).await.unwrap().unwrap();
    assert_eq!(with_device.device_name.as_deref(), Some("core-sw-01"));
}

#[tokio::test]
async fn test_incident_without_device_has_no_device_name() {
    let db = TestDatabase::new().await;
    let incident = seed_incident(&db.connection, None, vec![]).await;
    let repo = IncidentRepository::new(db.connection.clone());

    let found = repo.find_with_device(incident.id).await.unwrap().unwrap();
    assert!(found.device_id.is_none());
    assert!(found.device_name.is_none());
}

// --- レポート集計 ---

#[tokio::test]
async fn test_count_grouped_by_severity() {
    let db = TestDatabase::new().await;
    let (device, _) = seed_device_with_alerts(&db.connection, 2).await;
    let alert_service = AlertService::new(db.connection.clone());
    alert_service
        .create_alert(create_alert_data(device.id, "minor"))
        .await
        .unwrap();

    let repo = ReportRepository::new(db.connection.clone());
    let rows = repo
        .count_grouped_by::<alert_model::Entity>(alert_model::Column::Severity)
        .await
        .unwrap();

    let pairs: Vec<(String, i64)> = rows.into_iter().map(|r| (r.value, r.count)).collect();
    assert_eq!(
        pairs,
        vec![("Critical".to_string(), 2), ("Minor".to_string(), 1)]
    );
}

#[tokio::test]
async fn test_daily_counts_for_today() {
    let db = TestDatabase::new().await;
    seed_device_with_alerts(&db.connection, 3).await;
    let repo = ReportRepository::new(db.connection.clone());

    let timeline = repo
        .daily_counts(TimelineSource::Alerts, Utc::now() - Duration::days(7))
        .await
        .unwrap();
    let total: i64 = timeline.iter().map(|p| p.count).sum();
    assert_eq!(total, 3);
    assert!(timeline.iter().all(|p| p.count > 0));

    let incidents = repo
        .daily_counts(TimelineSource::Incidents, Utc::now() - Duration::days(30))
        .await
        .unwrap();
    assert!(incidents.is_empty());
}

#[tokio::test]
async fn test_average_resolution_hours() {
    let db = TestDatabase::new().await;
    let repo = ReportRepository::new(db.connection.clone());

    assert_eq!(repo.average_resolution_hours().await.unwrap(), None);

    let incident = seed_incident(&db.connection, None, vec![]).await;
    IncidentService::new(db.connection.clone())
        .update_incident(incident.id, update_incident_data("Resolved"))
        .await
        .unwrap();

    let avg = repo.average_resolution_hours().await.unwrap().unwrap();
    assert!(avg >= 0.0);
    assert!(avg < 1.0);
}

#[tokio::test]
async fn test_devices_with_most_alerts_includes_quiet_devices() {
    let db = TestDatabase::new().await;
    let (busy, _) = seed_device_with_alerts(&db.connection, 2).await;
    let quiet = DeviceService::new(db.connection.clone())
        .create_device(create_device_data("quiet-ap-01"))
        .await
        .unwrap();

    let rows = ReportRepository::new(db.connection.clone())
        .devices_with_most_alerts(10)
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].device_id, busy.id);
    assert_eq!(rows[0].alert_count, 2);
    assert_eq!(rows[1].device_id, quiet.id);
    assert_eq!(rows[1].alert_count, 0);

    let limited = ReportRepository::new(db.connection.clone())
        .devices_with_most_alerts(1)
        .await
        .unwrap();
    assert_eq!(limited.len(), 1);
}

#[tokio::test]
async fn test_period_summary_counts_window() {
    let db = TestDatabase::new().await;
    let (_, alerts) = seed_device_with_alerts(&db.connection, 2).await;
    let incident: incident_model::Model =
        seed_incident(&db.connection, None, vec![alerts[0].id]).await;
    IncidentService::new(db.connection.clone())
        .update_incident(incident.id, update_incident_data("Resolved"))
        .await
        .unwrap();

    let repo = ReportRepository::new(db.connection.clone());
    let now = Utc::now();

    let summary = repo
        .period_summary(now - Duration::hours(1), now + Duration::hours(1))
        .await
        .unwrap();
    assert_eq!(summary.total_alerts, 2);
    assert_eq!(summary.total_incidents, 1);
    assert_eq!(summary.resolved_incidents, 1);
    assert!(summary.avg_resolution_hours.is_some());

    let empty = repo
        .period_summary(now - Duration::days(10), now - Duration::days(9))
        .await
        .unwrap();
    assert_eq!(empty.total_alerts, 0);
    assert_eq!(empty.total_incidents, 0);
    assert_eq!(empty.resolved_incidents, 0);
    assert!(empty.avg_resolution_hours.is_none());
}
