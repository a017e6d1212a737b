// noc-backend/src/service/alert_service.rs

use crate::api::dto::alert_dto::{AlertDto, CreateAlertDto, UpdateAlertStatusDto};
use crate::db::DbPool;
use crate::domain::alert_model;
use crate::domain::alert_status::{AlertSeverity, AlertStatus};
use crate::error::{AppError, AppResult};
use crate::repository::alert_repository::AlertRepository;
use crate::repository::device_repository::DeviceRepository;
use crate::utils::error_helper::{conflict_error, is_foreign_key_violation, not_found_error};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::info;

pub struct AlertService {
    db: DatabaseConnection,
    repo: Arc<AlertRepository>,
}

impl AlertService {
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            repo: Arc::new(AlertRepository::new(db_pool.clone())),
            db: db_pool,
        }
    }

    pub async fn list_alerts(&self) -> AppResult<Vec<AlertDto>> {
        let alerts = self.repo.find_all_with_device().await?;
        Ok(alerts.into_iter().map(Into::into).collect())
    }

    /// 機器ごとのアラート（機器が存在しなければ空）
    pub async fn list_alerts_for_device(&self, device_id: i32) -> AppResult<Vec<AlertDto>> {
        let alerts = self.repo.find_by_device_with_device(device_id).await?;
        Ok(alerts.into_iter().map(Into::into).collect())
    }

    pub async fn get_alert(&self, id: i32) -> AppResult<AlertDto> {
        self.repo
            .find_with_device(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| not_found_error("Alert", id, "alert_service::get_alert"))
    }

    /// ステータス New、発生時刻は現在時刻で登録する
    pub async fn create_alert(&self, mut payload: CreateAlertDto) -> AppResult<alert_model::Model> {
        payload.severity = payload
            .severity
            .parse::<AlertSeverity>()
            .map_err(AppError::ValidationError)?
            .to_string();

        if !DeviceRepository::exists(&self.db, payload.device_id).await? {
            return Err(not_found_error(
                "Device",
                payload.device_id,
                "alert_service::create_alert",
            ));
        }

        let alert = self.repo.create(payload).await?;

        info!(
            alert_id = alert.id,
            device_id = alert.device_id,
            severity = %alert.severity,
            "Alert raised"
        );
        Ok(alert)
    }

    /// ステータス更新。Resolved が送られるたびに解決時刻を打ち直す
    pub async fn update_alert_status(
        &self,
        id: i32,
        payload: UpdateAlertStatusDto,
    ) -> AppResult<alert_model::Model> {
        let status = payload
            .status
            .parse::<AlertStatus>()
            .map_err(AppError::ValidationError)?;

        let alert = self
            .repo
            .update_status(id, status)
            .await?
            .ok_or_else(|| not_found_error("Alert", id, "alert_service::update_alert_status"))?;

        info!(
            alert_id = alert.id,
            status = %alert.status,
            resolution_timestamp = ?alert.resolution_timestamp,
            "Alert status updated"
        );
        Ok(alert)
    }

    /// インシデントに紐付いているアラートは削除できない（409）
    pub async fn delete_alert(&self, id: i32) -> AppResult<()> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(not_found_error("Alert", id, "alert_service::delete_alert"));
        }

        let link_count = self.repo.count_incident_links(id).await?;
        if link_count > 0 {
            return Err(conflict_error(
                &format!("Alert is linked to {} incident(s) and cannot be deleted", link_count),
                "alert_service::delete_alert",
            ));
        }

        let result = self.repo.delete(id).await.map_err(|e| {
            if is_foreign_key_violation(&e) {
                conflict_error(
                    "Alert is linked to an incident and cannot be deleted",
                    "alert_service::delete_alert",
                )
            } else {
                AppError::DbErr(e)
            }
        })?;

        if result.rows_affected == 0 {
            return Err(not_found_error("Alert", id, "alert_service::delete_alert"));
        }

        info!(alert_id = id, "Alert deleted");
        Ok(())
    }
}
