// noc-backend/src/service/device_service.rs

use crate::api::dto::device_dto::{DeviceDto, DeviceRequestDto};
use crate::db::DbPool;
use crate::domain::device_status::{DeviceStatus, DeviceType};
use crate::error::{AppError, AppResult};
use crate::repository::device_repository::DeviceRepository;
use crate::utils::error_helper::{conflict_error, is_foreign_key_violation, not_found_error};
use std::sync::Arc;
use tracing::info;

pub struct DeviceService {
    repo: Arc<DeviceRepository>,
}

impl DeviceService {
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            repo: Arc::new(DeviceRepository::new(db_pool)),
        }
    }

    pub async fn list_devices(&self) -> AppResult<Vec<DeviceDto>> {
        let devices = self.repo.find_all().await?;
        Ok(devices.into_iter().map(Into::into).collect())
    }

    pub async fn get_device(&self, id: i32) -> AppResult<DeviceDto> {
        self.repo
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| not_found_error("Device", id, "device_service::get_device"))
    }

    pub async fn create_device(&self, payload: DeviceRequestDto) -> AppResult<DeviceDto> {
        let payload = normalize(payload)?;
        let device = self.repo.create(payload).await?;

        info!(device_id = device.id, name = %device.name, "Device registered");
        Ok(device.into())
    }

    pub async fn update_device(&self, id: i32, payload: DeviceRequestDto) -> AppResult<DeviceDto> {
        let payload = normalize(payload)?;
        self.repo
            .update(id, payload)
            .await?
            .map(Into::into)
            .ok_or_else(|| not_found_error("Device", id, "device_service::update_device"))
    }

    /// アラートから参照されている機器は削除できない（409）
    pub async fn delete_device(&self, id: i32) -> AppResult<()> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(not_found_error("Device", id, "device_service::delete_device"));
        }

        let alert_count = self.repo.count_alerts(id).await?;
        if alert_count > 0 {
            return Err(conflict_error(
                &format!("Device has {} alert(s) and cannot be deleted", alert_count),
                "device_service::delete_device",
            ));
        }

        // 確認後に挿入されたアラートは外部キー制約で拒否される
        let result = self.repo.delete(id).await.map_err(|e| {
            if is_foreign_key_violation(&e) {
                conflict_error(
                    "Device is referenced by alerts and cannot be deleted",
                    "device_service::delete_device",
                )
            } else {
                AppError::DbErr(e)
            }
        })?;

        if result.rows_affected == 0 {
            return Err(not_found_error("Device", id, "device_service::delete_device"));
        }

        info!(device_id = id, "Device deleted");
        Ok(())
    }
}

/// 列挙値を保存用の表示文字列に揃える
fn normalize(mut payload: DeviceRequestDto) -> AppResult<DeviceRequestDto> {
    payload.device_type = payload
        .device_type
        .parse::<DeviceType>()
        .map_err(AppError::ValidationError)?
        .to_string();
    payload.status = payload
        .status
        .map(|s| s.parse::<DeviceStatus>().map(|status| status.to_string()))
        .transpose()
        .map_err(AppError::ValidationError)?;
    Ok(payload)
}
