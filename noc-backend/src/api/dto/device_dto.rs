// noc-backend/src/api/dto/device_dto.rs
use crate::domain::device_model;
use crate::domain::device_status::DeviceStatus;
use crate::utils::validation::common;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// --- Request DTOs ---

/// 機器の登録・全置換更新
#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRequestDto {
    #[validate(
        length(
            min = common::device::NAME_MIN_LENGTH,
            max = common::device::NAME_MAX_LENGTH,
            message = "Device name must be between 1 and 100 characters"
        ),
        custom(function = common::validate_not_empty_or_whitespace)
    )]
    pub name: String,

    #[serde(rename = "type")]
    #[validate(custom(function = common::validate_device_type))]
    pub device_type: String,

    #[validate(ip(message = "Invalid IP address"))]
    pub ip_address: String,

    #[validate(length(
        max = common::device::LOCATION_MAX_LENGTH,
        message = "Location must not exceed 200 characters"
    ))]
    pub location: Option<String>,

    // 省略時は Active
    #[validate(custom(function = common::validate_device_status))]
    pub status: Option<String>,
}

impl DeviceRequestDto {
    /// 保存用に正規化したステータス
    pub fn status_or_default(&self) -> String {
        self.status
            .as_deref()
            .and_then(DeviceStatus::from_str)
            .unwrap_or(DeviceStatus::Active)
            .to_string()
    }
}

// --- Response DTO ---

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDto {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub ip_address: String,
    pub location: Option<String>,
    pub status: String,
    pub last_updated: DateTime<Utc>,
}

impl From<device_model::Model> for DeviceDto {
    fn from(model: device_model::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            device_type: model.device_type,
            ip_address: model.ip_address,
            location: model.location,
            status: model.status,
            last_updated: model.last_updated,
        }
    }
}
