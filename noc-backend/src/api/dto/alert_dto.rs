// noc-backend/src/api/dto/alert_dto.rs
use crate::domain::alert_model;
use crate::repository::alert_repository::AlertWithDevice;
use crate::utils::validation::common;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlertDto {
    pub device_id: i32,

    #[validate(custom(function = common::validate_alert_severity))]
    pub severity: String,

    #[validate(
        length(
            min = common::alert::MESSAGE_MIN_LENGTH,
            max = common::alert::MESSAGE_MAX_LENGTH,
            message = "Alert message must be between 1 and 4000 characters"
        ),
        custom(function = common::validate_not_empty_or_whitespace)
    )]
    pub message: String,

    #[validate(length(
        max = common::alert::SOURCE_MAX_LENGTH,
        message = "Source must not exceed 100 characters"
    ))]
    pub source: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
pub struct UpdateAlertStatusDto {
    #[validate(custom(function = common::validate_alert_status))]
    pub status: String,
}

// --- Response DTO ---

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AlertDto {
    pub id: i32,
    pub device_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    pub severity: String,
    pub message: String,
    pub source: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub status: String,
    pub resolution_timestamp: Option<DateTime<Utc>>,
}

impl From<AlertWithDevice> for AlertDto {
    fn from(row: AlertWithDevice) -> Self {
        Self {
            id: row.id,
            device_id: row.device_id,
            device_name: row.device_name,
            severity: row.severity,
            message: row.message,
            source: row.source,
            timestamp: row.timestamp,
            status: row.status,
            resolution_timestamp: row.resolution_timestamp,
        }
    }
}

// インシデント詳細の relatedAlerts では機器名を付けない
impl From<alert_model::Model> for AlertDto {
    fn from(model: alert_model::Model) -> Self {
        Self {
            id: model.id,
            device_id: model.device_id,
            device_name: None,
            severity: model.severity,
            message: model.message,
            source: model.source,
            timestamp: model.timestamp,
            status: model.status,
            resolution_timestamp: model.resolution_timestamp,
        }
    }
}
