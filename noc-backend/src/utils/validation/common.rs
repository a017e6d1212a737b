// noc-backend/src/utils/validation/common.rs

//! 共通バリデーション定数と関数
//!
//! DTOファイル間で重複するバリデーションルールを統一管理します。

use crate::domain::alert_status::{AlertSeverity, AlertStatus};
use crate::domain::device_status::{DeviceStatus, DeviceType};
use crate::domain::incident_status::{IncidentPriority, IncidentStatus};
use std::str::FromStr;
use validator::ValidationError;

// =============================================================================
// バリデーション定数
// =============================================================================

/// インシデント関連の制約
pub mod incident {
    pub const TITLE_MIN_LENGTH: u64 = 1;
    pub const TITLE_MAX_LENGTH: u64 = 200;
    pub const DESCRIPTION_MIN_LENGTH: u64 = 1;
    pub const DESCRIPTION_MAX_LENGTH: u64 = 4000;
    pub const ASSIGNEE_MAX_LENGTH: u64 = 100;
    pub const MAX_LINKED_ALERTS: u64 = 100;
}

/// コメント関連の制約
pub mod comment {
    pub const BODY_MIN_LENGTH: u64 = 1;
    pub const BODY_MAX_LENGTH: u64 = 4000;
    pub const AUTHOR_MIN_LENGTH: u64 = 1;
    pub const AUTHOR_MAX_LENGTH: u64 = 100;
}

/// デバイス関連の制約
pub mod device {
    pub const NAME_MIN_LENGTH: u64 = 1;
    pub const NAME_MAX_LENGTH: u64 = 100;
    pub const LOCATION_MAX_LENGTH: u64 = 200;
}

/// アラート関連の制約
pub mod alert {
    pub const MESSAGE_MIN_LENGTH: u64 = 1;
    pub const MESSAGE_MAX_LENGTH: u64 = 4000;
    pub const SOURCE_MAX_LENGTH: u64 = 100;
}

// =============================================================================
// カスタムバリデーション関数
// =============================================================================

/// 文字列が空白のみでないかをチェック
pub fn validate_not_empty_or_whitespace(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("empty_or_whitespace");
        error.message = Some("Field cannot be empty or contain only whitespace".into());
        return Err(error);
    }
    Ok(())
}

/// タイトル系フィールドのバリデーション（1行であること）
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    validate_not_empty_or_whitespace(title)?;

    if title.contains('\0') || title.contains('\r') || title.contains('\n') {
        let mut error = ValidationError::new("invalid_characters");
        error.message =
            Some("Title cannot contain null, carriage return, or newline characters".into());
        return Err(error);
    }

    Ok(())
}

// 列挙値として解釈できるかをチェックし、失敗時は有効値をメッセージに含める
fn validate_enum_value<T>(value: &str, code: &'static str) -> Result<(), ValidationError>
where
    T: FromStr<Err = String>,
{
    value.parse::<T>().map(|_| ()).map_err(|message| {
        let mut error = ValidationError::new(code);
        error.message = Some(message.into());
        error
    })
}

pub fn validate_incident_priority(value: &str) -> Result<(), ValidationError> {
    validate_enum_value::<IncidentPriority>(value, "invalid_priority")
}

pub fn validate_incident_status(value: &str) -> Result<(), ValidationError> {
    validate_enum_value::<IncidentStatus>(value, "invalid_status")
}

pub fn validate_alert_severity(value: &str) -> Result<(), ValidationError> {
    validate_enum_value::<AlertSeverity>(value, "invalid_severity")
}

pub fn validate_alert_status(value: &str) -> Result<(), ValidationError> {
    validate_enum_value::<AlertStatus>(value, "invalid_status")
}

pub fn validate_device_type(value: &str) -> Result<(), ValidationError> {
    validate_enum_value::<DeviceType>(value, "invalid_device_type")
}

pub fn validate_device_status(value: &str) -> Result<(), ValidationError> {
    validate_enum_value::<DeviceStatus>(value, "invalid_status")
}

// =============================================================================
// テスト
// =============================================================================
