// noc-backend/src/utils/validation.rs

//! リクエストDTOのバリデーション
pub mod common;

pub use common::{
    validate_alert_severity, validate_alert_status, validate_device_status, validate_device_type,
    validate_incident_priority, validate_incident_status, validate_not_empty_or_whitespace,
    validate_title,
};
