// src/domain/mod.rs
pub mod string_enum;

pub mod alert_model;
pub mod alert_status;
pub mod device_model;
pub mod device_status;
pub mod incident_alert_model;
pub mod incident_comment_model;
pub mod incident_model;
pub mod incident_status;
