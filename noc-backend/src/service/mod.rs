// src/service/mod.rs
pub mod alert_service;
pub mod device_service;
pub mod incident_service;
pub mod report_service;
