// src/repository/mod.rs
pub mod alert_repository;
pub mod device_repository;
pub mod incident_comment_repository;
pub mod incident_repository;
pub mod report_repository;
