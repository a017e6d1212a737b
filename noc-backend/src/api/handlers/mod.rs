// src/api/handlers/mod.rs
pub mod alert_handler;
pub mod device_handler;
pub mod incident_handler;
pub mod report_handler;
pub mod system_handler;
