// noc-backend/src/api/dto/mod.rs
pub mod alert_dto;
pub mod common;
pub mod device_dto;
pub mod incident_dto;
pub mod report_dto;

// Re-export common response types
pub use common::{CreatedId, CreatedResponse, MessageResponse};
