// noc-backend/src/api/handlers/device_handler.rs
use crate::api::dto::device_dto::{DeviceDto, DeviceRequestDto};
use crate::api::dto::{CreatedId, CreatedResponse, MessageResponse};
use crate::api::AppState;
use crate::error::AppResult;
use crate::extractors::IdPath;
use crate::utils::error_helper::convert_validation_errors;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use tracing::info;
use validator::Validate;

pub async fn list_devices_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<Vec<DeviceDto>>> {
    let devices = app_state.device_service.list_devices().await?;
    Ok(Json(devices))
}

pub async fn get_device_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<DeviceDto>> {
    let device = app_state.device_service.get_device(id).await?;
    Ok(Json(device))
}

pub async fn create_device_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<DeviceRequestDto>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "device_handler::create_device"))?;

    info!(name = %payload.name, ip_address = %payload.ip_address, "Registering device");

    let device = app_state.device_service.create_device(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(
            "Device added successfully",
            CreatedId::DeviceId(device.id),
        )),
    ))
}

pub async fn update_device_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    Json(payload): Json<DeviceRequestDto>,
) -> AppResult<Json<MessageResponse>> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "device_handler::update_device"))?;

    app_state.device_service.update_device(id, payload).await?;

    info!(device_id = id, "Device updated");
    Ok(Json(MessageResponse::new("Device updated successfully")))
}

pub async fn delete_device_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<MessageResponse>> {
    app_state.device_service.delete_device(id).await?;
    Ok(Json(MessageResponse::new("Device deleted successfully")))
}

pub fn device_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/devices",
            get(list_devices_handler).post(create_device_handler),
        )
        .route(
            "/devices/{id}",
            get(get_device_handler)
                .put(update_device_handler)
                .delete(delete_device_handler),
        )
        .with_state(app_state)
}
