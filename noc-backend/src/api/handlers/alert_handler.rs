// noc-backend/src/api/handlers/alert_handler.rs
use crate::api::dto::alert_dto::{AlertDto, CreateAlertDto, UpdateAlertStatusDto};
use crate::api::dto::{CreatedId, CreatedResponse, MessageResponse};
use crate::api::AppState;
use crate::error::AppResult;
use crate::extractors::IdPath;
use crate::utils::error_helper::convert_validation_errors;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Router,
};
use tracing::info;
use validator::Validate;

pub async fn list_alerts_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<Vec<AlertDto>>> {
    let alerts = app_state.alert_service.list_alerts().await?;
    Ok(Json(alerts))
}

pub async fn list_device_alerts_handler(
    State(app_state): State<AppState>,
    IdPath(device_id): IdPath,
) -> AppResult<Json<Vec<AlertDto>>> {
    let alerts = app_state
        .alert_service
        .list_alerts_for_device(device_id)
        .await?;
    Ok(Json(alerts))
}

pub async fn get_alert_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<AlertDto>> {
    let alert = app_state.alert_service.get_alert(id).await?;
    Ok(Json(alert))
}

pub async fn create_alert_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateAlertDto>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "alert_handler::create_alert"))?;

    let alert = app_state.alert_service.create_alert(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(
            "Alert created successfully",
            CreatedId::AlertId(alert.id),
        )),
    ))
}

pub async fn update_alert_status_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    Json(payload): Json<UpdateAlertStatusDto>,
) -> AppResult<Json<MessageResponse>> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "alert_handler::update_alert_status"))?;

    info!(alert_id = id, status = %payload.status, "Updating alert status");

    app_state
        .alert_service
        .update_alert_status(id, payload)
        .await?;

    Ok(Json(MessageResponse::new("Alert status updated successfully")))
}

pub async fn delete_alert_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<MessageResponse>> {
    app_state.alert_service.delete_alert(id).await?;
    Ok(Json(MessageResponse::new("Alert deleted successfully")))
}

pub fn alert_router(app_state: AppState) -> Router {
    Router::new()
        .route("/alerts", get(list_alerts_handler).post(create_alert_handler))
        .route(
            "/alerts/device/{device_id}",
            get(list_device_alerts_handler),
        )
        .route(
            "/alerts/{id}",
            get(get_alert_handler).delete(delete_alert_handler),
        )
        .route("/alerts/{id}/status", put(update_alert_status_handler))
        .with_state(app_state)
}
