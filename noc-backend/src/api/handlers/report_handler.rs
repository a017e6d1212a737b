// noc-backend/src/api/handlers/report_handler.rs
use crate::api::dto::report_dto::{
    AlertStatsDto, DetailedReportDto, DetailedReportQuery, DeviceStatusReportDto,
    IncidentStatsDto,
};
use crate::api::AppState;
use crate::error::AppResult;
use axum::{
    extract::{Json, Query, State},
    routing::get,
    Router,
};

pub async fn alert_stats_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<AlertStatsDto>> {
    Ok(Json(app_state.report_service.alert_stats().await?))
}

pub async fn incident_stats_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<IncidentStatsDto>> {
    Ok(Json(app_state.report_service.incident_stats().await?))
}

pub async fn device_status_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<DeviceStatusReportDto>> {
    Ok(Json(app_state.report_service.device_status().await?))
}

pub async fn detailed_report_handler(
    State(app_state): State<AppState>,
    Query(query): Query<DetailedReportQuery>,
) -> AppResult<Json<DetailedReportDto>> {
    Ok(Json(app_state.report_service.detailed(query).await?))
}

pub fn report_router(app_state: AppState) -> Router {
    Router::new()
        .route("/reports/alert-stats", get(alert_stats_handler))
        .route("/reports/incident-stats", get(incident_stats_handler))
        .route("/reports/device-status", get(device_status_handler))
        .route("/reports/detailed", get(detailed_report_handler))
        .with_state(app_state)
}
