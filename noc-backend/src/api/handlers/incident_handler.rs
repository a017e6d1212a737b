// noc-backend/src/api/handlers/incident_handler.rs
use crate::api::dto::incident_dto::{
    CommentDto, CreateCommentDto, CreateIncidentDto, IncidentDetailDto, IncidentDto,
    UpdateIncidentDto,
};
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

pub async fn list_incidents_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<Vec<IncidentDto>>> {
    let incidents = app_state.incident_service.list_incidents().await?;
    Ok(Json(incidents))
}

pub async fn get_incident_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<IncidentDetailDto>> {
    let incident = app_state.incident_service.get_incident(id).await?;
    Ok(Json(incident))
}

pub async fn create_incident_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateIncidentDto>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "incident_handler::create_incident"))?;

    info!(
        title = %payload.title,
        priority = %payload.priority,
        device_id = ?payload.device_id,
        alert_count = payload.alert_ids.len(),
        "Creating incident"
    );

    let incident = app_state.incident_service.create_incident(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(
            "Incident created successfully",
            CreatedId::IncidentId(incident.id),
        )),
    ))
}

pub async fn update_incident_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    Json(payload): Json<UpdateIncidentDto>,
) -> AppResult<Json<MessageResponse>> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "incident_handler::update_incident"))?;

    app_state.incident_service.update_incident(id, payload).await?;

    Ok(Json(MessageResponse::new("Incident updated successfully")))
}

pub async fn add_comment_handler(
    State(app_state): State<AppState>,
    IdPath(incident_id): IdPath,
    Json(payload): Json<CreateCommentDto>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "incident_handler::add_comment"))?;

    let comment = app_state
        .incident_service
        .add_comment(incident_id, payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(
            "Comment added successfully",
            CreatedId::CommentId(comment.id),
        )),
    ))
}

pub async fn list_comments_handler(
    State(app_state): State<AppState>,
    IdPath(incident_id): IdPath,
) -> AppResult<Json<Vec<CommentDto>>> {
    let comments = app_state
        .incident_service
        .list_comments(incident_id)
        .await?;
    Ok(Json(comments))
}

pub fn incident_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/incidents",
            get(list_incidents_handler).post(create_incident_handler),
        )
        .route(
            "/incidents/{id}",
            get(get_incident_handler).put(update_incident_handler),
        )
        .route(
            "/incidents/{id}/comments",
            get(list_comments_handler).post(add_comment_handler),
        )
        .with_state(app_state)
}
