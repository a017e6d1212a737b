// noc-backend/src/api/handlers/system_handler.rs
use crate::api::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Router};
use tracing::error;

pub async fn root_handler() -> &'static str {
    "NOC API Server is running"
}

/// データベースに到達できなければ 503
pub async fn health_handler(State(app_state): State<AppState>) -> (StatusCode, &'static str) {
    match app_state.db.ping().await {
        Ok(()) => (StatusCode::OK, "OK"),
        Err(e) => {
            error!(error = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "Database unavailable")
        }
    }
}

pub fn system_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .with_state(app_state)
}
