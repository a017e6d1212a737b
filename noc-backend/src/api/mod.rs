// noc-backend/src/api/mod.rs
use crate::config::AppConfig;
use crate::db::DbPool;
use crate::logging::{inject_request_context, logging_middleware};
use crate::service::{
    alert_service::AlertService, device_service::DeviceService,
    incident_service::IncidentService, report_service::ReportService,
};
use axum::{http::HeaderValue, middleware as axum_middleware, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

pub mod dto;
pub mod handlers;

use handlers::{
    alert_handler::alert_router, device_handler::device_router,
    incident_handler::incident_router, report_handler::report_router,
    system_handler::system_router,
};

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub device_service: Arc<DeviceService>,
    pub alert_service: Arc<AlertService>,
    pub incident_service: Arc<IncidentService>,
    pub report_service: Arc<ReportService>,
    pub db: Arc<DatabaseConnection>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db_pool: DbPool, config: AppConfig) -> Self {
        Self {
            device_service: Arc::new(DeviceService::new(db_pool.clone())),
            alert_service: Arc::new(AlertService::new(db_pool.clone())),
            incident_service: Arc::new(IncidentService::new(db_pool.clone())),
            report_service: Arc::new(ReportService::new(db_pool.clone())),
            db: Arc::new(db_pool),
            config: Arc::new(config),
        }
    }
}

/// 全ルートを組み立てる。業務APIは `/api` 配下
pub fn app_router(app_state: AppState) -> Router {
    let cors = cors_layer(&app_state.config);

    let api = Router::new()
        .merge(device_router(app_state.clone()))
        .merge(alert_router(app_state.clone()))
        .merge(incident_router(app_state.clone()))
        .merge(report_router(app_state.clone()));

    Router::new()
        .merge(system_router(app_state))
        .nest("/api", api)
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(axum_middleware::from_fn(inject_request_context))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}
