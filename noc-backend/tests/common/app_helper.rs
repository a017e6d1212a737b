// tests/common/app_helper.rs

use axum::Router;
use noc_backend::{app_router, config::AppConfig, AppState};

use crate::common;

/// テスト用データベースに接続したアプリのセットアップ
///
/// コンテナはテスト終了まで保持する必要があるため `TestDatabase` も返す。
pub async fn setup_app() -> (Router, common::db::TestDatabase) {
    let db = common::db::TestDatabase::new().await;
    let app_state = AppState::new(db.connection.clone(), AppConfig::for_testing());
    (app_router(app_state), db)
}
