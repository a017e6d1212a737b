// src/main.rs
use migration::{Migrator, MigratorTrait};
use noc_backend::config::AppConfig;
use noc_backend::db::create_db_pool;
use noc_backend::{app_router, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "noc_backend=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting NOC backend server...");

    // 設定を読み込む
    let app_config = AppConfig::from_env()?;
    tracing::info!(
        environment = %app_config.environment,
        server_addr = %app_config.server_addr(),
        max_connections = app_config.pool.max_connections,
        "Configuration loaded"
    );

    // データベース接続プールを作成
    let db_pool = create_db_pool(&app_config).await?;
    tracing::info!("Database pool created successfully.");

    // 起動時にマイグレーションを適用
    Migrator::up(&db_pool, None).await?;
    tracing::info!("Database migrations applied.");

    let server_addr = app_config.server_addr();
    let app = app_router(AppState::new(db_pool.clone(), app_config));

    let listener = TcpListener::bind(&server_addr).await?;
    tracing::info!("Router configured. Server listening on {}", server_addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 処理中のリクエストが終わってからプールを閉じる
    db_pool.close().await?;
    tracing::info!("Database pool closed. Bye.");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
