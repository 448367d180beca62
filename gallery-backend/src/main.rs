// src/main.rs
use std::sync::Arc;
use tokio::net::TcpListener;

use gallery_backend::api::{create_router, AppState};
use gallery_backend::config::AppConfig;
use gallery_backend::db::{create_db_pool, run_migrations};
use gallery_backend::domain::reference_data::ReferenceData;
use gallery_backend::logging::init_tracing;
use gallery_backend::service::storage_service::create_storage_service;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env があれば読み込む
    dotenvy::dotenv().ok();

    init_tracing();
    tracing::info!("Starting Gallery Backend server...");

    // 設定を読み込む
    let app_config = AppConfig::from_env()?;
    tracing::info!(
        environment = app_config.environment.as_str(),
        storage = ?app_config.storage.backend,
        "Configuration loaded"
    );

    // データベース接続とスキーマ
    let db_pool = create_db_pool(&app_config).await?;
    run_migrations(&db_pool).await?;
    tracing::info!("Database pool created and migrations applied.");

    let reference = Arc::new(ReferenceData::load(&app_config.reference_data_dir).await?);
    let storage = create_storage_service(&app_config.storage).await?;

    let server_addr = app_config.server_addr();
    let app_state = AppState::new(db_pool, storage, reference, app_config);
    let app_router = create_router(app_state);

    tracing::info!("Router configured. Server listening on {}", server_addr);

    let listener = TcpListener::bind(&server_addr).await?;
    axum::serve(listener, app_router.into_make_service()).await?;

    Ok(())
}
