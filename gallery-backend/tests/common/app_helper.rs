// tests/common/app_helper.rs

use crate::common::db::TestDatabase;
use crate::common::init_test_env;
use crate::common::mock_storage::MockStorageService;
use axum::Router;
use gallery_backend::api::{create_router, AppState};
use gallery_backend::config::AppConfig;
use gallery_backend::domain::reference_data::ReferenceData;
use gallery_backend::service::storage_service::StorageBackend;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// ルーター・DB・ストレージをまとめたテスト用アプリ
pub struct TestApp {
    pub router: Router,
    pub storage: MockStorageService,
    pub db: TestDatabase,
}

impl TestApp {
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db.connection
    }
}

pub async fn setup_app() -> TestApp {
    setup_app_with_reference(ReferenceData::default()).await
}

/// テスト用の設定（静的配信ではなく404を返す構成にする）
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::for_testing();
    config.storage.backend = StorageBackend::S3;
    config
}

/// 一括登録用の参照データを指定してアプリを起動
pub async fn setup_app_with_reference(reference: ReferenceData) -> TestApp {
    build_app(reference, test_config()).await
}

/// 設定を差し替えてアプリを起動
pub async fn setup_app_with_config(config: AppConfig) -> TestApp {
    build_app(ReferenceData::default(), config).await
}

async fn build_app(reference: ReferenceData, config: AppConfig) -> TestApp {
    init_test_env();

    let db = TestDatabase::new().await;
    let storage = MockStorageService::new();

    let app_state = AppState::new(
        db.connection.clone(),
        Arc::new(storage.clone()),
        Arc::new(reference),
        config,
    );

    TestApp {
        router: create_router(app_state),
        storage,
        db,
    }
}
