// gallery-backend/src/api/mod.rs

use crate::api::handlers::{
    artist_handler::artist_router, artwork_handler::artwork_router,
    counter_handler::counter_router, feedback_handler::feedback_router,
    signature_handler::signature_router,
    system_handler::{route_not_found_handler, system_router},
};
use crate::config::AppConfig;
use crate::db::DbPool;
use crate::domain::reference_data::ReferenceData;
use crate::logging::{inject_request_context, logging_middleware};
use crate::middleware::error_detail::error_detail_middleware;
use crate::middleware::security::{cors_layer, security_headers_middleware};
use crate::middleware::session::{session_middleware, SessionConfig};
use crate::service::{
    artist_service::ArtistService, artwork_service::ArtworkService,
    counter_service::CounterService, feedback_service::FeedbackService,
    signature_service::SignatureService,
    storage_service::{StorageBackend, StorageService},
};
use axum::handler::HandlerWithoutStateExt;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::Router;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod handlers;

/// 統一されたアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub artist_service: Arc<ArtistService>,
    pub artwork_service: Arc<ArtworkService>,
    pub counter_service: Arc<CounterService>,
    pub feedback_service: Arc<FeedbackService>,
    pub signature_service: Arc<SignatureService>,
    pub session_config: SessionConfig,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// 起動時に一度だけ選ばれたストレージを全サービスで共有する
    pub fn new(
        db_pool: DbPool,
        storage: Arc<dyn StorageService>,
        reference: Arc<ReferenceData>,
        config: AppConfig,
    ) -> Self {
        let bulk_concurrency = config.server.bulk_concurrency;

        Self {
            artist_service: Arc::new(ArtistService::new(
                db_pool.clone(),
                storage.clone(),
                reference.clone(),
                bulk_concurrency,
            )),
            artwork_service: Arc::new(ArtworkService::new(
                db_pool.clone(),
                storage.clone(),
                reference,
                bulk_concurrency,
            )),
            counter_service: Arc::new(CounterService::new(db_pool.clone())),
            feedback_service: Arc::new(FeedbackService::new(db_pool.clone())),
            signature_service: Arc::new(SignatureService::new(
                db_pool,
                storage,
                config.security.admin_secret.clone(),
            )),
            session_config: SessionConfig::new(
                &config.security.cookie_secret,
                config.security.cookie_secure,
            ),
            config: Arc::new(config),
        }
    }
}

/// 全ルートとミドルウェアを組み立てる
pub fn create_router(app_state: AppState) -> Router {
    let config = app_state.config.clone();
    let session_config = app_state.session_config.clone();

    let router = Router::new()
        .merge(system_router(app_state.clone()))
        .merge(counter_router(app_state.clone()))
        .merge(feedback_router(app_state.clone()))
        .merge(artist_router(app_state.clone()))
        .merge(artwork_router(app_state.clone()))
        .merge(signature_router(app_state))
        // 既存パスへの未対応メソッドも未定義ルートとして扱う
        .method_not_allowed_fallback(route_not_found_handler);

    // ローカル保存時は保存した画像をそのまま配信する
    let router = match config.storage.backend {
        StorageBackend::Local => router.fallback_service(
            ServeDir::new(&config.storage.public_dir)
                .call_fallback_on_method_not_allowed(true)
                .not_found_service(route_not_found_handler.into_service()),
        ),
        StorageBackend::S3 => router.fallback(route_not_found_handler),
    };

    router
        .layer(from_fn_with_state(config.clone(), error_detail_middleware))
        .layer(from_fn(logging_middleware))
        .layer(from_fn_with_state(session_config, session_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors_layer(&config))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(inject_request_context))
}
