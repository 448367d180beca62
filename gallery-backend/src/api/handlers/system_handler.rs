// gallery-backend/src/api/handlers/system_handler.rs

use crate::api::dto::system_dto::VersionBody;
use crate::api::AppState;
use crate::error::AppError;
use crate::types::ApiResponse;
use axum::{http::Uri, routing::get, Router};

/// APIバージョン
pub async fn version_handler() -> ApiResponse<VersionBody> {
    ApiResponse::success(VersionBody {
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// どのルートにも一致しないリクエスト
pub async fn route_not_found_handler(uri: Uri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}

pub fn system_router(app_state: AppState) -> Router {
    Router::new()
        .route("/v1", get(version_handler))
        .route("/v1/", get(version_handler))
        .with_state(app_state)
}
