// gallery-backend/src/api/handlers/counter_handler.rs

use crate::api::dto::counter_dto::{CounterBody, CreateCounterRequest};
use crate::api::dto::system_dto::CountsBody;
use crate::api::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::session::SessionContext;
use crate::repository::counter_repository::CreateCounter;
use crate::types::ApiResponse;
use crate::utils::error_helper::{check_request_error, json_rejection_error};
use crate::utils::validation::non_blank;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Extension, Json, Router,
};
use validator::Validate;

/// 訪問者数（ユーザーIDの重複を除く）
pub async fn count_visitors_handler(
    State(app_state): State<AppState>,
) -> AppResult<ApiResponse<CountsBody>> {
    let counts = app_state.counter_service.count_visitors().await?;
    Ok(ApiResponse::success(CountsBody { counts }))
}

/// ページ訪問の記録
pub async fn record_visit_handler(
    State(app_state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    payload: Result<Json<CreateCounterRequest>, JsonRejection>,
) -> AppResult<ApiResponse<CounterBody>> {
    let Json(payload) = payload.map_err(json_rejection_error)?;

    let user_id = non_blank(payload.user_id.clone()).ok_or(AppError::EmptyUserId)?;
    let path =
        non_blank(payload.path.clone()).ok_or_else(|| check_request_error("path", "is required"))?;
    payload.validate()?;

    let counter = app_state
        .counter_service
        .record_visit(CreateCounter {
            session_id: session.session_id,
            user_id,
            device_info: payload.device_info,
            path,
        })
        .await?;

    Ok(ApiResponse::success(CounterBody {
        counter: counter.into(),
    }))
}

pub fn counter_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/counter",
            get(count_visitors_handler).post(record_visit_handler),
        )
        .with_state(app_state)
}
