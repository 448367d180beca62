// gallery-backend/src/api/handlers/feedback_handler.rs

use crate::api::dto::feedback_dto::{CreateFeedbackRequest, FeedbackBody};
use crate::api::AppState;
use crate::error::{AppError, AppResult};
use crate::repository::feedback_repository::CreateFeedback;
use crate::types::ApiResponse;
use crate::utils::error_helper::{check_request_error, json_rejection_error};
use crate::utils::validation::non_blank;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use validator::Validate;

/// フィードバック送信
pub async fn submit_feedback_handler(
    State(app_state): State<AppState>,
    payload: Result<Json<CreateFeedbackRequest>, JsonRejection>,
) -> AppResult<ApiResponse<FeedbackBody>> {
    let Json(payload) = payload.map_err(json_rejection_error)?;

    let user_id = non_blank(payload.user_id.clone()).ok_or(AppError::EmptyUserId)?;
    let email =
        non_blank(payload.email.clone()).ok_or_else(|| check_request_error("email", "is required"))?;
    let content = non_blank(payload.content.clone())
        .ok_or_else(|| check_request_error("content", "is required"))?;
    payload.validate()?;

    let feedback = app_state
        .feedback_service
        .submit(CreateFeedback {
            user_id,
            email,
            content,
        })
        .await?;

    Ok(ApiResponse::success(FeedbackBody {
        feedback: feedback.into(),
    }))
}

pub fn feedback_router(app_state: AppState) -> Router {
    Router::new()
        .route("/v1/feedback", post(submit_feedback_handler))
        .with_state(app_state)
}
