// gallery-backend/src/api/dto/feedback_dto.rs

use crate::domain::feedback_model::Model as Feedback;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// フィードバック送信リクエスト
///
/// 未指定項目はハンドラー側でエラーコードを分けるため `Option` で受ける。
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackRequest {
    #[validate(length(max = 255, message = "User ID cannot exceed 255 characters"))]
    pub user_id: Option<String>,

    #[validate(
        email(message = "Invalid email format"),
        length(max = 255, message = "Email cannot exceed 255 characters")
    )]
    pub email: Option<String>,

    #[validate(length(max = 500, message = "Content cannot exceed 500 characters"))]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackDto {
    pub id: i32,
    pub user_id: String,
    pub email: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Feedback> for FeedbackDto {
    fn from(feedback: Feedback) -> Self {
        Self {
            id: feedback.id,
            user_id: feedback.user_id,
            email: feedback.email,
            content: feedback.content,
            created_at: feedback.created_at,
            updated_at: feedback.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FeedbackBody {
    pub feedback: FeedbackDto,
}
