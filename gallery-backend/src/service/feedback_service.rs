// gallery-backend/src/service/feedback_service.rs

use crate::db::DbPool;
use crate::domain::feedback_model;
use crate::error::AppResult;
use crate::repository::feedback_repository::{CreateFeedback, FeedbackRepository};
use std::sync::Arc;
use tracing::info;

pub struct FeedbackService {
    feedback_repo: Arc<FeedbackRepository>,
}

impl FeedbackService {
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            feedback_repo: Arc::new(FeedbackRepository::new(db_pool)),
        }
    }

    pub async fn submit(&self, data: CreateFeedback) -> AppResult<feedback_model::Model> {
        let feedback = self.feedback_repo.create(data).await?;
        info!(feedback_id = feedback.id, "Feedback submitted");
        Ok(feedback)
    }
}
