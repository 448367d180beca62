// gallery-backend/src/repository/feedback_repository.rs

use crate::domain::feedback_model::{self, ActiveModel as FeedbackActiveModel};
use sea_orm::{entity::*, DbConn, DbErr, Set};

#[derive(Debug, Clone)]
pub struct CreateFeedback {
    pub user_id: String,
    pub email: String,
    pub content: String,
}

pub struct FeedbackRepository {
    db: DbConn,
}

impl FeedbackRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn create(&self, data: CreateFeedback) -> Result<feedback_model::Model, DbErr> {
        let feedback = FeedbackActiveModel {
            user_id: Set(data.user_id),
            email: Set(data.email),
            content: Set(data.content),
            ..FeedbackActiveModel::new()
        };

        feedback.insert(&self.db).await
    }
}
