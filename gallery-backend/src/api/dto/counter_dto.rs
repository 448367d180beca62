// gallery-backend/src/api/dto/counter_dto.rs

use crate::domain::counter_model::Model as Counter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 訪問記録リクエスト
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCounterRequest {
    #[validate(length(max = 255, message = "User ID cannot exceed 255 characters"))]
    pub user_id: Option<String>,

    #[validate(length(max = 255, message = "Path cannot exceed 255 characters"))]
    pub path: Option<String>,

    pub device_info: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterDto {
    pub id: i32,
    pub session_id: String,
    pub user_id: String,
    pub device_info: Option<String>,
    pub path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Counter> for CounterDto {
    fn from(counter: Counter) -> Self {
        Self {
            id: counter.id,
            session_id: counter.session_id,
            user_id: counter.user_id,
            device_info: counter.device_info,
            path: counter.path,
            created_at: counter.created_at,
            updated_at: counter.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CounterBody {
    pub counter: CounterDto,
}
