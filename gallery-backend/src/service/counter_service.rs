// gallery-backend/src/service/counter_service.rs

use crate::db::DbPool;
use crate::domain::counter_model;
use crate::error::AppResult;
use crate::repository::counter_repository::{CounterRepository, CreateCounter};
use std::sync::Arc;
use tracing::debug;

pub struct CounterService {
    counter_repo: Arc<CounterRepository>,
}

impl CounterService {
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            counter_repo: Arc::new(CounterRepository::new(db_pool)),
        }
    }

    /// 閲覧イベントを記録
    pub async fn record_visit(&self, data: CreateCounter) -> AppResult<counter_model::Model> {
        let counter = self.counter_repo.create(data).await?;
        debug!(counter_id = counter.id, path = %counter.path, "Visit recorded");
        Ok(counter)
    }

    /// ユニーク訪問者数
    pub async fn count_visitors(&self) -> AppResult<i64> {
        Ok(self.counter_repo.count_distinct_users().await?)
    }
}
