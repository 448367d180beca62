// gallery-backend/src/repository/counter_repository.rs

use crate::domain::counter_model::{self, ActiveModel as CounterActiveModel, Entity as CounterEntity};
use sea_orm::sea_query::Expr;
use sea_orm::{entity::*, ColumnTrait, DbConn, DbErr, QueryFilter, QuerySelect, Set};

/// 閲覧イベント登録時の入力
#[derive(Debug, Clone)]
pub struct CreateCounter {
    pub session_id: String,
    pub user_id: String,
    pub device_info: Option<String>,
    pub path: String,
}

pub struct CounterRepository {
    db: DbConn,
}

impl CounterRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn create(&self, data: CreateCounter) -> Result<counter_model::Model, DbErr> {
        let counter = CounterActiveModel {
            session_id: Set(data.session_id),
            user_id: Set(data.user_id),
            device_info: Set(data.device_info),
            path: Set(data.path),
            ..CounterActiveModel::new()
        };

        counter.insert(&self.db).await
    }

    /// ユニーク訪問者数 `COUNT(DISTINCT user_id)`
    pub async fn count_distinct_users(&self) -> Result<i64, DbErr> {
        let count = CounterEntity::find()
            .select_only()
            .column_as(Expr::col(counter_model::Column::UserId).count_distinct(), "count")
            .filter(counter_model::Column::DeletedAt.is_null())
            .into_tuple::<i64>()
            .one(&self.db)
            .await?;

        Ok(count.unwrap_or(0))
    }
}
