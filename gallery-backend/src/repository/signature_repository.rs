// gallery-backend/src/repository/signature_repository.rs

use crate::domain::signature_model::{
    self, ActiveModel as SignatureActiveModel, Entity as SignatureEntity,
};
use sea_orm::{
    entity::*, ColumnTrait, DbConn, DbErr, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

#[derive(Debug, Clone)]
pub struct CreateSignature {
    pub user_id: String,
    pub file_name: Option<String>,
    pub name: Option<String>,
    pub content: Option<String>,
}

pub struct SignatureRepository {
    db: DbConn,
}

impl SignatureRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn create(&self, data: CreateSignature) -> Result<signature_model::Model, DbErr> {
        let signature = SignatureActiveModel {
            user_id: Set(data.user_id),
            file_name: Set(data.file_name),
            name: Set(data.name),
            content: Set(data.content),
            ..SignatureActiveModel::new()
        };

        signature.insert(&self.db).await
    }

    pub async fn find_all(&self) -> Result<Vec<signature_model::Model>, DbErr> {
        SignatureEntity::find()
            .filter(signature_model::Column::DeletedAt.is_null())
            .order_by_asc(signature_model::Column::CreatedAt)
            .order_by_asc(signature_model::Column::Id)
            .all(&self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        SignatureEntity::find()
            .filter(signature_model::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
    }
}
