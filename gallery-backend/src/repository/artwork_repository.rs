// gallery-backend/src/repository/artwork_repository.rs

use crate::domain::artwork_model::{
    self, ActiveModel as ArtworkActiveModel, Entity as ArtworkEntity,
};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    entity::*, ColumnTrait, ConnectionTrait, DbBackend, DbConn, DbErr, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Set, Statement,
};

/// 作品登録時の入力
#[derive(Debug, Clone)]
pub struct CreateArtwork {
    /// 参照データから決まる場合のみ指定。`None` なら採番される
    pub id: Option<i32>,
    pub file_name: Option<String>,
    pub artist_id: i32,
    pub artist_name: String,
    pub title: String,
    pub size: String,
    pub material: String,
}

/// 作品更新時の入力（`Some` の項目だけ書き込む）
#[derive(Debug, Clone, Default)]
pub struct UpdateArtwork {
    pub title: Option<String>,
    pub size: Option<String>,
    pub material: Option<String>,
}

pub struct ArtworkRepository {
    db: DbConn,
}

impl ArtworkRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn create(&self, data: CreateArtwork) -> Result<artwork_model::Model, DbErr> {
        let artwork = ArtworkActiveModel {
            id: data.id.map_or(NotSet, Set),
            file_name: Set(data.file_name),
            artist_id: Set(data.artist_id),
            artist_name: Set(data.artist_name),
            title: Set(data.title),
            size: Set(data.size),
            material: Set(data.material),
            ..ArtworkActiveModel::new()
        };

        artwork.insert(&self.db).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<artwork_model::Model>, DbErr> {
        ArtworkEntity::find()
            .filter(artwork_model::Column::Id.eq(id))
            .filter(artwork_model::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
    }

    /// 指定IDのうち既に使われているもの（論理削除済みを含む）
    pub async fn find_existing_ids_including_deleted(&self, ids: &[i32]) -> Result<Vec<i32>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        ArtworkEntity::find()
            .select_only()
            .column(artwork_model::Column::Id)
            .filter(artwork_model::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(artwork_model::Column::Id)
            .into_tuple::<i32>()
            .all(&self.db)
            .await
    }

    pub async fn find_all(&self) -> Result<Vec<artwork_model::Model>, DbErr> {
        ArtworkEntity::find()
            .filter(artwork_model::Column::DeletedAt.is_null())
            .order_by_asc(artwork_model::Column::CreatedAt)
            .order_by_asc(artwork_model::Column::Id)
            .all(&self.db)
            .await
    }

    /// 指定された項目のみ更新。作品が存在しなければ `None`
    pub async fn update(
        &self,
        id: i32,
        data: UpdateArtwork,
    ) -> Result<Option<artwork_model::Model>, DbErr> {
        let Some(artwork) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active_model: ArtworkActiveModel = artwork.into();

        if let Some(title) = data.title {
            active_model.title = Set(title);
        }
        if let Some(size) = data.size {
            active_model.size = Set(size);
        }
        if let Some(material) = data.material {
            active_model.material = Set(material);
        }

        active_model.update(&self.db).await.map(Some)
    }

    /// 論理削除。対象がなければ `false`
    pub async fn soft_delete(&self, id: i32) -> Result<bool, DbErr> {
        let now = Utc::now();
        let result = ArtworkEntity::update_many()
            .col_expr(artwork_model::Column::DeletedAt, Expr::value(now))
            .col_expr(artwork_model::Column::UpdatedAt, Expr::value(now))
            .filter(artwork_model::Column::Id.eq(id))
            .filter(artwork_model::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// ID指定で挿入した後、シーケンスを `MAX(id)` の次に進める
    pub async fn sync_id_sequence(&self) -> Result<(), DbErr> {
        self.db
            .execute(Statement::from_string(
                DbBackend::Postgres,
                "SELECT setval(pg_get_serial_sequence('artwork', 'id'), \
                 COALESCE((SELECT MAX(id) FROM artwork), 0) + 1, false)",
            ))
            .await?;
        Ok(())
    }
}
