// gallery-backend/src/repository/artist_repository.rs

use crate::domain::artist_model::{self, ActiveModel as ArtistActiveModel, Entity as ArtistEntity};
use crate::domain::artwork_model::{self, Entity as ArtworkEntity};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    entity::*, ColumnTrait, DbConn, DbErr, LoaderTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

pub type ArtistWithArtworks = (artist_model::Model, Vec<artwork_model::Model>);

/// 作家登録時の入力
#[derive(Debug, Clone, Default)]
pub struct CreateArtist {
    pub id: i32,
    pub artist_name: Option<String>,
    pub detail: Option<String>,
    pub thumb_file_name: Option<String>,
    pub landscape_file_name: Option<String>,
    pub portrait_file_name: Option<String>,
    pub profile_file_name: Option<String>,
}

/// 作家更新時の入力（`Some` の項目だけ書き込む）
#[derive(Debug, Clone, Default)]
pub struct UpdateArtist {
    pub artist_name: Option<String>,
    pub detail: Option<String>,
    pub thumb_file_name: Option<String>,
    pub landscape_file_name: Option<String>,
    pub portrait_file_name: Option<String>,
    pub profile_file_name: Option<String>,
}

pub struct ArtistRepository {
    db: DbConn,
}

impl ArtistRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn create(&self, data: CreateArtist) -> Result<artist_model::Model, DbErr> {
        let artist = ArtistActiveModel {
            id: Set(data.id),
            artist_name: Set(data.artist_name),
            detail: Set(data.detail),
            thumb_file_name: Set(data.thumb_file_name),
            landscape_file_name: Set(data.landscape_file_name),
            portrait_file_name: Set(data.portrait_file_name),
            profile_file_name: Set(data.profile_file_name),
            ..ArtistActiveModel::new()
        };

        artist.insert(&self.db).await
    }

    /// 論理削除されていない作家を取得
    pub async fn find_by_id(&self, id: i32) -> Result<Option<artist_model::Model>, DbErr> {
        ArtistEntity::find()
            .filter(artist_model::Column::Id.eq(id))
            .filter(artist_model::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
    }

    /// 論理削除済みも含めてIDが使われているか
    pub async fn exists_including_deleted(&self, id: i32) -> Result<bool, DbErr> {
        let count = ArtistEntity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    /// 指定IDのうち既に使われているもの（論理削除済みを含む）
    pub async fn find_existing_ids_including_deleted(&self, ids: &[i32]) -> Result<Vec<i32>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        ArtistEntity::find()
            .select_only()
            .column(artist_model::Column::Id)
            .filter(artist_model::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(artist_model::Column::Id)
            .into_tuple::<i32>()
            .all(&self.db)
            .await
    }

    /// 指定IDのうち有効な作家
    pub async fn find_active_by_ids(&self, ids: &[i32]) -> Result<Vec<artist_model::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        ArtistEntity::find()
            .filter(artist_model::Column::Id.is_in(ids.iter().copied()))
            .filter(artist_model::Column::DeletedAt.is_null())
            .order_by_asc(artist_model::Column::Id)
            .all(&self.db)
            .await
    }

    /// 登録順に全作家を取得
    pub async fn find_all(&self) -> Result<Vec<artist_model::Model>, DbErr> {
        ArtistEntity::find()
            .filter(artist_model::Column::DeletedAt.is_null())
            .order_by_asc(artist_model::Column::CreatedAt)
            .order_by_asc(artist_model::Column::Id)
            .all(&self.db)
            .await
    }

    /// 全作家と、それぞれの有効な作品
    pub async fn find_all_with_artworks(&self) -> Result<Vec<ArtistWithArtworks>, DbErr> {
        let artists = self.find_all().await?;
        let artworks = artists
            .load_many(active_artworks(), &self.db)
            .await?;

        Ok(artists.into_iter().zip(artworks).collect())
    }

    pub async fn find_by_id_with_artworks(
        &self,
        id: i32,
    ) -> Result<Option<ArtistWithArtworks>, DbErr> {
        let Some(artist) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let artworks = active_artworks()
            .filter(artwork_model::Column::ArtistId.eq(artist.id))
            .all(&self.db)
            .await?;

        Ok(Some((artist, artworks)))
    }

    /// 指定された項目のみ更新。作家が存在しなければ `None`
    pub async fn update(
        &self,
        id: i32,
        data: UpdateArtist,
    ) -> Result<Option<artist_model::Model>, DbErr> {
        let Some(artist) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active_model: ArtistActiveModel = artist.into();

        if let Some(artist_name) = data.artist_name {
            active_model.artist_name = Set(Some(artist_name));
        }
        if let Some(detail) = data.detail {
            active_model.detail = Set(Some(detail));
        }
        if let Some(thumb_file_name) = data.thumb_file_name {
            active_model.thumb_file_name = Set(Some(thumb_file_name));
        }
        if let Some(landscape_file_name) = data.landscape_file_name {
            active_model.landscape_file_name = Set(Some(landscape_file_name));
        }
        if let Some(portrait_file_name) = data.portrait_file_name {
            active_model.portrait_file_name = Set(Some(portrait_file_name));
        }
        if let Some(profile_file_name) = data.profile_file_name {
            active_model.profile_file_name = Set(Some(profile_file_name));
        }

        active_model.update(&self.db).await.map(Some)
    }

    /// `hit_count + 1`。対象がなければ `false`
    pub async fn increment_hit_count(&self, id: i32) -> Result<bool, DbErr> {
        self.increment(id, artist_model::Column::HitCount).await
    }

    /// `see_more_count + 1`。対象がなければ `false`
    pub async fn increment_see_more_count(&self, id: i32) -> Result<bool, DbErr> {
        self.increment(id, artist_model::Column::SeeMoreCount).await
    }

    // 読み取りを挟まない単一のUPDATE文
    async fn increment(&self, id: i32, column: artist_model::Column) -> Result<bool, DbErr> {
        let result = ArtistEntity::update_many()
            .col_expr(column, Expr::col(column).add(1))
            .col_expr(artist_model::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(artist_model::Column::Id.eq(id))
            .filter(artist_model::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// 論理削除。対象がなければ `false`
    pub async fn soft_delete(&self, id: i32) -> Result<bool, DbErr> {
        let now = Utc::now();
        let result = ArtistEntity::update_many()
            .col_expr(artist_model::Column::DeletedAt, Expr::value(now))
            .col_expr(artist_model::Column::UpdatedAt, Expr::value(now))
            .filter(artist_model::Column::Id.eq(id))
            .filter(artist_model::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

fn active_artworks() -> sea_orm::Select<ArtworkEntity> {
    ArtworkEntity::find()
        .filter(artwork_model::Column::DeletedAt.is_null())
        .order_by_asc(artwork_model::Column::CreatedAt)
        .order_by_asc(artwork_model::Column::Id)
}
