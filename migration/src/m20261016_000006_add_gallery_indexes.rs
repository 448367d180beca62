use sea_orm_migration::prelude::*;

use super::m20261016_000002_create_artwork_table::Artwork;
use super::m20261016_000003_create_counter_table::Counter;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 訪問者数の集計（COUNT DISTINCT user_id）用
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_counter_user_id")
                    .table(Counter::Table)
                    .col(Counter::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_artwork_artist_id")
                    .table(Artwork::Table)
                    .col(Artwork::ArtistId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_artwork_artist_id")
                    .table(Artwork::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_counter_user_id")
                    .table(Counter::Table)
                    .to_owned(),
            )
            .await
    }
}
