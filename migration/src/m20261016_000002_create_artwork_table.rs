use sea_orm_migration::prelude::*;

use super::m20261016_000001_create_artist_table::Artist;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Artwork::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Artwork::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Artwork::FileName).string_len(70))
                    .col(ColumnDef::new(Artwork::ArtistId).integer().not_null())
                    .col(ColumnDef::new(Artwork::ArtistName).string().not_null())
                    .col(ColumnDef::new(Artwork::Title).string().not_null())
                    .col(ColumnDef::new(Artwork::Size).string().not_null())
                    .col(ColumnDef::new(Artwork::Material).string().not_null())
                    .col(
                        ColumnDef::new(Artwork::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Artwork::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Artwork::DeletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_artwork_artist_id")
                            .from(Artwork::Table, Artwork::ArtistId)
                            .to(Artist::Table, Artist::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Artwork::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Artwork {
    Table,
    Id,
    FileName,
    ArtistId,
    ArtistName,
    Title,
    Size,
    Material,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
