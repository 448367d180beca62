use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Artist::Table)
                    .if_not_exists()
                    // 作家IDは呼び出し側で採番する（自動採番しない）
                    .col(
                        ColumnDef::new(Artist::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Artist::ArtistName).string())
                    .col(ColumnDef::new(Artist::Detail).text())
                    .col(ColumnDef::new(Artist::ThumbFileName).string_len(70))
                    .col(ColumnDef::new(Artist::LandscapeFileName).string_len(70))
                    .col(ColumnDef::new(Artist::PortraitFileName).string_len(70))
                    .col(ColumnDef::new(Artist::ProfileFileName).string_len(70))
                    .col(
                        ColumnDef::new(Artist::HitCount)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Artist::HitCount).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Artist::SeeMoreCount)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Artist::SeeMoreCount).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Artist::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Artist::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Artist::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Artist::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Artist {
    Table,
    Id,
    ArtistName,
    Detail,
    ThumbFileName,
    LandscapeFileName,
    PortraitFileName,
    ProfileFileName,
    HitCount,
    SeeMoreCount,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
