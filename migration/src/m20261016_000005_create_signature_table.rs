use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Signature::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Signature::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Signature::UserId).string().not_null())
                    .col(ColumnDef::new(Signature::FileName).string_len(70))
                    .col(ColumnDef::new(Signature::Name).string_len(30))
                    .col(ColumnDef::new(Signature::Content).text())
                    .col(
                        ColumnDef::new(Signature::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Signature::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Signature::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Signature::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Signature {
    Table,
    Id,
    UserId,
    FileName,
    Name,
    Content,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
