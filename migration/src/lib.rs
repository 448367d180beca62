// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// ギャラリー基本テーブル
mod m20261016_000001_create_artist_table;
mod m20261016_000002_create_artwork_table;
mod m20261016_000003_create_counter_table;
mod m20261016_000004_create_feedback_table;
mod m20261016_000005_create_signature_table;

// インデックス
mod m20261016_000006_add_gallery_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            // 1. 作家テーブル（作品テーブルの外部キー参照先）
            Box::new(m20261016_000001_create_artist_table::Migration),
            // 2. 作家に依存するテーブル
            Box::new(m20261016_000002_create_artwork_table::Migration),
            // 3. 独立したテーブル
            Box::new(m20261016_000003_create_counter_table::Migration),
            Box::new(m20261016_000004_create_feedback_table::Migration),
            Box::new(m20261016_000005_create_signature_table::Migration),
            // 4. インデックス
            Box::new(m20261016_000006_add_gallery_indexes::Migration),
        ]
    }
}
