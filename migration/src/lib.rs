// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// 監視対象・アラート関連マイグレーション
mod m20250801_000001_create_devices_table;
mod m20250801_000002_create_alerts_table;

// インシデント関連マイグレーション
mod m20250802_000001_create_incidents_table;
mod m20250802_000002_create_incident_alerts_table;
mod m20250802_000003_create_incident_comments_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            // 1. 基本テーブル作成（依存関係なし）
            Box::new(m20250801_000001_create_devices_table::Migration),
            // 2. devicesテーブルに依存
            Box::new(m20250801_000002_create_alerts_table::Migration),
            Box::new(m20250802_000001_create_incidents_table::Migration),
            // 3. incidents / alerts の両方に依存
            Box::new(m20250802_000002_create_incident_alerts_table::Migration),
            Box::new(m20250802_000003_create_incident_comments_table::Migration),
        ]
    }
}
