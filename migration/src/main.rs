// migration/src/main.rs

// lib.rs で pub にした Migrator をインポート
use migration::Migrator;
use sea_orm_migration::prelude::*;

// sea-orm-migration の CLI は非同期ランタイム上で動かす
#[async_std::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
