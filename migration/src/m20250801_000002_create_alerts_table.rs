use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alerts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alerts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alerts::DeviceId).integer().not_null())
                    .col(ColumnDef::new(Alerts::Severity).string_len(20).not_null())
                    .col(ColumnDef::new(Alerts::Message).text().not_null())
                    .col(ColumnDef::new(Alerts::Source).string_len(100).null())
                    .col(
                        ColumnDef::new(Alerts::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Alerts::Status)
                            .string_len(20)
                            .not_null()
                            .default("New"),
                    )
                    .col(
                        ColumnDef::new(Alerts::ResolutionTimestamp)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    // アラートが残っているデバイスは削除させない
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_alerts_device_id")
                            .from(Alerts::Table, Alerts::DeviceId)
                            .to(Devices::Table, Devices::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_alerts_device_id")
                    .table(Alerts::Table)
                    .col(Alerts::DeviceId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_alerts_timestamp")
                    .table(Alerts::Table)
                    .col(Alerts::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alerts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Alerts {
    Table,
    Id,
    DeviceId,
    Severity,
    Message,
    Source,
    Timestamp,
    Status,
    ResolutionTimestamp,
}

#[derive(Iden)]
enum Devices {
    Table,
    Id,
}
