use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(IncidentAlerts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(IncidentAlerts::IncidentId).integer().not_null())
                    .col(ColumnDef::new(IncidentAlerts::AlertId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_incident_alerts")
                            .col(IncidentAlerts::IncidentId)
                            .col(IncidentAlerts::AlertId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_incident_alerts_incident_id")
                            .from(IncidentAlerts::Table, IncidentAlerts::IncidentId)
                            .to(Incidents::Table, Incidents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    // インシデントの根拠となったアラートは削除させない
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_incident_alerts_alert_id")
                            .from(IncidentAlerts::Table, IncidentAlerts::AlertId)
                            .to(Alerts::Table, Alerts::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_incident_alerts_alert_id")
                    .table(IncidentAlerts::Table)
                    .col(IncidentAlerts::AlertId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(IncidentAlerts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum IncidentAlerts {
    Table,
    IncidentId,
    AlertId,
}

#[derive(Iden)]
enum Incidents {
    Table,
    Id,
}

#[derive(Iden)]
enum Alerts {
    Table,
    Id,
}
