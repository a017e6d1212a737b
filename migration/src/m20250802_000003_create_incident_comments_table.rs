use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(IncidentComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IncidentComments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(IncidentComments::IncidentId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(IncidentComments::Comment).text().not_null())
                    .col(
                        ColumnDef::new(IncidentComments::Author)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IncidentComments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_incident_comments_incident_id")
                            .from(IncidentComments::Table, IncidentComments::IncidentId)
                            .to(Incidents::Table, Incidents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_incident_comments_incident_id")
                    .table(IncidentComments::Table)
                    .col(IncidentComments::IncidentId)
                    .col(IncidentComments::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(IncidentComments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum IncidentComments {
    Table,
    Id,
    IncidentId,
    Comment,
    Author,
    CreatedAt,
}

#[derive(Iden)]
enum Incidents {
    Table,
    Id,
}
