// noc-backend/src/domain/incident_alert_model.rs
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// インシデントとその根拠となったアラートの紐付け
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "incident_alerts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub incident_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub alert_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::incident_model::Entity",
        from = "Column::IncidentId",
        to = "crate::domain::incident_model::Column::Id",
        on_delete = "Cascade"
    )]
    Incident,
    #[sea_orm(
        belongs_to = "crate::domain::alert_model::Entity",
        from = "Column::AlertId",
        to = "crate::domain::alert_model::Column::Id",
        on_delete = "Restrict"
    )]
    Alert,
}

impl Related<crate::domain::incident_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Incident.def()
    }
}

impl Related<crate::domain::alert_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Alert.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
