// noc-backend/src/domain/alert_model.rs
use crate::domain::alert_status::AlertStatus;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "alerts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub device_id: i32,
    pub severity: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    #[sea_orm(nullable)]
    pub source: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub status: String,
    // 一度でも Resolved になると設定され、以後クリアされない
    #[sea_orm(nullable)]
    pub resolution_timestamp: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::device_model::Entity",
        from = "Column::DeviceId",
        to = "crate::domain::device_model::Column::Id"
    )]
    Device,
    #[sea_orm(has_many = "crate::domain::incident_alert_model::Entity")]
    IncidentAlerts,
}

impl Related<crate::domain::device_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Device.def()
    }
}

impl Related<crate::domain::incident_alert_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IncidentAlerts.def()
    }
}

// incident_alerts を経由した多対多
impl Related<crate::domain::incident_model::Entity> for Entity {
    fn to() -> RelationDef {
        crate::domain::incident_alert_model::Relation::Incident.def()
    }

    fn via() -> Option<RelationDef> {
        Some(crate::domain::incident_alert_model::Relation::Alert.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            status: Set(AlertStatus::New.to_string()),
            timestamp: Set(Utc::now()),
            ..ActiveModelTrait::default()
        }
    }
}
