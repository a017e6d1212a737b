// noc-backend/src/domain/incident_model.rs
use crate::domain::incident_status::IncidentStatus;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "incidents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub priority: String,
    pub status: String,
    #[sea_orm(nullable)]
    pub device_id: Option<i32>,
    #[sea_orm(nullable)]
    pub assigned_to: Option<String>,
    pub created_at: DateTime<Utc>,
    #[sea_orm(nullable)]
    pub updated_at: Option<DateTime<Utc>>,
    // 未解決 → Resolved への遷移時にのみ打刻される
    #[sea_orm(nullable)]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Model {
    /// 保存されているステータスを解釈する（不明な値は None）
    pub fn parsed_status(&self) -> Option<IncidentStatus> {
        IncidentStatus::from_str(&self.status)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::device_model::Entity",
        from = "Column::DeviceId",
        to = "crate::domain::device_model::Column::Id",
        on_delete = "SetNull"
    )]
    Device,
    #[sea_orm(has_many = "crate::domain::incident_alert_model::Entity")]
    IncidentAlerts,
    #[sea_orm(has_many = "crate::domain::incident_comment_model::Entity")]
    Comments,
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

impl Related<crate::domain::incident_comment_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl Related<crate::domain::alert_model::Entity> for Entity {
    fn to() -> RelationDef {
        crate::domain::incident_alert_model::Relation::Alert.def()
    }

    fn via() -> Option<RelationDef> {
        Some(crate::domain::incident_alert_model::Relation::Incident.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        // 作成時のステータスは常に Open
        Self {
            status: Set(IncidentStatus::Open.to_string()),
            created_at: Set(Utc::now()),
            ..ActiveModelTrait::default()
        }
    }
}
