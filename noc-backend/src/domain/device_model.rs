// noc-backend/src/domain/device_model.rs
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "devices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub device_type: String,
    pub ip_address: String,
    #[sea_orm(nullable)]
    pub location: Option<String>,
    pub status: String,
    pub last_updated: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::domain::alert_model::Entity")]
    Alerts,
    #[sea_orm(has_many = "crate::domain::incident_model::Entity")]
    Incidents,
}

impl Related<crate::domain::alert_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Alerts.def()
    }
}

impl Related<crate::domain::incident_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Incidents.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            last_updated: Set(Utc::now()),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        // 更新時は常に最終更新日時を打ち直す
        if !insert {
            self.last_updated = Set(Utc::now());
        }
        Ok(self)
    }
}
