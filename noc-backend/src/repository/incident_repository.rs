// noc-backend/src/repository/incident_repository.rs
use crate::api::dto::incident_dto::{CreateIncidentDto, UpdateIncidentDto};
use crate::domain::alert_model::{self, Entity as AlertEntity};
use crate::domain::device_model;
use crate::domain::incident_alert_model::{
    self, ActiveModel as IncidentAlertActiveModel, Entity as IncidentAlertEntity,
};
use crate::domain::incident_model::{
    self, ActiveModel as IncidentActiveModel, Entity as IncidentEntity,
};
use chrono::{DateTime, Utc};
use sea_orm::{entity::*, ConnectionTrait, DbConn, DbErr, Set};
use sea_orm::{FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect, Select};

/// 機器名を結合したインシデント（機器が無い場合は None）
#[derive(Debug, Clone, FromQueryResult)]
pub struct IncidentWithDevice {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub device_id: Option<i32>,
    pub device_name: Option<String>,
    pub assigned_to: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
}

pub struct IncidentRepository {
    db: DbConn,
}

impl IncidentRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    fn select_with_device() -> Select<IncidentEntity> {
        IncidentEntity::find()
            .column_as(device_model::Column::Name, "device_name")
            .join(JoinType::LeftJoin, incident_model::Relation::Device.def())
    }

    /// 新しい順
    pub async fn find_all_with_device(&self) -> Result<Vec<IncidentWithDevice>, DbErr> {
        Self::select_with_device()
            .order_by_desc(incident_model::Column::CreatedAt)
            .order_by_desc(incident_model::Column::Id)
            .into_model::<IncidentWithDevice>()
            .all(&self.db)
            .await
    }

    pub async fn find_with_device(&self, id: i32) -> Result<Option<IncidentWithDevice>, DbErr> {
        Self::select_with_device()
            .filter(incident_model::Column::Id.eq(id))
            .into_model::<IncidentWithDevice>()
            .one(&self.db)
            .await
    }

    /// `[start, end)` に作成されたインシデント
    pub async fn find_in_range_with_device(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<IncidentWithDevice>, DbErr> {
        Self::select_with_device()
            .filter(incident_model::Column::CreatedAt.gte(start))
            .filter(incident_model::Column::CreatedAt.lt(end))
            .order_by_desc(incident_model::Column::CreatedAt)
            .order_by_desc(incident_model::Column::Id)
            .into_model::<IncidentWithDevice>()
            .all(&self.db)
            .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<incident_model::Model>, DbErr> {
        IncidentEntity::find_by_id(id).one(&self.db).await
    }

    /// 行ロック（SELECT ... FOR UPDATE）付きで取得する
    ///
    /// 更新前ステータスの読み取りと更新を同じトランザクションで行うために使う。
    pub async fn find_for_update<C>(
        conn: &C,
        id: i32,
    ) -> Result<Option<incident_model::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        IncidentEntity::find_by_id(id)
            .lock_exclusive()
            .one(conn)
            .await
    }

    /// ステータス Open で新規作成する
    pub async fn insert<C>(
        conn: &C,
        payload: &CreateIncidentDto,
    ) -> Result<incident_model::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut incident = IncidentActiveModel::new();
        incident.title = Set(payload.title.clone());
        incident.description = Set(payload.description.clone());
        incident.priority = Set(payload.priority.clone());
        incident.device_id = Set(payload.device_id);
        incident.assigned_to = Set(payload.assigned_to.clone());

        incident.insert(conn).await
    }

    pub async fn link_alert<C>(conn: &C, incident_id: i32, alert_id: i32) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        let link = IncidentAlertActiveModel {
            incident_id: Set(incident_id),
            alert_id: Set(alert_id),
        };
        IncidentAlertEntity::insert(link)
            .exec_without_returning(conn)
            .await?;
        Ok(())
    }

    /// 可変フィールドを全置換する
    ///
    /// `stamp_resolution` が真の場合のみ resolved_at を現在時刻にする。偽なら既存値のまま。
    pub async fn apply_update<C>(
        conn: &C,
        existing: incident_model::Model,
        payload: &UpdateIncidentDto,
        stamp_resolution: bool,
    ) -> Result<incident_model::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();
        let mut incident: IncidentActiveModel = existing.into();
        incident.title = Set(payload.title.clone());
        incident.description = Set(payload.description.clone());
        incident.priority = Set(payload.priority.clone());
        incident.status = Set(payload.status.clone());
        incident.device_id = Set(payload.device_id);
        incident.assigned_to = Set(payload.assigned_to.clone());
        incident.updated_at = Set(Some(now));
        if stamp_resolution {
            incident.resolved_at = Set(Some(now));
        }

        incident.update(conn).await
    }

    /// 紐付くアラート（アラートID順）
    pub async fn find_related_alerts(
        &self,
        incident_id: i32,
    ) -> Result<Vec<alert_model::Model>, DbErr> {
        AlertEntity::find()
            .join(JoinType::InnerJoin, alert_model::Relation::IncidentAlerts.def())
            .filter(incident_alert_model::Column::IncidentId.eq(incident_id))
            .order_by_asc(alert_model::Column::Id)
            .all(&self.db)
            .await
    }

    /// 紐付けの一覧
    pub async fn find_links(
        &self,
        incident_id: i32,
    ) -> Result<Vec<incident_alert_model::Model>, DbErr> {
        IncidentAlertEntity::find()
            .filter(incident_alert_model::Column::IncidentId.eq(incident_id))
            .all(&self.db)
            .await
    }
}
