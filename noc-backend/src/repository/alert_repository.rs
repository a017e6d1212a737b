// noc-backend/src/repository/alert_repository.rs
use crate::api::dto::alert_dto::CreateAlertDto;
use crate::domain::alert_model::{self, ActiveModel as AlertActiveModel, Entity as AlertEntity};
use crate::domain::alert_status::AlertStatus;
use crate::domain::device_model;
use crate::domain::incident_alert_model::{self, Entity as IncidentAlertEntity};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{entity::*, ConnectionTrait, DbConn, DbErr, DeleteResult, Set};
use sea_orm::{
    FromQueryResult, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};

/// 機器名を結合したアラート
#[derive(Debug, Clone, FromQueryResult)]
pub struct AlertWithDevice {
    pub id: i32,
    pub device_id: i32,
    pub device_name: Option<String>,
    pub severity: String,
    pub message: String,
    pub source: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub status: String,
    pub resolution_timestamp: Option<DateTime<Utc>>,
}

pub struct AlertRepository {
    db: DbConn,
}

impl AlertRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    fn select_with_device() -> Select<AlertEntity> {
        AlertEntity::find()
            .column_as(device_model::Column::Name, "device_name")
            .join(JoinType::LeftJoin, alert_model::Relation::Device.def())
    }

    /// 新しい順
    pub async fn find_all_with_device(&self) -> Result<Vec<AlertWithDevice>, DbErr> {
        Self::select_with_device()
            .order_by_desc(alert_model::Column::Timestamp)
            .order_by_desc(alert_model::Column::Id)
            .into_model::<AlertWithDevice>()
            .all(&self.db)
            .await
    }

    pub async fn find_by_device_with_device(
        &self,
        device_id: i32,
    ) -> Result<Vec<AlertWithDevice>, DbErr> {
        Self::select_with_device()
            .filter(alert_model::Column::DeviceId.eq(device_id))
            .order_by_desc(alert_model::Column::Timestamp)
            .order_by_desc(alert_model::Column::Id)
            .into_model::<AlertWithDevice>()
            .all(&self.db)
            .await
    }

    pub async fn find_with_device(&self, id: i32) -> Result<Option<AlertWithDevice>, DbErr> {
        Self::select_with_device()
            .filter(alert_model::Column::Id.eq(id))
            .into_model::<AlertWithDevice>()
            .one(&self.db)
            .await
    }

    /// `[start, end)` に発生したアラート
    pub async fn find_in_range_with_device(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AlertWithDevice>, DbErr> {
        Self::select_with_device()
            .filter(alert_model::Column::Timestamp.gte(start))
            .filter(alert_model::Column::Timestamp.lt(end))
            .order_by_desc(alert_model::Column::Timestamp)
            .order_by_desc(alert_model::Column::Id)
            .into_model::<AlertWithDevice>()
            .all(&self.db)
            .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<alert_model::Model>, DbErr> {
        AlertEntity::find_by_id(id).one(&self.db).await
    }

    pub async fn exists<C>(conn: &C, id: i32) -> Result<bool, DbErr>
    where
        C: ConnectionTrait,
    {
        Ok(AlertEntity::find_by_id(id).count(conn).await? > 0)
    }

    pub async fn create(&self, payload: CreateAlertDto) -> Result<alert_model::Model, DbErr> {
        let mut alert = AlertActiveModel::new();
        alert.device_id = Set(payload.device_id);
        alert.severity = Set(payload.severity);
        alert.message = Set(payload.message);
        alert.source = Set(payload.source);

        alert.insert(&self.db).await
    }

    /// ステータスを更新する。解決済みが送られた場合は毎回 resolution_timestamp を打刻する
    ///
    /// 単一の UPDATE 文で行い、対象行が無ければ None を返す。
    pub async fn update_status(
        &self,
        id: i32,
        status: AlertStatus,
    ) -> Result<Option<alert_model::Model>, DbErr> {
        let mut update = AlertEntity::update_many()
            .col_expr(alert_model::Column::Status, Expr::value(status.as_str()))
            .filter(alert_model::Column::Id.eq(id));
        if AlertStatus::stamps_resolution(status) {
            update = update.col_expr(
                alert_model::Column::ResolutionTimestamp,
                Expr::value(Utc::now()),
            );
        }

        let result = update.exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Ok(None);
        }

        AlertEntity::find_by_id(id).one(&self.db).await
    }

    /// インシデントへの紐付けに伴うステータス変更
    ///
    /// 現在のステータスは確認せずに上書きする。
    pub async fn mark_linked<C>(conn: &C, id: i32) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let result = AlertEntity::update_many()
            .col_expr(
                alert_model::Column::Status,
                Expr::value(AlertStatus::LINKED.as_str()),
            )
            .filter(alert_model::Column::Id.eq(id))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }

    /// このアラートを参照しているインシデント紐付けの数
    pub async fn count_incident_links(&self, id: i32) -> Result<u64, DbErr> {
        IncidentAlertEntity::find()
            .filter(incident_alert_model::Column::AlertId.eq(id))
            .count(&self.db)
            .await
    }

    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        AlertEntity::delete_by_id(id).exec(&self.db).await
    }
}
