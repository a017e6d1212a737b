// noc-backend/src/repository/device_repository.rs
use crate::api::dto::device_dto::DeviceRequestDto;
use crate::domain::alert_model::{self, Entity as AlertEntity};
use crate::domain::device_model::{self, ActiveModel as DeviceActiveModel, Entity as DeviceEntity};
use sea_orm::{entity::*, ConnectionTrait, DbConn, DbErr, DeleteResult, Set};
use sea_orm::{PaginatorTrait, QueryFilter, QueryOrder};

pub struct DeviceRepository {
    db: DbConn,
}

impl DeviceRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<device_model::Model>, DbErr> {
        DeviceEntity::find()
            .order_by_asc(device_model::Column::Id)
            .all(&self.db)
            .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<device_model::Model>, DbErr> {
        DeviceEntity::find_by_id(id).one(&self.db).await
    }

    /// 任意のコネクション（トランザクション含む）で存在確認する
    pub async fn exists<C>(conn: &C, id: i32) -> Result<bool, DbErr>
    where
        C: ConnectionTrait,
    {
        Ok(DeviceEntity::find_by_id(id).count(conn).await? > 0)
    }

    pub async fn create(&self, payload: DeviceRequestDto) -> Result<device_model::Model, DbErr> {
        let mut device = DeviceActiveModel::new();
        device.status = Set(payload.status_or_default());
        device.name = Set(payload.name);
        device.device_type = Set(payload.device_type);
        device.ip_address = Set(payload.ip_address);
        device.location = Set(payload.location);

        device.insert(&self.db).await
    }

    /// 全置換更新。対象が存在しなければ None
    pub async fn update(
        &self,
        id: i32,
        payload: DeviceRequestDto,
    ) -> Result<Option<device_model::Model>, DbErr> {
        let Some(existing) = DeviceEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut device: DeviceActiveModel = existing.into();
        device.status = Set(payload.status_or_default());
        device.name = Set(payload.name);
        device.device_type = Set(payload.device_type);
        device.ip_address = Set(payload.ip_address);
        device.location = Set(payload.location);

        // last_updated は before_save で打ち直される
        device.update(&self.db).await.map(Some)
    }

    /// この機器を参照しているアラート数
    pub async fn count_alerts(&self, id: i32) -> Result<u64, DbErr> {
        AlertEntity::find()
            .filter(alert_model::Column::DeviceId.eq(id))
            .count(&self.db)
            .await
    }

    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        DeviceEntity::delete_by_id(id).exec(&self.db).await
    }
}
