// noc-backend/src/service/incident_service.rs

//! インシデントとアラートの相関付け
//!
//! インシデント作成時のアラート紐付けとステータス変更は単一トランザクションで行い、
//! 途中で失敗した場合はインシデント自体も残さない。

use crate::api::dto::incident_dto::{
    CommentDto, CreateCommentDto, CreateIncidentDto, IncidentDetailDto, IncidentDto,
    UpdateIncidentDto,
};
use crate::db::DbPool;
use crate::domain::incident_comment_model;
use crate::domain::incident_model;
use crate::domain::incident_status::{IncidentPriority, IncidentStatus};
use crate::error::{AppError, AppResult};
use crate::repository::alert_repository::AlertRepository;
use crate::repository::device_repository::DeviceRepository;
use crate::repository::incident_comment_repository::IncidentCommentRepository;
use crate::repository::incident_repository::IncidentRepository;
use crate::utils::error_helper::not_found_error;
use crate::with_transaction;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::info;

pub struct IncidentService {
    db: DatabaseConnection,
    repo: Arc<IncidentRepository>,
    comment_repo: Arc<IncidentCommentRepository>,
}

impl IncidentService {
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            repo: Arc::new(IncidentRepository::new(db_pool.clone())),
            comment_repo: Arc::new(IncidentCommentRepository::new(db_pool.clone())),
            db: db_pool,
        }
    }

    pub async fn list_incidents(&self) -> AppResult<Vec<IncidentDto>> {
        let incidents = self.repo.find_all_with_device().await?;
        Ok(incidents.into_iter().map(Into::into).collect())
    }

    /// インシデント本体と紐付くアラート
    pub async fn get_incident(&self, id: i32) -> AppResult<IncidentDetailDto> {
        let incident = self
            .repo
            .find_with_device(id)
            .await?
            .ok_or_else(|| not_found_error("Incident", id, "incident_service::get_incident"))?;

        let related_alerts = self.repo.find_related_alerts(id).await?;

        Ok(IncidentDetailDto {
            incident: incident.into(),
            related_alerts: related_alerts.into_iter().map(Into::into).collect(),
        })
    }

    /// インシデントを作成し、指定されたアラートを入力順に紐付ける
    ///
    /// 紐付けたアラートは直前の状態にかかわらず `In Progress` になる。
    /// 機器・アラートが存在しない場合や紐付けが重複した場合はすべてロールバックされる。
    pub async fn create_incident(
        &self,
        mut payload: CreateIncidentDto,
    ) -> AppResult<incident_model::Model> {
        payload.priority = payload
            .priority
            .parse::<IncidentPriority>()
            .map_err(AppError::ValidationError)?
            .to_string();

        let incident = with_transaction!(self.db, |txn| async move {
            if let Some(device_id) = payload.device_id {
                if !DeviceRepository::exists(txn, device_id).await? {
                    return Err(not_found_error(
                        "Device",
                        device_id,
                        "incident_service::create_incident",
                    ));
                }
            }

            let incident = IncidentRepository::insert(txn, &payload).await?;

            for &alert_id in &payload.alert_ids {
                if !AlertRepository::exists(txn, alert_id).await? {
                    return Err(not_found_error(
                        "Alert",
                        alert_id,
                        "incident_service::create_incident",
                    ));
                }
                IncidentRepository::link_alert(txn, incident.id, alert_id).await?;
                AlertRepository::mark_linked(txn, alert_id).await?;
            }

            Ok::<_, AppError>(incident)
        })?;

        info!(
            incident_id = incident.id,
            priority = %incident.priority,
            "Incident created"
        );
        Ok(incident)
    }

    /// 可変フィールドを全置換する
    ///
    /// 更新前のステータスは行ロックを取って同じトランザクション内で読む。
    /// 未解決から Resolved になった場合のみ resolved_at を打刻し、それ以外は保持する。
    /// 紐付くアラートのステータスは変更しない。
    pub async fn update_incident(
        &self,
        id: i32,
        mut payload: UpdateIncidentDto,
    ) -> AppResult<incident_model::Model> {
        payload.priority = payload
            .priority
            .parse::<IncidentPriority>()
            .map_err(AppError::ValidationError)?
            .to_string();
        let next_status = payload
            .status
            .parse::<IncidentStatus>()
            .map_err(AppError::ValidationError)?;
        payload.status = next_status.to_string();

        let (updated, previous_status) = with_transaction!(self.db, |txn| async move {
            let existing = IncidentRepository::find_for_update(txn, id)
                .await?
                .ok_or_else(|| {
                    not_found_error("Incident", id, "incident_service::update_incident")
                })?;

            if let Some(device_id) = payload.device_id {
                if !DeviceRepository::exists(txn, device_id).await? {
                    return Err(not_found_error(
                        "Device",
                        device_id,
                        "incident_service::update_incident",
                    ));
                }
            }

            let previous_status = existing.status.clone();
            let stamp = IncidentStatus::stamps_resolution(existing.parsed_status(), next_status);
            let updated = IncidentRepository::apply_update(txn, existing, &payload, stamp).await?;

            Ok::<_, AppError>((updated, previous_status))
        })?;

        info!(
            incident_id = updated.id,
            previous_status = %previous_status,
            status = %updated.status,
            resolved_at = ?updated.resolved_at,
            "Incident updated"
        );
        Ok(updated)
    }

    /// コメントを追記する（インシデントの updated_at は変更しない）
    pub async fn add_comment(
        &self,
        incident_id: i32,
        payload: CreateCommentDto,
    ) -> AppResult<incident_comment_model::Model> {
        if self.repo.find_by_id(incident_id).await?.is_none() {
            return Err(not_found_error(
                "Incident",
                incident_id,
                "incident_service::add_comment",
            ));
        }

        let comment = self.comment_repo.create(incident_id, payload).await?;

        info!(
            incident_id,
            comment_id = comment.id,
            author = %comment.author,
            "Comment added"
        );
        Ok(comment)
    }

    /// 古い順のコメント一覧
    pub async fn list_comments(&self, incident_id: i32) -> AppResult<Vec<CommentDto>> {
        if self.repo.find_by_id(incident_id).await?.is_none() {
            return Err(not_found_error(
                "Incident",
                incident_id,
                "incident_service::list_comments",
            ));
        }

        let comments = self.comment_repo.find_by_incident(incident_id).await?;
        Ok(comments.into_iter().map(Into::into).collect())
    }
}
