// noc-backend/src/api/dto/incident_dto.rs
use crate::api::dto::alert_dto::AlertDto;
use crate::domain::incident_comment_model;
use crate::repository::incident_repository::IncidentWithDevice;
use crate::utils::validation::common;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateIncidentDto {
    #[validate(
        length(
            min = common::incident::TITLE_MIN_LENGTH,
            max = common::incident::TITLE_MAX_LENGTH,
            message = "Incident title must be between 1 and 200 characters"
        ),
        custom(function = common::validate_title)
    )]
    pub title: String,

    #[validate(
        length(
            min = common::incident::DESCRIPTION_MIN_LENGTH,
            max = common::incident::DESCRIPTION_MAX_LENGTH,
            message = "Incident description must be between 1 and 4000 characters"
        ),
        custom(function = common::validate_not_empty_or_whitespace)
    )]
    pub description: String,

    #[validate(custom(function = common::validate_incident_priority))]
    pub priority: String,

    pub device_id: Option<i32>,

    #[validate(length(
        max = common::incident::ASSIGNEE_MAX_LENGTH,
        message = "Assignee must not exceed 100 characters"
    ))]
    pub assigned_to: Option<String>,

    // 入力順に紐付けられる。null は省略と同じ扱い
    #[serde(default, deserialize_with = "deserialize_alert_ids")]
    #[validate(length(
        max = common::incident::MAX_LINKED_ALERTS,
        message = "An incident can link at most 100 alerts"
    ))]
    pub alert_ids: Vec<i32>,
}

fn deserialize_alert_ids<'de, D>(deserializer: D) -> Result<Vec<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<i32>>::deserialize(deserializer)?.unwrap_or_default())
}

/// 可変フィールドの全置換
#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIncidentDto {
    #[validate(
        length(
            min = common::incident::TITLE_MIN_LENGTH,
            max = common::incident::TITLE_MAX_LENGTH,
            message = "Incident title must be between 1 and 200 characters"
        ),
        custom(function = common::validate_title)
    )]
    pub title: String,

    #[validate(
        length(
            min = common::incident::DESCRIPTION_MIN_LENGTH,
            max = common::incident::DESCRIPTION_MAX_LENGTH,
            message = "Incident description must be between 1 and 4000 characters"
        ),
        custom(function = common::validate_not_empty_or_whitespace)
    )]
    pub description: String,

    #[validate(custom(function = common::validate_incident_priority))]
    pub priority: String,

    #[validate(custom(function = common::validate_incident_status))]
    pub status: String,

    pub device_id: Option<i32>,

    #[validate(length(
        max = common::incident::ASSIGNEE_MAX_LENGTH,
        message = "Assignee must not exceed 100 characters"
    ))]
    pub assigned_to: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
pub struct CreateCommentDto {
    #[validate(
        length(
            min = common::comment::BODY_MIN_LENGTH,
            max = common::comment::BODY_MAX_LENGTH,
            message = "Comment must be between 1 and 4000 characters"
        ),
        custom(function = common::validate_not_empty_or_whitespace)
    )]
    pub comment: String,

    #[validate(
        length(
            min = common::comment::AUTHOR_MIN_LENGTH,
            max = common::comment::AUTHOR_MAX_LENGTH,
            message = "Author must be between 1 and 100 characters"
        ),
        custom(function = common::validate_not_empty_or_whitespace)
    )]
    pub author: String,
}

// --- Response DTOs ---

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct IncidentDto {
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

impl From<IncidentWithDevice> for IncidentDto {
    fn from(row: IncidentWithDevice) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            priority: row.priority,
            status: row.status,
            device_id: row.device_id,
            device_name: row.device_name,
            assigned_to: row.assigned_to,
            created_at: row.created_at,
            updated_at: row.updated_at,
            resolved_at: row.resolved_at,
        }
    }
}

/// インシデント詳細（紐付くアラート込み）
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct IncidentDetailDto {
    #[serde(flatten)]
    pub incident: IncidentDto,
    pub related_alerts: Vec<AlertDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: i32,
    pub incident_id: i32,
    pub comment: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl From<incident_comment_model::Model> for CommentDto {
    fn from(model: incident_comment_model::Model) -> Self {
        Self {
            id: model.id,
            incident_id: model.incident_id,
            comment: model.comment,
            author: model.author,
            created_at: model.created_at,
        }
    }
}
