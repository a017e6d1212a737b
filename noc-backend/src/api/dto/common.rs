// noc-backend/src/api/dto/common.rs

use serde::{Deserialize, Serialize};

/// 更新・削除系エンドポイントの応答
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 作成系エンドポイントの応答
///
/// 採番されたIDは `deviceId` や `incidentId` のようにリソースごとのキーで返す。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub message: String,
    #[serde(flatten)]
    pub id: CreatedId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CreatedId {
    DeviceId(i32),
    AlertId(i32),
    IncidentId(i32),
    CommentId(i32),
}

impl CreatedResponse {
    pub fn new(message: impl Into<String>, id: CreatedId) -> Self {
        Self {
            message: message.into(),
            id,
        }
    }
}
