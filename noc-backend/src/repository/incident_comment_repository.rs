// noc-backend/src/repository/incident_comment_repository.rs
use crate::api::dto::incident_dto::CreateCommentDto;
use crate::domain::incident_comment_model::{
    self, ActiveModel as CommentActiveModel, Entity as CommentEntity,
};
use sea_orm::{entity::*, DbConn, DbErr, Set};
use sea_orm::{QueryFilter, QueryOrder};

pub struct IncidentCommentRepository {
    db: DbConn,
}

impl IncidentCommentRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        incident_id: i32,
        payload: CreateCommentDto,
    ) -> Result<incident_comment_model::Model, DbErr> {
        let mut comment = CommentActiveModel::new();
        comment.incident_id = Set(incident_id);
        comment.comment = Set(payload.comment);
        comment.author = Set(payload.author);

        comment.insert(&self.db).await
    }

    /// 古い順。作成日時が同じ場合はID順
    pub async fn find_by_incident(
        &self,
        incident_id: i32,
    ) -> Result<Vec<incident_comment_model::Model>, DbErr> {
        CommentEntity::find()
            .filter(incident_comment_model::Column::IncidentId.eq(incident_id))
            .order_by_asc(incident_comment_model::Column::CreatedAt)
            .order_by_asc(incident_comment_model::Column::Id)
            .all(&self.db)
            .await
    }
}
