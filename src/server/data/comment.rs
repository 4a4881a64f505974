use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::event::Comment;

pub struct CommentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores an already sanitized comment.
    pub async fn create(
        &self,
        event_id: i32,
        user_id: i32,
        title: Option<String>,
        comment: String,
    ) -> Result<Comment, DbErr> {
        let entity = entity::event_comment::ActiveModel {
            event_id: ActiveValue::Set(event_id),
            user_id: ActiveValue::Set(user_id),
            title: ActiveValue::Set(title),
            comment: ActiveValue::Set(comment),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Comment::from_entity(entity))
    }

    /// Comments on the given events, oldest first.
    pub async fn get_by_events(&self, event_ids: Vec<i32>) -> Result<Vec<Comment>, DbErr> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::EventComment::find()
            .filter(entity::event_comment::Column::EventId.is_in(event_ids))
            .order_by_asc(entity::event_comment::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Comment::from_entity).collect())
    }
}
