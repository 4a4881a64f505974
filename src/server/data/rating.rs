use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QuerySelect,
};

pub struct RatingRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RatingRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, event_id: i32, user_id: i32, rating: i32) -> Result<(), DbErr> {
        entity::event_rating::ActiveModel {
            event_id: ActiveValue::Set(event_id),
            user_id: ActiveValue::Set(user_id),
            rating: ActiveValue::Set(rating),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    pub async fn exists(&self, event_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let row = entity::prelude::EventRating::find()
            .filter(entity::event_rating::Column::EventId.eq(event_id))
            .filter(entity::event_rating::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        Ok(row.is_some())
    }

    /// Every rating value given to an event.
    pub async fn get_values(&self, event_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::EventRating::find()
            .select_only()
            .column(entity::event_rating::Column::Rating)
            .filter(entity::event_rating::Column::EventId.eq(event_id))
            .into_tuple()
            .all(self.db)
            .await
    }
}
