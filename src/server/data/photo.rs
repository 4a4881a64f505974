//! Photo data repository.
//!
//! Rows only; the image files themselves are written and removed by the photo service.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::photo::{CreatePhotoParam, Photo};

pub struct PhotoRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PhotoRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: CreatePhotoParam) -> Result<Photo, DbErr> {
        let entity = entity::photo::ActiveModel {
            kind: ActiveValue::Set(param.kind.as_str().to_string()),
            member_id: ActiveValue::Set(param.member_id),
            event_id: ActiveValue::Set(param.event_id),
            photo_url: ActiveValue::Set(param.photo_url),
            highres_url: ActiveValue::Set(param.highres_url),
            base_url: ActiveValue::Set(param.base_url),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Photo::from_entity(entity))
    }

    pub async fn find_by_id(&self, photo_id: i32) -> Result<Option<Photo>, DbErr> {
        let entity = entity::prelude::Photo::find_by_id(photo_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Photo::from_entity))
    }

    /// Photos owned by a member in upload order.
    pub async fn get_by_member(&self, member_id: i32) -> Result<Vec<Photo>, DbErr> {
        let entities = entity::prelude::Photo::find()
            .filter(entity::photo::Column::MemberId.eq(member_id))
            .order_by_asc(entity::photo::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Photo::from_entity).collect())
    }

    /// Photos attached to an event in upload order.
    pub async fn get_by_event(&self, event_id: i32) -> Result<Vec<Photo>, DbErr> {
        let entities = entity::prelude::Photo::find()
            .filter(entity::photo::Column::EventId.eq(event_id))
            .order_by_asc(entity::photo::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Photo::from_entity).collect())
    }

    /// Photos of several events in upload order.
    pub async fn get_by_events(&self, event_ids: Vec<i32>) -> Result<Vec<Photo>, DbErr> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Photo::find()
            .filter(entity::photo::Column::EventId.is_in(event_ids))
            .order_by_asc(entity::photo::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Photo::from_entity).collect())
    }

    /// Looks up a set of photos, e.g. the avatars of several hosts.
    pub async fn get_by_ids(&self, photo_ids: Vec<i32>) -> Result<Vec<Photo>, DbErr> {
        if photo_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Photo::find()
            .filter(entity::photo::Column::Id.is_in(photo_ids))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Photo::from_entity).collect())
    }

    pub async fn count_by_member(&self, member_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Photo::find()
            .filter(entity::photo::Column::MemberId.eq(member_id))
            .count(self.db)
            .await
    }

    pub async fn count_by_event(&self, event_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Photo::find()
            .filter(entity::photo::Column::EventId.eq(event_id))
            .count(self.db)
            .await
    }

    pub async fn get_all(&self) -> Result<Vec<Photo>, DbErr> {
        let entities = entity::prelude::Photo::find()
            .order_by_asc(entity::photo::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Photo::from_entity).collect())
    }

    /// Deletes a photo row.
    ///
    /// # Returns
    /// - `Ok(true)` - Row deleted
    /// - `Ok(false)` - No photo with that id
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, photo_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Photo::delete_by_id(photo_id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
