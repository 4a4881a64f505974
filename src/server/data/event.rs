//! Event data repository.
//!
//! Handles event rows and the event/host join table. Dependent rows (attendance, comments,
//! ratings, photos) have their own repositories but are removed here when an event is
//! deleted.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::event::{Event, EventParam, Rating};

pub struct EventRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EventRepository<'a> {
    /// Creates a new EventRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `EventRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts an event and registers `host_id` as its first host.
    ///
    /// # Arguments
    /// - `host_id` - Member creating the event
    /// - `param` - Validated event fields
    ///
    /// # Returns
    /// - `Ok(Event)` - The created event with an empty rating
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, host_id: i32, param: EventParam) -> Result<Event, DbErr> {
        let now = Utc::now();

        let entity = entity::event::ActiveModel {
            name: ActiveValue::Set(param.name),
            description: ActiveValue::Set(param.description),
            time: ActiveValue::Set(param.time),
            duration_hours: ActiveValue::Set(param.duration_hours),
            fee: ActiveValue::Set(param.fee),
            status: ActiveValue::Set(param.status.as_str().to_string()),
            venue_id: ActiveValue::Set(None),
            rating_count: ActiveValue::Set(0),
            rating_overall: ActiveValue::Set(0.0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.add_host(entity.id, host_id).await?;

        Ok(Event::from_entity(entity))
    }

    pub async fn find_by_id(&self, event_id: i32) -> Result<Option<Event>, DbErr> {
        let entity = entity::prelude::Event::find_by_id(event_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Event::from_entity))
    }

    /// All events ordered by start time.
    pub async fn get_all(&self) -> Result<Vec<Event>, DbErr> {
        let entities = entity::prelude::Event::find()
            .order_by_asc(entity::event::Column::Time)
            .order_by_asc(entity::event::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Event::from_entity).collect())
    }

    /// Events hosted by a member in creation order.
    pub async fn get_hosted_by(&self, user_id: i32) -> Result<Vec<Event>, DbErr> {
        let event_ids: Vec<i32> = entity::prelude::EventHost::find()
            .select_only()
            .column(entity::event_host::Column::EventId)
            .filter(entity::event_host::Column::UserId.eq(user_id))
            .into_tuple()
            .all(self.db)
            .await?;

        if event_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Event::find()
            .filter(entity::event::Column::Id.is_in(event_ids))
            .order_by_asc(entity::event::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Event::from_entity).collect())
    }

    /// Replaces every editable field of an event.
    ///
    /// # Returns
    /// - `Ok(Event)` - Updated event
    /// - `Err(DbErr::RecordNotUpdated)` - No event with that id
    /// - `Err(DbErr)` - Other database error
    pub async fn update(&self, event_id: i32, param: EventParam) -> Result<Event, DbErr> {
        let entity = entity::event::ActiveModel {
            id: ActiveValue::Unchanged(event_id),
            name: ActiveValue::Set(param.name),
            description: ActiveValue::Set(param.description),
            time: ActiveValue::Set(param.time),
            duration_hours: ActiveValue::Set(param.duration_hours),
            fee: ActiveValue::Set(param.fee),
            status: ActiveValue::Set(param.status.as_str().to_string()),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(Event::from_entity(entity))
    }

    pub async fn set_venue(&self, event_id: i32, venue_id: i32) -> Result<(), DbErr> {
        entity::event::ActiveModel {
            id: ActiveValue::Unchanged(event_id),
            venue_id: ActiveValue::Set(Some(venue_id)),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    /// Stores a recomputed rating aggregate.
    pub async fn set_rating(&self, event_id: i32, rating: Rating) -> Result<(), DbErr> {
        entity::event::ActiveModel {
            id: ActiveValue::Unchanged(event_id),
            rating_count: ActiveValue::Set(rating.count),
            rating_overall: ActiveValue::Set(rating.overall),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    pub async fn add_host(&self, event_id: i32, user_id: i32) -> Result<(), DbErr> {
        entity::event_host::ActiveModel {
            event_id: ActiveValue::Set(event_id),
            user_id: ActiveValue::Set(user_id),
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    /// `(event_id, user_id)` host pairs for the given events.
    pub async fn get_hosts(&self, event_ids: Vec<i32>) -> Result<Vec<(i32, i32)>, DbErr> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::EventHost::find()
            .filter(entity::event_host::Column::EventId.is_in(event_ids))
            .order_by_asc(entity::event_host::Column::UserId)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(|host| (host.event_id, host.user_id))
            .collect())
    }

    pub async fn is_host(&self, event_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let host = entity::prelude::EventHost::find_by_id((event_id, user_id))
            .one(self.db)
            .await?;

        Ok(host.is_some())
    }

    /// Deletes an event with its hosts, attendance, comments, ratings and photo rows.
    ///
    /// Photo files on disk are not touched; callers remove them first.
    ///
    /// # Returns
    /// - `Ok(true)` - Event deleted
    /// - `Ok(false)` - No event with that id
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, event_id: i32) -> Result<bool, DbErr> {
        entity::prelude::EventHost::delete_many()
            .filter(entity::event_host::Column::EventId.eq(event_id))
            .exec(self.db)
            .await?;
        entity::prelude::EventAttendance::delete_many()
            .filter(entity::event_attendance::Column::EventId.eq(event_id))
            .exec(self.db)
            .await?;
        entity::prelude::EventComment::delete_many()
            .filter(entity::event_comment::Column::EventId.eq(event_id))
            .exec(self.db)
            .await?;
        entity::prelude::EventRating::delete_many()
            .filter(entity::event_rating::Column::EventId.eq(event_id))
            .exec(self.db)
            .await?;
        entity::prelude::Photo::delete_many()
            .filter(entity::photo::Column::EventId.eq(event_id))
            .exec(self.db)
            .await?;

        let result = entity::prelude::Event::delete_by_id(event_id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
