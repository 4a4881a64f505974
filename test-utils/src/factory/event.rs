//! Event factory for creating test events together with their host.

use crate::factory::helpers::{add_host, next_id};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test events with customizable fields.
///
/// The member passed to `new` is registered as the event's host.
///
/// # Example
///
/// ```rust,ignore
/// let event = EventFactory::new(&db, host.id)
///     .name("Hike")
///     .status("draft")
///     .build()
///     .await?;
/// ```
pub struct EventFactory<'a> {
    db: &'a DatabaseConnection,
    host_id: i32,
    name: String,
    description: String,
    time: DateTime<Utc>,
    duration_hours: f64,
    fee: i64,
    status: String,
    venue_id: Option<i32>,
}

impl<'a> EventFactory<'a> {
    /// Creates a new EventFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Event {id}"`
    /// - time: one day from now
    /// - duration: 3 hours, fee: 0, status: `upcoming`, no venue
    pub fn new(db: &'a DatabaseConnection, host_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            host_id,
            name: format!("Event {}", id),
            description: "Test event description".to_string(),
            time: Utc::now() + Duration::days(1),
            duration_hours: 3.0,
            fee: 0,
            status: "upcoming".to_string(),
            venue_id: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn fee(mut self, fee: i64) -> Self {
        self.fee = fee;
        self
    }

    pub fn venue_id(mut self, venue_id: i32) -> Self {
        self.venue_id = Some(venue_id);
        self
    }

    /// Builds and inserts the event and its host row.
    ///
    /// # Returns
    /// - `Ok(entity::event::Model)` - Created event entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::event::Model, DbErr> {
        let now = Utc::now();
        let event = entity::event::ActiveModel {
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(self.description),
            time: ActiveValue::Set(self.time),
            duration_hours: ActiveValue::Set(self.duration_hours),
            fee: ActiveValue::Set(self.fee),
            status: ActiveValue::Set(self.status),
            venue_id: ActiveValue::Set(self.venue_id),
            rating_count: ActiveValue::Set(0),
            rating_overall: ActiveValue::Set(0.0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        add_host(self.db, event.id, self.host_id).await?;

        Ok(event)
    }
}

/// Creates an event hosted by `host_id` with default values.
pub async fn create_event(
    db: &DatabaseConnection,
    host_id: i32,
) -> Result<entity::event::Model, DbErr> {
    EventFactory::new(db, host_id).build().await
}
