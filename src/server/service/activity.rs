//! Attendance, comments and ratings on events.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        attendance::AttendanceRepository, comment::CommentRepository, event::EventRepository,
        rating::RatingRepository,
    },
    error::AppError,
    model::event::{Comment, Rating},
    service::event::EventService,
};

pub const ALREADY_JOINED: &str = "You have already joined";
pub const NOT_JOINED: &str = "You did not join the event yet.";
pub const ALREADY_RATED: &str = "You have already rated to this event.";

pub struct ActivityService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ActivityService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Marks the member as attending.
    ///
    /// # Returns
    /// - `Ok(())` - Joined
    /// - `Err(AppError::NotFound)` - Unknown event
    /// - `Err(AppError::BadRequest)` - Already attending
    pub async fn join(&self, event_id: i32, user_id: i32) -> Result<(), AppError> {
        EventService::new(self.db).find(event_id).await?;

        let repo = AttendanceRepository::new(self.db);
        if repo.exists(event_id, user_id).await? {
            return Err(AppError::BadRequest(ALREADY_JOINED.to_string()));
        }

        repo.create(event_id, user_id).await?;

        Ok(())
    }

    pub async fn leave(&self, event_id: i32, user_id: i32) -> Result<(), AppError> {
        EventService::new(self.db).find(event_id).await?;

        if !AttendanceRepository::new(self.db)
            .delete(event_id, user_id)
            .await?
        {
            return Err(AppError::BadRequest(NOT_JOINED.to_string()));
        }

        Ok(())
    }

    /// Adds a sanitized comment.
    pub async fn comment(
        &self,
        event_id: i32,
        user_id: i32,
        title: Option<String>,
        comment: String,
    ) -> Result<Comment, AppError> {
        EventService::new(self.db).find(event_id).await?;

        let comment = CommentRepository::new(self.db)
            .create(event_id, user_id, title, comment)
            .await?;

        Ok(comment)
    }

    /// Records a rating and recomputes the event aggregate.
    ///
    /// # Returns
    /// - `Ok(Rating)` - New count and mean
    /// - `Err(AppError::BadRequest)` - Member already rated this event
    pub async fn rate(&self, event_id: i32, user_id: i32, rating: i32) -> Result<Rating, AppError> {
        EventService::new(self.db).find(event_id).await?;

        let repo = RatingRepository::new(self.db);
        if repo.exists(event_id, user_id).await? {
            return Err(AppError::BadRequest(ALREADY_RATED.to_string()));
        }

        repo.create(event_id, user_id, rating).await?;

        let aggregate = Rating::from_ratings(&repo.get_values(event_id).await?);
        EventRepository::new(self.db)
            .set_rating(event_id, aggregate)
            .await?;

        Ok(aggregate)
    }
}
