//! Event business rules.
//!
//! Every read goes through `populate`, which loads hosts, venues, photos, attendance and
//! comments for a batch of events with one query per relation.

use std::collections::HashMap;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        attendance::AttendanceRepository, comment::CommentRepository, event::EventRepository,
        photo::PhotoRepository, user::UserRepository, venue::VenueRepository,
    },
    error::{auth::AuthError, AppError},
    model::{
        event::{Event, EventParam, Host, PopulatedEvent},
        venue::CreateVenueParam,
    },
    service::{member::not_found, storage::PhotoStorage},
};

pub struct EventService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EventService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Joins events with their hosts, venue, photos, attendance and comments.
    ///
    /// Order of the input is preserved.
    pub async fn populate(&self, events: Vec<Event>) -> Result<Vec<PopulatedEvent>, AppError> {
        if events.is_empty() {
            return Ok(Vec::new());
        }

        let event_ids: Vec<i32> = events.iter().map(|e| e.id).collect();

        let host_pairs = EventRepository::new(self.db)
            .get_hosts(event_ids.clone())
            .await?;
        let mut host_ids: Vec<i32> = host_pairs.iter().map(|(_, user_id)| *user_id).collect();
        host_ids.sort_unstable();
        host_ids.dedup();

        let users: HashMap<i32, _> = UserRepository::new(self.db)
            .get_by_ids(host_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        let photo_repo = PhotoRepository::new(self.db);
        let avatar_ids: Vec<i32> = users.values().filter_map(|u| u.avatar_id).collect();
        let avatars: HashMap<i32, _> = photo_repo
            .get_by_ids(avatar_ids)
            .await?
            .into_iter()
            .map(|photo| (photo.id, photo))
            .collect();

        let venue_ids: Vec<i32> = events.iter().filter_map(|e| e.venue_id).collect();
        let venues: HashMap<i32, _> = VenueRepository::new(self.db)
            .get_by_ids(venue_ids)
            .await?
            .into_iter()
            .map(|venue| (venue.id, venue))
            .collect();

        let mut photos: HashMap<i32, Vec<_>> = HashMap::new();
        for photo in photo_repo.get_by_events(event_ids.clone()).await? {
            if let Some(event_id) = photo.event_id {
                photos.entry(event_id).or_default().push(photo);
            }
        }

        let mut attendance: HashMap<i32, Vec<i32>> = HashMap::new();
        for (event_id, user_id) in AttendanceRepository::new(self.db)
            .get_by_events(event_ids.clone())
            .await?
        {
            attendance.entry(event_id).or_default().push(user_id);
        }

        let mut comments: HashMap<i32, Vec<_>> = HashMap::new();
        for comment in CommentRepository::new(self.db)
            .get_by_events(event_ids)
            .await?
        {
            comments.entry(comment.event_id).or_default().push(comment);
        }

        let mut populated = Vec::with_capacity(events.len());
        for event in events {
            let hosts = host_pairs
                .iter()
                .filter(|(event_id, _)| *event_id == event.id)
                .filter_map(|(_, user_id)| users.get(user_id))
                .map(|user| Host {
                    avatar: user.avatar_id.and_then(|id| avatars.get(&id).cloned()),
                    user: user.clone(),
                })
                .collect();

            populated.push(PopulatedEvent {
                hosts,
                venue: event.venue_id.and_then(|id| venues.get(&id).cloned()),
                photos: photos.remove(&event.id).unwrap_or_default(),
                attendance: attendance.remove(&event.id).unwrap_or_default(),
                comments: comments.remove(&event.id).unwrap_or_default(),
                event,
            });
        }

        Ok(populated)
    }

    /// Loads a single event or fails with `NotFound`.
    pub async fn find(&self, event_id: i32) -> Result<Event, AppError> {
        EventRepository::new(self.db)
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| not_found(event_id))
    }

    /// Loads a populated event.
    ///
    /// # Returns
    /// - `Ok(PopulatedEvent)` - Event with hosts, venue, photos, attendance and comments
    /// - `Err(AppError::NotFound)` - No event with that id
    pub async fn get(&self, event_id: i32) -> Result<PopulatedEvent, AppError> {
        let event = self.find(event_id).await?;

        self.populate(vec![event])
            .await?
            .pop()
            .ok_or_else(|| not_found(event_id))
    }

    /// Populated events the member hosts, oldest first.
    pub async fn list_hosted(&self, user_id: i32) -> Result<Vec<PopulatedEvent>, AppError> {
        let events = EventRepository::new(self.db).get_hosted_by(user_id).await?;

        self.populate(events).await
    }

    /// Every event, populated.
    pub async fn find_all(&self) -> Result<Vec<PopulatedEvent>, AppError> {
        let events = EventRepository::new(self.db).get_all().await?;

        self.populate(events).await
    }

    /// Fails unless `user_id` hosts the event.
    ///
    /// # Returns
    /// - `Ok(Event)` - The event
    /// - `Err(AppError::NotFound)` - No event with that id
    /// - `Err(AppError::AuthErr(AccessDenied))` - Caller is not a host
    pub async fn require_host(&self, event_id: i32, user_id: i32) -> Result<Event, AppError> {
        let event = self.find(event_id).await?;

        if !EventRepository::new(self.db).is_host(event_id, user_id).await? {
            return Err(AuthError::AccessDenied(
                user_id,
                format!("attempted to modify event {} without hosting it", event_id),
            )
            .into());
        }

        Ok(event)
    }

    /// Creates an event hosted by `host_id` and returns all events they host.
    pub async fn create(
        &self,
        host_id: i32,
        param: EventParam,
    ) -> Result<Vec<PopulatedEvent>, AppError> {
        let event = EventRepository::new(self.db).create(host_id, param).await?;

        tracing::debug!("User {} created event {}", host_id, event.id);

        self.list_hosted(host_id).await
    }

    /// Replaces all editable fields of a hosted event.
    pub async fn update(
        &self,
        user_id: i32,
        event_id: i32,
        param: EventParam,
    ) -> Result<PopulatedEvent, AppError> {
        self.require_host(event_id, user_id).await?;

        EventRepository::new(self.db).update(event_id, param).await?;

        self.get(event_id).await
    }

    /// Deletes a hosted event with its photo files and dependent rows.
    ///
    /// # Returns
    /// - `Ok(Vec<PopulatedEvent>)` - Events the caller still hosts
    pub async fn delete(
        &self,
        user_id: i32,
        event_id: i32,
        storage: &PhotoStorage,
    ) -> Result<Vec<PopulatedEvent>, AppError> {
        self.require_host(event_id, user_id).await?;
        self.remove(event_id, storage).await?;

        self.list_hosted(user_id).await
    }

    /// Deletes an event regardless of who hosts it.
    pub async fn remove(&self, event_id: i32, storage: &PhotoStorage) -> Result<bool, AppError> {
        let photos = PhotoRepository::new(self.db).get_by_event(event_id).await?;

        let deleted = EventRepository::new(self.db).delete(event_id).await?;
        if deleted {
            storage.discard(&photos).await;
            tracing::info!("Event {} deleted", event_id);
        }

        Ok(deleted)
    }

    /// Creates a venue and attaches it to a hosted event.
    pub async fn add_venue(
        &self,
        user_id: i32,
        event_id: i32,
        param: CreateVenueParam,
    ) -> Result<PopulatedEvent, AppError> {
        self.require_host(event_id, user_id).await?;

        let venue = VenueRepository::new(self.db).create(param).await?;
        EventRepository::new(self.db)
            .set_venue(event_id, venue.id)
            .await?;

        self.get(event_id).await
    }
}
