//! Member and event photo management.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{photo::PhotoRepository, user::UserRepository},
    error::AppError,
    model::{
        event::PopulatedEvent,
        photo::{CreatePhotoParam, Photo, PhotoKind, MAX_PHOTOS},
        user::Member,
    },
    service::{
        event::EventService,
        member::{not_found, MemberService},
        storage::{PhotoStorage, PhotoUpload},
    },
};

pub struct PhotoService<'a> {
    db: &'a DatabaseConnection,
    storage: &'a PhotoStorage,
}

impl<'a> PhotoService<'a> {
    pub fn new(db: &'a DatabaseConnection, storage: &'a PhotoStorage) -> Self {
        Self { db, storage }
    }

    /// Stores an upload as a member photo.
    ///
    /// The first photo a member uploads becomes their avatar.
    ///
    /// # Returns
    /// - `Ok(Member)` - Member with the new photo
    /// - `Err(AppError::BadRequest)` - Limit reached or upload rejected
    pub async fn add_member_photo(
        &self,
        member_id: i32,
        upload: PhotoUpload,
    ) -> Result<Member, AppError> {
        let member_service = MemberService::new(self.db);
        let member = member_service.get(member_id).await?;

        if member.photos.len() >= MAX_PHOTOS {
            return Err(AppError::BadRequest(format!(
                "profile.photos exceeds the limit of {}",
                MAX_PHOTOS
            )));
        }

        let photo = self.store(upload, PhotoKind::Member, Some(member_id), None).await?;

        if member.photos.is_empty() {
            UserRepository::new(self.db)
                .set_avatar(member_id, Some(photo.id))
                .await?;
        }

        member_service.get(member_id).await
    }

    /// Deletes a member photo, moving the avatar to the first remaining photo when needed.
    pub async fn delete_member_photo(
        &self,
        member_id: i32,
        photo_id: i32,
    ) -> Result<Member, AppError> {
        let member_service = MemberService::new(self.db);
        let member = member_service.get(member_id).await?;

        let photo = member
            .photos
            .iter()
            .find(|photo| photo.id == photo_id)
            .ok_or_else(|| not_found(photo_id))?;

        self.remove(photo).await?;

        if member.user.avatar_id == Some(photo_id) {
            let next = member
                .photos
                .iter()
                .find(|photo| photo.id != photo_id)
                .map(|photo| photo.id);
            UserRepository::new(self.db).set_avatar(member_id, next).await?;
        }

        member_service.get(member_id).await
    }

    /// Stores an upload on an event the caller hosts.
    pub async fn add_event_photo(
        &self,
        user_id: i32,
        event_id: i32,
        upload: PhotoUpload,
    ) -> Result<PopulatedEvent, AppError> {
        let event_service = EventService::new(self.db);
        event_service.require_host(event_id, user_id).await?;

        let count = PhotoRepository::new(self.db).count_by_event(event_id).await?;
        if count as usize >= MAX_PHOTOS {
            return Err(AppError::BadRequest(format!(
                "Photos exceeds the limit of {}",
                MAX_PHOTOS
            )));
        }

        self.store(upload, PhotoKind::Event, None, Some(event_id)).await?;

        event_service.get(event_id).await
    }

    /// Deletes a photo from an event the caller hosts.
    pub async fn delete_event_photo(
        &self,
        user_id: i32,
        event_id: i32,
        photo_id: i32,
    ) -> Result<PopulatedEvent, AppError> {
        let event_service = EventService::new(self.db);
        event_service.require_host(event_id, user_id).await?;

        let photo = PhotoRepository::new(self.db)
            .find_by_id(photo_id)
            .await?
            .filter(|photo| photo.event_id == Some(event_id))
            .ok_or_else(|| not_found(photo_id))?;

        self.remove(&photo).await?;

        event_service.get(event_id).await
    }

    /// Deletes any photo by id, clearing a member avatar that pointed at it.
    ///
    /// # Returns
    /// - `Ok(true)` - Photo deleted
    /// - `Ok(false)` - No photo with that id
    pub async fn delete_any(&self, photo_id: i32) -> Result<bool, AppError> {
        let Some(photo) = PhotoRepository::new(self.db).find_by_id(photo_id).await? else {
            return Ok(false);
        };

        if let Some(member_id) = photo.member_id {
            return self
                .delete_member_photo(member_id, photo_id)
                .await
                .map(|_| true);
        }

        self.remove(&photo).await?;

        Ok(true)
    }

    async fn store(
        &self,
        upload: PhotoUpload,
        kind: PhotoKind,
        member_id: Option<i32>,
        event_id: Option<i32>,
    ) -> Result<Photo, AppError> {
        let stored = self.storage.store(upload).await?;

        let photo = PhotoRepository::new(self.db)
            .create(CreatePhotoParam {
                kind,
                member_id,
                event_id,
                photo_url: stored.photo_url,
                highres_url: stored.highres_url,
                base_url: stored.base_url,
            })
            .await?;

        tracing::debug!("Stored {} photo {}", kind.as_str(), photo.id);

        Ok(photo)
    }

    async fn remove(&self, photo: &Photo) -> Result<(), AppError> {
        PhotoRepository::new(self.db).delete(photo.id).await?;
        self.storage.discard(std::slice::from_ref(photo)).await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;
    use test_utils::{builder::TestBuilder, factory};

    fn png_upload() -> PhotoUpload {
        let mut bytes = Vec::new();
        RgbImage::new(40, 30)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        PhotoUpload {
            file_name: "snap.png".to_string(),
            content_type: Some("image/png".to_string()),
            bytes: Bytes::from(bytes),
            width: 20,
            height: 10,
        }
    }

    fn temp_storage(label: &str) -> PhotoStorage {
        let dir = std::env::temp_dir().join(format!(
            "meetup-photo-service-{}-{}",
            label,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        PhotoStorage::new(dir, "http://localhost:7000")
    }

    /// Tests that the first member photo becomes the avatar.
    ///
    /// Expected: avatar set to the uploaded photo
    #[tokio::test]
    async fn first_photo_becomes_avatar() -> Result<(), AppError> {
        let test = TestBuilder::new().with_member_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let storage = temp_storage("avatar");

        let user = factory::create_user(db).await?;

        let member = PhotoService::new(db, &storage)
            .add_member_photo(user.id, png_upload())
            .await?;

        assert_eq!(member.photos.len(), 1);
        assert_eq!(member.user.avatar_id, Some(member.photos[0].id));

        Ok(())
    }

    /// Tests the member photo limit.
    ///
    /// Expected: Err(BadRequest) once eight photos exist
    #[tokio::test]
    async fn member_photo_limit() -> Result<(), AppError> {
        let test = TestBuilder::new().with_member_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let storage = temp_storage("limit");

        let user = factory::create_user(db).await?;
        for _ in 0..MAX_PHOTOS {
            factory::create_member_photo(db, user.id).await?;
        }

        let result = PhotoService::new(db, &storage)
            .add_member_photo(user.id, png_upload())
            .await;

        assert!(matches!(
            result,
            Err(AppError::BadRequest(msg)) if msg == "profile.photos exceeds the limit of 8"
        ));

        Ok(())
    }

    /// Tests deleting the avatar photo.
    ///
    /// Expected: avatar moves to the remaining photo
    #[tokio::test]
    async fn deleting_avatar_picks_next_photo() -> Result<(), AppError> {
        let test = TestBuilder::new().with_member_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let storage = temp_storage("reassign");

        let user = factory::create_user(db).await?;
        let first = factory::create_member_photo(db, user.id).await?;
        let second = factory::create_member_photo(db, user.id).await?;
        UserRepository::new(db).set_avatar(user.id, Some(first.id)).await?;

        let member = PhotoService::new(db, &storage)
            .delete_member_photo(user.id, first.id)
            .await?;

        assert_eq!(member.photos.len(), 1);
        assert_eq!(member.user.avatar_id, Some(second.id));

        Ok(())
    }

    /// Tests that a photo whose files cannot be removed is still deleted.
    ///
    /// Expected: Ok, and the row is gone
    #[tokio::test]
    async fn unremovable_files_do_not_block_delete() -> Result<(), AppError> {
        let test = TestBuilder::new().with_member_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let storage = temp_storage("stuck");

        let user = factory::create_user(db).await?;
        let photo = factory::create_member_photo(db, user.id).await?;
        // A directory in place of the original makes `remove_file` fail.
        let original = photo.highres_url.rsplit('/').next().unwrap();
        std::fs::create_dir_all(storage.upload_dir().join(original)).unwrap();

        let member = PhotoService::new(db, &storage)
            .delete_member_photo(user.id, photo.id)
            .await?;

        assert!(member.photos.is_empty());
        assert!(PhotoRepository::new(db).find_by_id(photo.id).await?.is_none());

        Ok(())
    }

    /// Tests deleting a photo the member does not own.
    ///
    /// Expected: Err(NotFound) naming the photo id
    #[tokio::test]
    async fn deleting_unknown_photo_is_not_found() -> Result<(), AppError> {
        let test = TestBuilder::new().with_member_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let storage = temp_storage("unknown");

        let user = factory::create_user(db).await?;

        let result = PhotoService::new(db, &storage)
            .delete_member_photo(user.id, 77)
            .await;

        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "77 is not found"));

        Ok(())
    }

    /// Tests that non-hosts cannot add event photos.
    ///
    /// Expected: Err(AuthErr)
    #[tokio::test]
    async fn event_photo_requires_host() -> Result<(), AppError> {
        let test = TestBuilder::new().with_event_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let storage = temp_storage("event");

        let host = factory::create_user(db).await?;
        let stranger = factory::create_user(db).await?;
        let event = factory::create_event(db, host.id).await?;

        let result = PhotoService::new(db, &storage)
            .add_event_photo(stranger.id, event.id, png_upload())
            .await;
        assert!(matches!(result, Err(AppError::AuthErr(_))));

        let populated = PhotoService::new(db, &storage)
            .add_event_photo(host.id, event.id, png_upload())
            .await?;
        assert_eq!(populated.photos.len(), 1);

        Ok(())
    }
}
