//! Admin panel listing and moderation deletes.

use sea_orm::DatabaseConnection;

use crate::{
    model::admin::AdminOverviewDto,
    server::{
        data::{photo::PhotoRepository, user::UserRepository},
        error::AppError,
        model::{event::PopulatedEvent, photo::Photo, user::User},
        service::{
            event::EventService, member::MemberService, photo::PhotoService,
            storage::PhotoStorage,
        },
    },
};

pub struct AdminService<'a> {
    db: &'a DatabaseConnection,
    storage: &'a PhotoStorage,
}

impl<'a> AdminService<'a> {
    pub fn new(db: &'a DatabaseConnection, storage: &'a PhotoStorage) -> Self {
        Self { db, storage }
    }

    /// All users, events and photos.
    pub async fn overview(&self) -> Result<AdminOverviewDto, AppError> {
        let users = UserRepository::new(self.db).get_all().await?;
        let events = EventService::new(self.db).find_all().await?;
        let photos = PhotoRepository::new(self.db).get_all().await?;

        Ok(AdminOverviewDto {
            users: users.into_iter().map(User::into_admin_dto).collect(),
            events: events.into_iter().map(PopulatedEvent::into_dto).collect(),
            photos: photos.into_iter().map(Photo::into_dto).collect(),
        })
    }

    pub async fn delete_account(&self, user_id: i32) -> Result<bool, AppError> {
        MemberService::new(self.db)
            .delete_account(user_id, self.storage)
            .await
    }

    pub async fn delete_event(&self, event_id: i32) -> Result<bool, AppError> {
        EventService::new(self.db).remove(event_id, self.storage).await
    }

    pub async fn delete_photo(&self, photo_id: i32) -> Result<bool, AppError> {
        PhotoService::new(self.db, self.storage)
            .delete_any(photo_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    /// Tests the overview after deleting an event.
    ///
    /// Expected: users and photos listed, deleted event gone
    #[tokio::test]
    async fn overview_reflects_deletes() -> Result<(), AppError> {
        let test = TestBuilder::new().with_event_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let storage = PhotoStorage::new(std::env::temp_dir(), "http://localhost:7000");

        let user = factory::create_user(db).await?;
        factory::create_member_photo(db, user.id).await?;
        let kept = factory::create_event(db, user.id).await?;
        let removed = factory::create_event(db, user.id).await?;

        let service = AdminService::new(db, &storage);
        assert!(service.delete_event(removed.id).await?);
        assert!(!service.delete_event(removed.id).await?);

        let overview = service.overview().await?;
        assert_eq!(overview.users.len(), 1);
        assert_eq!(overview.photos.len(), 1);
        assert_eq!(
            overview.events.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![kept.id]
        );

        Ok(())
    }

    /// Tests deleting a member photo that is the avatar.
    ///
    /// Expected: photo removed and avatar cleared
    #[tokio::test]
    async fn delete_photo_clears_avatar() -> Result<(), AppError> {
        let test = TestBuilder::new().with_member_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let storage = PhotoStorage::new(std::env::temp_dir(), "http://localhost:7000");

        let user = factory::create_user(db).await?;
        let photo = factory::create_member_photo(db, user.id).await?;
        UserRepository::new(db).set_avatar(user.id, Some(photo.id)).await?;

        assert!(AdminService::new(db, &storage).delete_photo(photo.id).await?);

        let user = UserRepository::new(db).find_by_id(user.id).await?.unwrap();
        assert_eq!(user.avatar_id, None);

        Ok(())
    }
}
