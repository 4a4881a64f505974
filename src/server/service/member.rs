//! Member profiles and account management.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{photo::PhotoRepository, user::UserRepository, user_token::UserTokenRepository},
    error::AppError,
    model::{
        oauth::Provider,
        user::{Member, UpdateProfileParam, User},
    },
    service::storage::PhotoStorage,
    util::validate::FieldError,
};

pub const EMAIL_IN_USE: &str =
    "The email address you have entered is already associated with an account.";

pub fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("{} is not found", id))
}

pub struct MemberService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MemberService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads a member with their photos.
    ///
    /// # Returns
    /// - `Ok(Member)` - Member and photos
    /// - `Err(AppError::NotFound)` - No member with that id
    pub async fn get(&self, user_id: i32) -> Result<Member, AppError> {
        let user = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| not_found(user_id))?;

        self.with_photos(user).await
    }

    /// Attaches photos to an already loaded user.
    pub async fn with_photos(&self, user: User) -> Result<Member, AppError> {
        let photos = PhotoRepository::new(self.db).get_by_member(user.id).await?;

        Ok(Member { user, photos })
    }

    /// Applies a validated profile update.
    ///
    /// The avatar must reference one of the member's own photos and the email must not
    /// belong to another account.
    ///
    /// # Arguments
    /// - `user_id` - Member being edited
    /// - `param` - Sanitized fields; `None` keeps the stored value
    /// - `avatar_id` - Requested avatar photo id
    ///
    /// # Returns
    /// - `Ok(Member)` - Updated member with photos
    /// - `Err(AppError::Validation)` - Avatar is not one of the member's photos
    /// - `Err(AppError::BadRequest)` - Email used by another account
    pub async fn update_profile(
        &self,
        user_id: i32,
        param: UpdateProfileParam,
        avatar_id: Option<i32>,
    ) -> Result<Member, AppError> {
        let user_repo = UserRepository::new(self.db);
        let member = self.get(user_id).await?;

        if let Some(avatar_id) = avatar_id {
            if !member.photos.iter().any(|photo| photo.id == avatar_id) {
                let ids: Vec<String> = member.photos.iter().map(|p| p.id.to_string()).collect();
                return Err(AppError::Validation(vec![FieldError::new(
                    "avatar",
                    format!("Avatar should only be one of the [{}]", ids.join(",")),
                    Some(avatar_id.to_string()),
                )]));
            }
        }

        if let Some(email) = param.email.as_deref() {
            if user_repo.email_taken(email, user_id).await? {
                return Err(AppError::BadRequest(EMAIL_IN_USE.to_string()));
            }
        }

        user_repo.update_profile(user_id, param).await?;
        if avatar_id.is_some() {
            user_repo.set_avatar(user_id, avatar_id).await?;
        }

        self.get(user_id).await
    }

    /// Member with the provider kinds they hold tokens for.
    pub async fn account(&self, user_id: i32) -> Result<(User, Vec<String>), AppError> {
        let user = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| not_found(user_id))?;
        let kinds = UserTokenRepository::new(self.db).get_kinds(user_id).await?;

        Ok((user, kinds))
    }

    /// Detaches a provider: clears its account id and drops its tokens.
    pub async fn unlink(&self, user_id: i32, provider: Provider) -> Result<(), AppError> {
        UserRepository::new(self.db)
            .set_provider_id(user_id, provider, None)
            .await?;
        UserTokenRepository::new(self.db)
            .delete_by_kind(user_id, provider.as_str())
            .await?;

        tracing::info!("User {} unlinked {}", user_id, provider.as_str());

        Ok(())
    }

    /// Deletes the account, its photo files and all dependent rows.
    ///
    /// # Returns
    /// - `Ok(true)` - Account deleted
    /// - `Ok(false)` - No account with that id
    pub async fn delete_account(
        &self,
        user_id: i32,
        storage: &PhotoStorage,
    ) -> Result<bool, AppError> {
        let photos = PhotoRepository::new(self.db).get_by_member(user_id).await?;

        let deleted = UserRepository::new(self.db).delete(user_id).await?;
        if deleted {
            storage.discard(&photos).await;
            tracing::info!("User {} deleted", user_id);
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    /// Tests a profile update with a valid avatar.
    ///
    /// Expected: fields and avatar updated
    #[tokio::test]
    async fn updates_profile_and_avatar() -> Result<(), AppError> {
        let test = TestBuilder::new().with_member_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = factory::user::create_user(db).await?;
        let photo = factory::photo::create_member_photo(db, user.id).await?;

        let member = MemberService::new(db)
            .update_profile(
                user.id,
                UpdateProfileParam {
                    location: Some("Kowloon".to_string()),
                    ..Default::default()
                },
                Some(photo.id),
            )
            .await?;

        assert_eq!(member.user.location, "Kowloon");
        assert_eq!(member.avatar().map(|p| p.id), Some(photo.id));

        Ok(())
    }

    /// Tests that a foreign photo cannot become the avatar.
    ///
    /// Expected: Err(Validation) on the avatar field
    #[tokio::test]
    async fn rejects_foreign_avatar() -> Result<(), AppError> {
        let test = TestBuilder::new().with_member_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = factory::user::create_user(db).await?;
        let other = factory::user::create_user(db).await?;
        let foreign = factory::photo::create_member_photo(db, other.id).await?;

        let result = MemberService::new(db)
            .update_profile(user.id, UpdateProfileParam::default(), Some(foreign.id))
            .await;

        assert!(matches!(result, Err(AppError::Validation(e)) if e[0].param == "avatar"));

        Ok(())
    }

    /// Tests that another member's email is rejected.
    ///
    /// Expected: Err(BadRequest) with the duplicate message
    #[tokio::test]
    async fn rejects_email_of_other_member() -> Result<(), AppError> {
        let test = TestBuilder::new().with_member_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = factory::user::create_user(db).await?;
        factory::user::UserFactory::new(db)
            .email("taken@example.com")
            .build()
            .await?;

        let result = MemberService::new(db)
            .update_profile(
                user.id,
                UpdateProfileParam {
                    email: Some("taken@example.com".to_string()),
                    ..Default::default()
                },
                None,
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg == EMAIL_IN_USE));

        Ok(())
    }

    /// Tests unlinking a provider.
    ///
    /// Expected: provider id cleared and its tokens removed, other tokens kept
    #[tokio::test]
    async fn unlink_clears_id_and_tokens() -> Result<(), AppError> {
        let test = TestBuilder::new().with_member_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = factory::user::UserFactory::new(db)
            .facebook("fb-1")
            .build()
            .await?;
        factory::helpers::add_token(db, user.id, "facebook").await?;
        factory::helpers::add_token(db, user.id, "foursquare").await?;

        let service = MemberService::new(db);
        service.unlink(user.id, Provider::Facebook).await?;

        let (account, kinds) = service.account(user.id).await?;
        assert!(account.facebook.is_none());
        assert_eq!(kinds, vec!["foursquare".to_string()]);

        Ok(())
    }

    /// Tests loading an unknown member.
    ///
    /// Expected: Err(NotFound)
    #[tokio::test]
    async fn get_unknown_member_is_not_found() -> Result<(), AppError> {
        let test = TestBuilder::new().with_member_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let result = MemberService::new(db).get(31337).await;

        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "31337 is not found"));

        Ok(())
    }
}
