//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing member records in the database.
//! It handles account creation, credential and provider updates, profile edits and account
//! removal, converting between entity models and domain models at the infrastructure boundary.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::{
    oauth::Provider,
    user::{CreateUserParam, UpdateProfileParam, User, DEFAULT_GENDER, DEFAULT_LOCATION},
};

/// Repository providing database operations for member accounts.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new member.
    ///
    /// The email is lowercased before storing. Gender and location fall back to `male` and
    /// `Hong Kong` when not provided.
    ///
    /// # Arguments
    /// - `param` - Account fields; the password must already be hashed
    ///
    /// # Returns
    /// - `Ok(User)` - The created member
    /// - `Err(DbErr)` - Database error, including unique violations on email or provider ids
    pub async fn create(&self, param: CreateUserParam) -> Result<User, DbErr> {
        let now = Utc::now();

        let entity = entity::user::ActiveModel {
            email: ActiveValue::Set(param.email.map(|email| email.to_lowercase())),
            password: ActiveValue::Set(param.password_hash),
            facebook: ActiveValue::Set(param.facebook),
            google: ActiveValue::Set(param.google),
            name: ActiveValue::Set(param.name),
            gender: ActiveValue::Set(param.gender.unwrap_or_else(|| DEFAULT_GENDER.to_string())),
            location: ActiveValue::Set(
                param
                    .location
                    .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            ),
            phone: ActiveValue::Set(None),
            website: ActiveValue::Set(None),
            picture: ActiveValue::Set(param.picture),
            avatar_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    pub async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(user_id)
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds a member by email, ignoring case.
    ///
    /// # Arguments
    /// - `email` - Email in any case
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Member owning the email
    /// - `Ok(None)` - No member uses the email
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email.to_lowercase()))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds the member linked to a provider account.
    ///
    /// Always `None` for providers that are not used for sign-in.
    pub async fn find_by_provider_id(
        &self,
        provider: Provider,
        provider_id: &str,
    ) -> Result<Option<User>, DbErr> {
        let column = match provider {
            Provider::Facebook => entity::user::Column::Facebook,
            Provider::Google => entity::user::Column::Google,
            Provider::Foursquare => return Ok(None),
        };

        let entity = entity::prelude::User::find()
            .filter(column.eq(provider_id))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Lists all members, oldest first.
    pub async fn get_all(&self) -> Result<Vec<User>, DbErr> {
        let entities = entity::prelude::User::find()
            .order_by_asc(entity::user::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(User::from_entity).collect())
    }

    /// Looks up several members at once, e.g. the hosts of a page of events.
    pub async fn get_by_ids(&self, user_ids: Vec<i32>) -> Result<Vec<User>, DbErr> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(user_ids))
            .order_by_asc(entity::user::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(User::from_entity).collect())
    }

    /// Checks whether `email` belongs to a member other than `except_user_id`.
    pub async fn email_taken(&self, email: &str, except_user_id: i32) -> Result<bool, DbErr> {
        let owner = self.find_by_email(email).await?;

        Ok(owner.is_some_and(|user| user.id != except_user_id))
    }

    /// Applies profile changes, leaving `None` fields untouched.
    ///
    /// # Arguments
    /// - `user_id` - Member to update
    /// - `param` - Fields to change; email is lowercased
    ///
    /// # Returns
    /// - `Ok(User)` - Updated member
    /// - `Err(DbErr::RecordNotUpdated)` - No member with that id
    /// - `Err(DbErr)` - Other database error
    pub async fn update_profile(
        &self,
        user_id: i32,
        param: UpdateProfileParam,
    ) -> Result<User, DbErr> {
        let entity = entity::user::ActiveModel {
            id: ActiveValue::Unchanged(user_id),
            email: set_some(param.email.map(|email| Some(email.to_lowercase()))),
            name: set_some(param.name.map(Some)),
            gender: set_some(param.gender),
            location: set_some(param.location),
            phone: set_some(param.phone.map(Some)),
            website: set_some(param.website.map(Some)),
            picture: set_some(param.picture.map(Some)),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    pub async fn set_password(&self, user_id: i32, password_hash: String) -> Result<(), DbErr> {
        entity::user::ActiveModel {
            id: ActiveValue::Unchanged(user_id),
            password: ActiveValue::Set(Some(password_hash)),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    /// Sets or clears the member's account id for a sign-in provider.
    ///
    /// Does nothing for providers that are not used for sign-in.
    pub async fn set_provider_id(
        &self,
        user_id: i32,
        provider: Provider,
        provider_id: Option<String>,
    ) -> Result<(), DbErr> {
        let mut model = entity::user::ActiveModel {
            id: ActiveValue::Unchanged(user_id),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };

        match provider {
            Provider::Facebook => model.facebook = ActiveValue::Set(provider_id),
            Provider::Google => model.google = ActiveValue::Set(provider_id),
            Provider::Foursquare => return Ok(()),
        }

        model.update(self.db).await?;

        Ok(())
    }

    pub async fn set_avatar(&self, user_id: i32, avatar_id: Option<i32>) -> Result<(), DbErr> {
        entity::user::ActiveModel {
            id: ActiveValue::Unchanged(user_id),
            avatar_id: ActiveValue::Set(avatar_id),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    /// Deletes a member together with their tokens, photo rows, hosting, attendance,
    /// comments and ratings.
    ///
    /// Photo files on disk are not touched; callers remove them first.
    ///
    /// # Returns
    /// - `Ok(true)` - Member deleted
    /// - `Ok(false)` - No member with that id
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, user_id: i32) -> Result<bool, DbErr> {
        entity::prelude::UserToken::delete_many()
            .filter(entity::user_token::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;
        entity::prelude::Photo::delete_many()
            .filter(entity::photo::Column::MemberId.eq(user_id))
            .exec(self.db)
            .await?;
        entity::prelude::EventHost::delete_many()
            .filter(entity::event_host::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;
        entity::prelude::EventAttendance::delete_many()
            .filter(entity::event_attendance::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;
        entity::prelude::EventComment::delete_many()
            .filter(entity::event_comment::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;
        entity::prelude::EventRating::delete_many()
            .filter(entity::event_rating::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        let result = entity::prelude::User::delete_by_id(user_id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

fn set_some<T>(value: Option<T>) -> ActiveValue<T>
where
    T: Into<sea_orm::Value>,
{
    match value {
        Some(value) => ActiveValue::Set(value),
        None => ActiveValue::NotSet,
    }
}
