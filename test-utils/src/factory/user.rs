//! User factory for creating test member entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test members with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::user::UserFactory;
///
/// let user = UserFactory::new(&db)
///     .email("custom@example.com")
///     .name("Custom")
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    email: Option<String>,
    password: Option<String>,
    facebook: Option<String>,
    google: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - email: `"user{id}@example.com"` where id is auto-incremented
    /// - name: `"User {id}"`
    /// - password, provider ids and picture: `None`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            email: Some(format!("user{}@example.com", id)),
            password: None,
            facebook: None,
            google: None,
            name: Some(format!("User {}", id)),
            picture: None,
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn no_email(mut self) -> Self {
        self.email = None;
        self
    }

    /// Sets the stored password column verbatim; pass an already hashed value.
    pub fn password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password = Some(hash.into());
        self
    }

    pub fn facebook(mut self, id: impl Into<String>) -> Self {
        self.facebook = Some(id.into());
        self
    }

    pub fn google(mut self, id: impl Into<String>) -> Self {
        self.google = Some(id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn no_name(mut self) -> Self {
        self.name = None;
        self
    }

    pub fn picture(mut self, picture: impl Into<String>) -> Self {
        self.picture = Some(picture.into());
        self
    }

    /// Builds and inserts the user entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::user::Model)` - Created user entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now();
        entity::user::ActiveModel {
            email: ActiveValue::Set(self.email),
            password: ActiveValue::Set(self.password),
            facebook: ActiveValue::Set(self.facebook),
            google: ActiveValue::Set(self.google),
            name: ActiveValue::Set(self.name),
            gender: ActiveValue::Set("male".to_string()),
            location: ActiveValue::Set("Hong Kong".to_string()),
            phone: ActiveValue::Set(None),
            website: ActiveValue::Set(None),
            picture: ActiveValue::Set(self.picture),
            avatar_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a user with default values.
///
/// Shorthand for `UserFactory::new(db).build().await`.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_user_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(User).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = create_user(db).await?;

        assert!(user.email.is_some());
        assert!(user.password.is_none());
        assert_eq!(user.gender, "male");
        assert_eq!(user.location, "Hong Kong");

        Ok(())
    }

    #[tokio::test]
    async fn creates_multiple_unique_users() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(User).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user1 = create_user(db).await?;
        let user2 = create_user(db).await?;

        assert_ne!(user1.id, user2.id);
        assert_ne!(user1.email, user2.email);

        Ok(())
    }
}
