//! Local credential accounts.
//!
//! Passwords are hashed with Argon2 into PHC strings. Hashing and verification run on the
//! blocking thread pool since both are CPU bound.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, internal::InternalError, AppError},
    model::user::{CreateUserParam, User},
};

pub const EMAIL_TAKEN: &str = "Account with that email address already exists.";

/// Hashes a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, InternalError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| InternalError::PasswordHash(e.to_string()))?;

    Ok(hash.to_string())
}

/// Checks a candidate password against a stored PHC string.
///
/// A malformed stored hash counts as a mismatch.
pub fn verify_password(candidate: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok()
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a local account.
    ///
    /// # Arguments
    /// - `email` - Validated email, matched case-insensitively against existing accounts
    /// - `password` - Validated plain password
    ///
    /// # Returns
    /// - `Ok(User)` - The new member
    /// - `Err(AppError::BadRequest)` - Email already in use
    /// - `Err(AppError::InternalErr)` - Hashing failed
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn signup(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);

        if user_repo.find_by_email(email).await?.is_some() {
            return Err(AppError::BadRequest(EMAIL_TAKEN.to_string()));
        }

        let password_hash = hash_blocking(password.to_string()).await?;

        let user = user_repo
            .create(CreateUserParam {
                email: Some(email.to_string()),
                password_hash: Some(password_hash),
                ..Default::default()
            })
            .await?;

        tracing::info!("New local account {} created", user.id);

        Ok(user)
    }

    /// Authenticates email and password.
    ///
    /// Unknown email, provider-only accounts and wrong passwords all produce the same error.
    ///
    /// # Returns
    /// - `Ok(User)` - Credentials valid
    /// - `Err(AppError::AuthErr(InvalidCredentials))` - Credentials rejected
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);

        let Some(user) = user_repo.find_by_email(email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };
        let Some(hash) = user.password_hash.clone() else {
            return Err(AuthError::InvalidCredentials.into());
        };

        let candidate = password.to_string();
        let matches =
            tokio::task::spawn_blocking(move || verify_password(&candidate, &hash))
                .await
                .map_err(InternalError::from)?;

        if !matches {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(user)
    }

    /// Replaces the member's password.
    pub async fn change_password(&self, user_id: i32, password: &str) -> Result<(), AppError> {
        let password_hash = hash_blocking(password.to_string()).await?;

        UserRepository::new(self.db)
            .set_password(user_id, password_hash)
            .await?;

        Ok(())
    }
}

async fn hash_blocking(password: String) -> Result<String, AppError> {
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(InternalError::from)??;

    Ok(hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::builder::TestBuilder;

    #[test]
    fn hash_verifies_only_original_password() {
        let hash = hash_password("secret1").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("secret1", &hash));
        assert!(!verify_password("secret2", &hash));
        assert!(!verify_password("secret1", "not-a-hash"));
    }

    /// Tests the signup then login flow.
    ///
    /// Expected: login with the same credentials returns the new member, any casing of email
    #[tokio::test]
    async fn signup_then_login() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::User)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = AuthService::new(db);
        let created = service.signup("new@example.com", "secret1").await?;
        let logged_in = service.login("NEW@example.com", "secret1").await?;

        assert_eq!(created.id, logged_in.id);

        Ok(())
    }

    /// Tests signup with an email that already exists.
    ///
    /// Expected: Err(BadRequest) with the duplicate email message
    #[tokio::test]
    async fn signup_rejects_duplicate_email() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::User)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = AuthService::new(db);
        service.signup("dup@example.com", "secret1").await?;
        let result = service.signup("Dup@Example.com", "secret2").await;

        assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg == EMAIL_TAKEN));

        Ok(())
    }

    /// Tests login failures.
    ///
    /// Expected: InvalidCredentials for both a wrong password and an unknown email
    #[tokio::test]
    async fn login_rejects_bad_credentials() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::User)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = AuthService::new(db);
        service.signup("user@example.com", "secret1").await?;

        let wrong_password = service.login("user@example.com", "nope").await;
        let unknown_email = service.login("ghost@example.com", "secret1").await;

        assert!(matches!(
            wrong_password,
            Err(AppError::AuthErr(AuthError::InvalidCredentials))
        ));
        assert!(matches!(
            unknown_email,
            Err(AppError::AuthErr(AuthError::InvalidCredentials))
        ));

        Ok(())
    }

    /// Tests that a changed password replaces the old one.
    ///
    /// Expected: old password rejected, new one accepted
    #[tokio::test]
    async fn change_password_replaces_hash() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::User)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = AuthService::new(db);
        let user = service.signup("pw@example.com", "first1").await?;
        service.change_password(user.id, "second2").await?;

        assert!(service.login("pw@example.com", "first1").await.is_err());
        assert!(service.login("pw@example.com", "second2").await.is_ok());

        Ok(())
    }
}
