//! Session based access control for the web pages.

use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::{user::UserRepository, user_token::UserTokenRepository},
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::{oauth::Provider, user::User},
};

pub enum Permission {
    /// Member id equals the configured admin id.
    Admin,
    /// Member holds an access token for the provider.
    ProviderToken(Provider),
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
    admin_user_id: Option<i32>,
}

impl<'a> AuthGuard<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        session: &'a Session,
        admin_user_id: Option<i32>,
    ) -> Self {
        Self {
            db,
            session,
            admin_user_id,
        }
    }

    /// Loads the logged in member and checks every permission in order.
    ///
    /// # Returns
    /// - `Ok(User)` - Logged in and all permissions satisfied
    /// - `Err(AuthError::LoginRequired)` - No member in the session
    /// - `Err(AuthError::UserNotInDatabase)` - Session points at a deleted account
    /// - `Err(AuthError::NotAdmin)` - Not the admin
    /// - `Err(AuthError::ProviderNotAuthorized)` - No token for a required provider
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Err(AuthError::LoginRequired.into());
        };

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if self.admin_user_id != Some(user.id) {
                        return Err(AuthError::NotAdmin(user.id).into());
                    }
                }
                Permission::ProviderToken(provider) => {
                    let token = UserTokenRepository::new(self.db)
                        .find_by_kind(user.id, provider.as_str())
                        .await?;
                    if token.is_none() {
                        return Err(
                            AuthError::ProviderNotAuthorized(provider.as_str().to_string()).into(),
                        );
                    }
                }
            }
        }

        Ok(user)
    }
}
