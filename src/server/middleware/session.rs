//! Type-safe session management wrappers.
//!
//! Each struct wraps the same underlying `Session` but exposes only the keys of its own
//! concern:
//! - `AuthSession` - Logged in member id
//! - `CsrfSession` - OAuth state and the form CSRF token
//! - `FlashSession` - One-shot messages shown after a redirect
//! - `ReturnToSession` - Page to return to after logging in

use rand::Rng;
use tower_sessions::Session;

use crate::{model::account::FlashDto, server::error::AppError};

const SESSION_AUTH_USER_ID: &str = "auth:user";
const SESSION_AUTH_CSRF_TOKEN: &str = "auth:csrf_token";
const SESSION_FORM_CSRF_TOKEN: &str = "csrf:form";
const SESSION_FLASH: &str = "flash";
const SESSION_RETURN_TO: &str = "returnTo";

/// Authentication session management.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the member id after a successful login.
    ///
    /// The session id is rotated first so a pre-login id cannot be reused.
    ///
    /// # Returns
    /// - `Ok(())` - User ID successfully stored
    /// - `Err(AppError::SessionErr(_))` - Failed to store in session
    pub async fn set_user_id(&self, user_id: i32) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        self.session.insert(SESSION_AUTH_USER_ID, user_id).await?;
        Ok(())
    }

    /// Retrieves the logged in member id.
    ///
    /// # Returns
    /// - `Ok(Some(user_id))` - User is logged in
    /// - `Ok(None)` - No user in session
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn get_user_id(&self) -> Result<Option<i32>, AppError> {
        Ok(self.session.get::<i32>(SESSION_AUTH_USER_ID).await?)
    }

    pub async fn is_authenticated(&self) -> Result<bool, AppError> {
        Ok(self.get_user_id().await?.is_some())
    }

    /// Clears all data from the session and deletes it from the store.
    pub async fn clear(&self) -> Result<(), AppError> {
        self.session.flush().await?;
        Ok(())
    }
}

/// CSRF protection session management.
///
/// Holds two independent tokens: the single-use OAuth `state` checked on provider
/// callbacks, and the long-lived token expected on state-changing form posts.
pub struct CsrfSession<'a> {
    session: &'a Session,
}

impl<'a> CsrfSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the OAuth state sent to the provider.
    pub async fn set_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_CSRF_TOKEN, token).await?;
        Ok(())
    }

    /// Retrieves and removes the OAuth state so each one is used once.
    ///
    /// # Returns
    /// - `Ok(Some(token))` - State was found and removed
    /// - `Ok(None)` - No state in session
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn take_token(&self) -> Result<Option<String>, AppError> {
        let token = self.session.remove(SESSION_AUTH_CSRF_TOKEN).await?;
        Ok(token)
    }

    /// Returns the form token, creating one on first use.
    pub async fn form_token(&self) -> Result<String, AppError> {
        if let Some(token) = self.session.get::<String>(SESSION_FORM_CSRF_TOKEN).await? {
            return Ok(token);
        }

        let token = format!("{:032x}", rand::rng().random::<u128>());
        self.session
            .insert(SESSION_FORM_CSRF_TOKEN, token.clone())
            .await?;

        Ok(token)
    }

    /// Whether `candidate` matches the stored form token. No stored token never matches.
    pub async fn verify_form_token(&self, candidate: &str) -> Result<bool, AppError> {
        let stored = self.session.get::<String>(SESSION_FORM_CSRF_TOKEN).await?;

        Ok(matches!(stored, Some(token) if !token.is_empty() && token == candidate))
    }
}

/// Category of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Errors,
    Info,
    Success,
}

/// Flash message storage.
pub struct FlashSession<'a> {
    session: &'a Session,
}

impl<'a> FlashSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Queues a message until the next `take`.
    pub async fn push(&self, kind: FlashKind, message: impl Into<String>) -> Result<(), AppError> {
        let mut flash = self
            .session
            .get::<FlashDto>(SESSION_FLASH)
            .await?
            .unwrap_or_default();

        let list = match kind {
            FlashKind::Errors => &mut flash.errors,
            FlashKind::Info => &mut flash.info,
            FlashKind::Success => &mut flash.success,
        };
        list.push(message.into());

        self.session.insert(SESSION_FLASH, flash).await?;
        Ok(())
    }

    /// Removes and returns every queued message.
    pub async fn take(&self) -> Result<FlashDto, AppError> {
        let flash = self.session.remove::<FlashDto>(SESSION_FLASH).await?;
        Ok(flash.unwrap_or_default())
    }
}

/// Post-login redirect target.
pub struct ReturnToSession<'a> {
    session: &'a Session,
}

impl<'a> ReturnToSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn set(&self, path: impl Into<String>) -> Result<(), AppError> {
        self.session.insert(SESSION_RETURN_TO, path.into()).await?;
        Ok(())
    }

    /// Removes the stored target, falling back to `/`.
    pub async fn take_or_root(&self) -> Result<String, AppError> {
        let path = self.session.remove::<String>(SESSION_RETURN_TO).await?;
        Ok(path.unwrap_or_else(|| "/".to_string()))
    }
}
