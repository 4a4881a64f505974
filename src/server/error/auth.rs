use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Email unknown or password mismatch during local login.
    ///
    /// Both cases share a message so the response does not reveal which accounts exist.
    /// Results in a 401 Unauthorized response.
    #[error("Invalid email or password.")]
    InvalidCredentials,

    /// Authorization header missing, malformed, or carrying a token that fails verification.
    #[error("401 Unauthorized: JWT is not correct")]
    InvalidJwt,

    /// User id named by the JWT claims no longer exists.
    #[error("User of ID from JWT payload is not found.")]
    JwtUserNotFound(i32),

    /// Member addressed by the `member_id` route parameter does not exist.
    #[error("User of ID from request params is not found.")]
    ParamUserNotFound(i32),

    /// Authenticated principal is not allowed to perform the action.
    ///
    /// # Fields
    /// - User id of the principal
    /// - Description of the attempted action, logged at debug level
    #[error("403 Forbidden: No permission")]
    AccessDenied(i32, String),

    /// Logged in member is not the configured admin.
    #[error("No permission")]
    NotAdmin(i32),

    /// Missing or wrong API key on an `/api` route.
    #[error("Unauthorized: API key is not correct")]
    InvalidApiKey,

    /// No user id in the session for a login protected page.
    #[error("Login required")]
    LoginRequired,

    /// Session user id points at a deleted account.
    #[error("User {0} in session does not exist")]
    UserNotInDatabase(i32),

    /// Logged in member holds no access token for the provider.
    #[error("No {0} access token for this account")]
    ProviderNotAuthorized(String),

    /// CSRF state validation failed during OAuth callback or a form post.
    ///
    /// The token submitted with the request does not match the token stored in the
    /// session. Results in a 403 Forbidden response.
    #[error("CSRF token mismatch")]
    CsrfValidationFailed,

    /// Exchanging an authorization code with a provider failed.
    #[error("Failed to exchange authorization code: {0}")]
    TokenExchange(String),
}

/// Converts authentication errors into HTTP responses.
///
/// JSON API failures render the error envelope with 401 or 403. Session guard failures used
/// by the web pages answer with redirects instead:
/// - `LoginRequired` / `UserNotInDatabase` → redirect to `/login`
/// - `ProviderNotAuthorized(provider)` → redirect to `/auth/{provider}`
///
/// Access denials are logged at debug level with the attempted action.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::LoginRequired | Self::UserNotInDatabase(_) => {
                Redirect::to("/login").into_response()
            }
            Self::ProviderNotAuthorized(provider) => {
                Redirect::to(&format!("/auth/{}", provider)).into_response()
            }
            Self::AccessDenied(user_id, ref action) => {
                tracing::debug!("Access denied for user {}: {}", user_id, action);
                (StatusCode::FORBIDDEN, Json(ErrorDto::message(self.to_string()))).into_response()
            }
            Self::NotAdmin(user_id) => {
                tracing::debug!("User {} attempted to open the admin panel", user_id);
                (StatusCode::FORBIDDEN, Json(ErrorDto::message(self.to_string()))).into_response()
            }
            Self::CsrfValidationFailed => {
                (StatusCode::FORBIDDEN, Json(ErrorDto::message(self.to_string()))).into_response()
            }
            Self::TokenExchange(ref reason) => {
                tracing::debug!("OAuth token exchange failed: {}", reason);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorDto::message(
                        "There was an issue logging you in, please try again.",
                    )),
                )
                    .into_response()
            }
            Self::InvalidCredentials
            | Self::InvalidJwt
            | Self::JwtUserNotFound(_)
            | Self::ParamUserNotFound(_)
            | Self::InvalidApiKey => {
                (StatusCode::UNAUTHORIZED, Json(ErrorDto::message(self.to_string())))
                    .into_response()
            }
        }
    }
}
