//! Remembers which page to open after logging in.

use axum::{extract::Request, middleware::Next, response::Response};
use tower_sessions::Session;

use crate::server::middleware::session::{AuthSession, ReturnToSession};

/// Whether an anonymous visit to `path` should become the post-login target.
pub fn is_return_target(path: &str) -> bool {
    !matches!(path, "/login" | "/signup" | "/flash" | "/csrf-token")
        && !path.starts_with("/auth")
        && !path.contains('.')
}

/// Stores `returnTo` the way the login redirect expects it.
///
/// Anonymous visitors record any eligible path. Logged in members only record `/account`.
pub async fn track_return_to(session: Session, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();

    let logged_in = match AuthSession::new(&session).is_authenticated().await {
        Ok(logged_in) => logged_in,
        Err(e) => {
            tracing::warn!("Failed to read session while tracking returnTo: {}", e);
            return next.run(request).await;
        }
    };

    let remember = if logged_in {
        path == "/account"
    } else {
        is_return_target(&path)
    };

    if remember {
        if let Err(e) = ReturnToSession::new(&session).set(path).await {
            tracing::warn!("Failed to store returnTo: {}", e);
        }
    }

    next.run(request).await
}
