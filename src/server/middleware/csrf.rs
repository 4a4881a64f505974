//! CSRF check for state-changing form posts outside `/api`.

use axum::{
    extract::Request,
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::session::CsrfSession,
};

pub const CSRF_HEADER: &str = "x-csrf-token";

/// Whether a request must present the form token.
pub fn requires_token(method: &Method, path: &str) -> bool {
    let is_api = path == "/api" || path.starts_with("/api/");

    !is_api && matches!(*method, Method::POST | Method::PUT | Method::PATCH | Method::DELETE)
}

/// Compares the `x-csrf-token` header with the session token on form posts.
pub async fn verify_csrf(session: Session, request: Request, next: Next) -> Response {
    if !requires_token(request.method(), request.uri().path()) {
        return next.run(request).await;
    }

    let candidate = request
        .headers()
        .get(CSRF_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    match CsrfSession::new(&session).verify_form_token(&candidate).await {
        Ok(true) => next.run(request).await,
        Ok(false) => AppError::from(AuthError::CsrfValidationFailed).into_response(),
        Err(e) => e.into_response(),
    }
}
