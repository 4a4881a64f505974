//! API key gateway in front of the JSON API.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::server::{
    error::{auth::AuthError, AppError},
    state::AppState,
};

const API_KEY_PARAM: &str = "apikey";

/// Reads the key from the `apikey` query parameter, then the `apikey` header.
pub fn extract_api_key(request: &Request) -> Option<String> {
    let from_query = request.uri().query().and_then(|query| {
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == API_KEY_PARAM)
            .map(|(_, value)| value.into_owned())
    });

    from_query.or_else(|| {
        request
            .headers()
            .get(API_KEY_PARAM)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    })
}

/// Rejects requests whose key does not match the configured one.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match extract_api_key(&request) {
        Some(key) if key == state.api_key => Ok(next.run(request).await),
        _ => Err(AuthError::InvalidApiKey.into()),
    }
}
