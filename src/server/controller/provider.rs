use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tower_sessions::Session;

use crate::{
    model::api::ApiResponse,
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::oauth::Provider,
        service::provider_api::ProviderApiService,
        state::AppState,
    },
};

/// Facebook Graph profile of the logged in member.
///
/// # Access Control
/// - Session login and a stored Facebook token, otherwise redirected to `/auth/facebook`
///
/// # Returns
/// - `200 OK` - `{ profile }` as returned by the Graph API
/// - `502 Bad Gateway` - Graph request failed
pub async fn get_facebook(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session, state.admin_user_id)
        .require(&[Permission::ProviderToken(Provider::Facebook)])
        .await?;

    let profile = ProviderApiService::new(&state.db, &state.http_client)
        .facebook_profile(&user)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("success", json!({ "profile": profile }))),
    ))
}

/// Trending venues, a sample venue and the member's check-ins from Foursquare.
///
/// # Access Control
/// - Session login and a stored Foursquare token, otherwise redirected to `/auth/foursquare`
///
/// # Returns
/// - `200 OK` - `{ trendingVenues, venueDetail, userCheckins }`
/// - `502 Bad Gateway` - A Foursquare request failed
pub async fn get_foursquare(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session, state.admin_user_id)
        .require(&[Permission::ProviderToken(Provider::Foursquare)])
        .await?;

    let overview = ProviderApiService::new(&state.db, &state.http_client)
        .foursquare_overview(user.id)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success("success", overview))))
}
