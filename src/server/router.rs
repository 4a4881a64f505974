use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::{
    compression::CompressionLayer, services::ServeDir, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::server::{
    controller::{account, activity, admin, api_auth, event, member, oauth, photo, provider},
    middleware::{api_key::require_api_key, csrf::verify_csrf, return_to::track_return_to},
    service::storage::MAX_UPLOAD_BYTES,
    state::AppState,
};

/// Request body limit of the upload routes, leaving room for the multipart framing.
const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 512 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        api_auth::signup,
        api_auth::login,
        member::get_member,
        member::update_member,
        photo::upload_member_photo,
        photo::delete_member_photo,
        photo::upload_event_photo,
        photo::delete_event_photo,
        event::get_member_events,
        event::create_event,
        event::get_event,
        event::update_event,
        event::delete_event,
        event::find_events,
        event::create_venue,
        activity::join_event,
        activity::leave_event,
        activity::create_comment,
        activity::rate_event,
    ),
    tags(
        (name = "auth", description = "Token authentication"),
        (name = "member", description = "Member profiles"),
        (name = "photo", description = "Member and event photos"),
        (name = "event", description = "Events and venues"),
        (name = "activity", description = "Attendance, comments and ratings"),
    ),
)]
pub struct ApiDoc;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// JSON API behind the API key gateway.
fn api_router(state: &AppState) -> Router<AppState> {
    let uploads = Router::new()
        .route(
            "/api/members/{member_id}/photos",
            post(photo::upload_member_photo),
        )
        .route(
            "/api/events/{event_id}/photos",
            post(photo::upload_event_photo),
        )
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT));

    Router::new()
        .route("/api/signup", post(api_auth::signup))
        .route("/api/login", post(api_auth::login))
        .route(
            "/api/members/{member_id}",
            get(member::get_member).patch(member::update_member),
        )
        .route(
            "/api/members/{member_id}/photos/{photo_id}",
            delete(photo::delete_member_photo),
        )
        .route(
            "/api/members/{member_id}/events",
            get(event::get_member_events).post(event::create_event),
        )
        .route(
            "/api/members/{member_id}/events/{event_id}",
            get(event::get_event)
                .patch(event::update_event)
                .delete(event::delete_event),
        )
        .route("/api/events/find", get(event::find_events))
        .route(
            "/api/events/{event_id}/photos/{photo_id}",
            delete(photo::delete_event_photo),
        )
        .route("/api/events/{event_id}/venues", post(event::create_venue))
        .route(
            "/api/events/{event_id}/attendance",
            post(activity::join_event).delete(activity::leave_event),
        )
        .route(
            "/api/events/{event_id}/comments",
            post(activity::create_comment),
        )
        .route("/api/events/{event_id}/ratings", post(activity::rate_event))
        .merge(uploads)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ))
}

/// Session based pages: local login, account settings, OAuth, provider APIs and admin.
fn web_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(account::login))
        .route("/signup", post(account::signup))
        .route("/logout", get(account::logout))
        .route("/account", get(account::get_account))
        .route("/account/profile", post(account::update_profile))
        .route("/account/password", post(account::update_password))
        .route("/account/delete", post(account::delete_account))
        .route("/account/unlink/{provider}", get(account::unlink_provider))
        .route("/flash", get(account::get_flash))
        .route("/csrf-token", get(account::get_csrf_token))
        .route("/auth/{provider}", get(oauth::login))
        .route("/auth/{provider}/callback", get(oauth::callback))
        .route("/api/facebook", get(provider::get_facebook))
        .route("/api/foursquare", get(provider::get_foursquare))
        .route("/admin", get(admin::get_overview))
        .route("/admin/account/delete", post(admin::delete_account))
        .route("/admin/event/delete", post(admin::delete_event))
        .route("/admin/photo/delete", post(admin::delete_photo))
        .layer(middleware::from_fn(verify_csrf))
}

/// Builds the application router. The session layer is added by the caller.
///
/// `returnTo` is tracked for every route, the JSON API included.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(api_router(&state))
        .merge(web_router())
        .route("/api-docs/openapi.json", get(openapi))
        .nest_service("/uploads", ServeDir::new(state.storage.upload_dir()))
        .layer(middleware::from_fn(track_return_to))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
