use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        event::{EventListDto, EventPayloadDto, EventResponseDto, VenuePayloadDto},
    },
    server::{
        controller::extract::{JsonBody, PathParam},
        error::AppError,
        middleware::jwt::JwtGuard,
        model::{
            event::{EventParam, PopulatedEvent},
            venue::CreateVenueParam,
        },
        service::event::EventService,
        state::AppState,
    },
};

/// Tag for grouping event endpoints in OpenAPI documentation
pub static EVENT_TAG: &str = "event";

fn event_list(events: Vec<PopulatedEvent>) -> ApiResponse<EventListDto> {
    ApiResponse::success(
        "success",
        EventListDto {
            events: events.into_iter().map(PopulatedEvent::into_dto).collect(),
        },
    )
}

fn single_event(event: PopulatedEvent) -> ApiResponse<EventResponseDto> {
    ApiResponse::success(
        "success",
        EventResponseDto {
            event: event.into_dto(),
        },
    )
}

/// List the events a member hosts.
///
/// # Access Control
/// - API key and JWT
///
/// # Returns
/// - `200 OK` - Populated hosted events
/// - `401 Unauthorized` - Invalid JWT or unknown member
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/members/{member_id}/events",
    tag = EVENT_TAG,
    params(
        ("member_id" = i32, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved events", body = EventListDto),
        (status = 401, description = "JWT is not correct or member not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_member_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    method: Method,
    PathParam(member_id): PathParam<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = JwtGuard::new(&state.db, &state.jwt_keys)
        .require(&headers, &method, Some(member_id))
        .await?;

    let events = EventService::new(&state.db).list_hosted(member_id).await?;

    Ok((StatusCode::OK, Json(event_list(events))))
}

/// Create an event hosted by the caller.
///
/// # Access Control
/// - API key and JWT of the same member
///
/// # Returns
/// - `201 Created` - All events the caller hosts
/// - `400 Bad Request` - Invalid event data
/// - `401 Unauthorized` - Invalid JWT
/// - `403 Forbidden` - Creating for another member
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/members/{member_id}/events",
    tag = EVENT_TAG,
    params(
        ("member_id" = i32, Path, description = "Member ID")
    ),
    request_body = EventPayloadDto,
    responses(
        (status = 201, description = "Successfully created event", body = EventListDto),
        (status = 400, description = "Invalid event data", body = ErrorDto),
        (status = 401, description = "JWT is not correct", body = ErrorDto),
        (status = 403, description = "No permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    method: Method,
    PathParam(member_id): PathParam<i32>,
    JsonBody(payload): JsonBody<EventPayloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let principal = JwtGuard::new(&state.db, &state.jwt_keys)
        .require(&headers, &method, Some(member_id))
        .await?;

    let param = EventParam::from_dto(payload)?;
    let events = EventService::new(&state.db)
        .create(principal.user_id(), param)
        .await?;

    Ok((StatusCode::CREATED, Json(event_list(events))))
}

/// Get one event.
///
/// # Access Control
/// - API key and JWT
///
/// # Returns
/// - `200 OK` - Populated event
/// - `401 Unauthorized` - Invalid JWT or unknown member
/// - `404 Not Found` - Unknown event
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/members/{member_id}/events/{event_id}",
    tag = EVENT_TAG,
    params(
        ("member_id" = i32, Path, description = "Member ID"),
        ("event_id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved event", body = EventResponseDto),
        (status = 401, description = "JWT is not correct or member not found", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    method: Method,
    PathParam((member_id, event_id)): PathParam<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = JwtGuard::new(&state.db, &state.jwt_keys)
        .require(&headers, &method, Some(member_id))
        .await?;

    let event = EventService::new(&state.db).get(event_id).await?;

    Ok((StatusCode::OK, Json(single_event(event))))
}

/// Replace every field of a hosted event.
///
/// # Access Control
/// - API key and JWT of the same member, who must host the event
///
/// # Returns
/// - `200 OK` - Updated event
/// - `400 Bad Request` - Invalid event data
/// - `401 Unauthorized` - Invalid JWT
/// - `403 Forbidden` - Caller does not host the event
/// - `404 Not Found` - Unknown event
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    patch,
    path = "/api/members/{member_id}/events/{event_id}",
    tag = EVENT_TAG,
    params(
        ("member_id" = i32, Path, description = "Member ID"),
        ("event_id" = i32, Path, description = "Event ID")
    ),
    request_body = EventPayloadDto,
    responses(
        (status = 200, description = "Successfully updated event", body = EventResponseDto),
        (status = 400, description = "Invalid event data", body = ErrorDto),
        (status = 401, description = "JWT is not correct", body = ErrorDto),
        (status = 403, description = "No permission", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    method: Method,
    PathParam((member_id, event_id)): PathParam<(i32, i32)>,
    JsonBody(payload): JsonBody<EventPayloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let principal = JwtGuard::new(&state.db, &state.jwt_keys)
        .require(&headers, &method, Some(member_id))
        .await?;

    let param = EventParam::from_dto(payload)?;
    let event = EventService::new(&state.db)
        .update(principal.user_id(), event_id, param)
        .await?;

    Ok((StatusCode::OK, Json(single_event(event))))
}

/// Delete a hosted event with its attendance, comments, ratings and photos.
///
/// # Access Control
/// - API key and JWT of the same member, who must host the event
///
/// # Returns
/// - `200 OK` - Events the caller still hosts
/// - `401 Unauthorized` - Invalid JWT
/// - `403 Forbidden` - Caller does not host the event
/// - `404 Not Found` - Unknown event
/// - `500 Internal Server Error` - Database or filesystem error
#[utoipa::path(
    delete,
    path = "/api/members/{member_id}/events/{event_id}",
    tag = EVENT_TAG,
    params(
        ("member_id" = i32, Path, description = "Member ID"),
        ("event_id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted event", body = EventListDto),
        (status = 401, description = "JWT is not correct", body = ErrorDto),
        (status = 403, description = "No permission", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    method: Method,
    PathParam((member_id, event_id)): PathParam<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let principal = JwtGuard::new(&state.db, &state.jwt_keys)
        .require(&headers, &method, Some(member_id))
        .await?;

    let events = EventService::new(&state.db)
        .delete(principal.user_id(), event_id, &state.storage)
        .await?;

    Ok((StatusCode::OK, Json(event_list(events))))
}

/// List every event.
///
/// # Access Control
/// - API key only
///
/// # Returns
/// - `200 OK` - All events, populated
/// - `401 Unauthorized` - Wrong API key
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/events/find",
    tag = EVENT_TAG,
    responses(
        (status = 200, description = "Successfully retrieved events", body = EventListDto),
        (status = 401, description = "API key is not correct", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn find_events(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let events = EventService::new(&state.db).find_all().await?;

    Ok((StatusCode::OK, Json(event_list(events))))
}

/// Create a venue and attach it to a hosted event.
///
/// # Access Control
/// - API key and JWT of one of the event's hosts
///
/// # Returns
/// - `201 Created` - Event with its new venue
/// - `400 Bad Request` - Invalid venue data
/// - `401 Unauthorized` - Invalid JWT
/// - `403 Forbidden` - Caller does not host the event
/// - `404 Not Found` - Unknown event
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/events/{event_id}/venues",
    tag = EVENT_TAG,
    params(
        ("event_id" = i32, Path, description = "Event ID")
    ),
    request_body = VenuePayloadDto,
    responses(
        (status = 201, description = "Successfully created venue", body = EventResponseDto),
        (status = 400, description = "Invalid venue data", body = ErrorDto),
        (status = 401, description = "JWT is not correct", body = ErrorDto),
        (status = 403, description = "No permission", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_venue(
    State(state): State<AppState>,
    headers: HeaderMap,
    method: Method,
    PathParam(event_id): PathParam<i32>,
    JsonBody(payload): JsonBody<VenuePayloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let principal = JwtGuard::new(&state.db, &state.jwt_keys)
        .require(&headers, &method, None)
        .await?;

    let param = CreateVenueParam::from_dto(payload)?;
    let event = EventService::new(&state.db)
        .add_venue(principal.user_id(), event_id, param)
        .await?;

    Ok((StatusCode::CREATED, Json(single_event(event))))
}
