use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        event::{
            AttendanceDto, CommentCreatedDto, CommentPayloadDto, RatingPayloadDto,
            RatingResponseDto,
        },
    },
    server::{
        controller::extract::{JsonBody, PathParam},
        error::AppError,
        middleware::jwt::JwtGuard,
        model::event::{parse_rating, CommentParam},
        service::activity::ActivityService,
        state::AppState,
    },
};

/// Tag for grouping attendance, comment and rating endpoints in OpenAPI documentation
pub static ACTIVITY_TAG: &str = "activity";

/// Join an event.
///
/// # Access Control
/// - API key and JWT
///
/// # Returns
/// - `200 OK` - Event and member ids
/// - `400 Bad Request` - Already joined
/// - `401 Unauthorized` - Invalid JWT
/// - `404 Not Found` - Unknown event
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/events/{event_id}/attendance",
    tag = ACTIVITY_TAG,
    params(
        ("event_id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Successfully joined event", body = AttendanceDto),
        (status = 400, description = "Already joined", body = ErrorDto),
        (status = 401, description = "JWT is not correct", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn join_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    method: Method,
    PathParam(event_id): PathParam<i32>,
) -> Result<impl IntoResponse, AppError> {
    let principal = JwtGuard::new(&state.db, &state.jwt_keys)
        .require(&headers, &method, None)
        .await?;
    let user_id = principal.user_id();

    ActivityService::new(&state.db).join(event_id, user_id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "success",
            AttendanceDto { event_id, user_id },
        )),
    ))
}

/// Leave an event.
///
/// # Access Control
/// - API key and JWT
///
/// # Returns
/// - `200 OK` - Event and member ids
/// - `400 Bad Request` - Not joined
/// - `401 Unauthorized` - Invalid JWT
/// - `404 Not Found` - Unknown event
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    delete,
    path = "/api/events/{event_id}/attendance",
    tag = ACTIVITY_TAG,
    params(
        ("event_id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Successfully left event", body = AttendanceDto),
        (status = 400, description = "Not joined", body = ErrorDto),
        (status = 401, description = "JWT is not correct", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn leave_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    method: Method,
    PathParam(event_id): PathParam<i32>,
) -> Result<impl IntoResponse, AppError> {
    let principal = JwtGuard::new(&state.db, &state.jwt_keys)
        .require(&headers, &method, None)
        .await?;
    let user_id = principal.user_id();

    ActivityService::new(&state.db)
        .leave(event_id, user_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "success",
            AttendanceDto { event_id, user_id },
        )),
    ))
}

/// Comment on an event.
///
/// # Access Control
/// - API key and JWT
///
/// # Returns
/// - `201 Created` - Event and comment ids
/// - `400 Bad Request` - Invalid comment
/// - `401 Unauthorized` - Invalid JWT
/// - `404 Not Found` - Unknown event
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/events/{event_id}/comments",
    tag = ACTIVITY_TAG,
    params(
        ("event_id" = i32, Path, description = "Event ID")
    ),
    request_body = CommentPayloadDto,
    responses(
        (status = 201, description = "Successfully added comment", body = CommentCreatedDto),
        (status = 400, description = "Invalid comment", body = ErrorDto),
        (status = 401, description = "JWT is not correct", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    method: Method,
    PathParam(event_id): PathParam<i32>,
    JsonBody(payload): JsonBody<CommentPayloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let principal = JwtGuard::new(&state.db, &state.jwt_keys)
        .require(&headers, &method, None)
        .await?;

    let param = CommentParam::from_dto(payload)?;
    let comment = ActivityService::new(&state.db)
        .comment(event_id, principal.user_id(), param.title, param.comment)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "success",
            CommentCreatedDto {
                event_id,
                comment_id: comment.id,
            },
        )),
    ))
}

/// Rate an event from 1 to 5. Each member rates an event once.
///
/// # Access Control
/// - API key and JWT
///
/// # Returns
/// - `201 Created` - Recomputed rating count and mean
/// - `400 Bad Request` - Invalid rating or already rated
/// - `401 Unauthorized` - Invalid JWT
/// - `404 Not Found` - Unknown event
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/events/{event_id}/ratings",
    tag = ACTIVITY_TAG,
    params(
        ("event_id" = i32, Path, description = "Event ID")
    ),
    request_body = RatingPayloadDto,
    responses(
        (status = 201, description = "Successfully rated event", body = RatingResponseDto),
        (status = 400, description = "Invalid rating or already rated", body = ErrorDto),
        (status = 401, description = "JWT is not correct", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn rate_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    method: Method,
    PathParam(event_id): PathParam<i32>,
    JsonBody(payload): JsonBody<RatingPayloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let principal = JwtGuard::new(&state.db, &state.jwt_keys)
        .require(&headers, &method, None)
        .await?;

    let rating = parse_rating(&payload)?;
    let aggregate = ActivityService::new(&state.db)
        .rate(event_id, principal.user_id(), rating)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "success",
            RatingResponseDto {
                rating: aggregate.into_dto(),
            },
        )),
    ))
}
