use axum::{
    extract::{
        multipart::{Multipart, MultipartError, MultipartRejection},
        State,
    },
    http::{HeaderMap, Method, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        event::EventResponseDto,
        user::ProfileResponseDto,
    },
    server::{
        controller::extract::PathParam,
        error::AppError,
        middleware::jwt::JwtGuard,
        service::{
            photo::PhotoService,
            storage::{
                PhotoUpload, DEFAULT_HEIGHT, DEFAULT_WIDTH, FILE_SIZE_ERROR, PHOTO_REQUIRED_ERROR,
            },
        },
        state::AppState,
    },
};

/// Tag for grouping photo endpoints in OpenAPI documentation
pub static PHOTO_TAG: &str = "photo";

/// Upload a photo to the caller's profile.
///
/// Multipart body with a `photo` file and optional `width` and `height` of the resized
/// copy (default 320x240). The first photo becomes the avatar.
///
/// # Access Control
/// - API key and JWT of the same member
///
/// # Returns
/// - `201 Created` - Profile including the new photo
/// - `400 Bad Request` - Missing, oversized or unsupported file, or 8 photos already stored
/// - `401 Unauthorized` - Invalid JWT
/// - `403 Forbidden` - Uploading to another member
/// - `500 Internal Server Error` - Database or filesystem error
#[utoipa::path(
    post,
    path = "/api/members/{member_id}/photos",
    tag = PHOTO_TAG,
    params(
        ("member_id" = i32, Path, description = "Member ID")
    ),
    responses(
        (status = 201, description = "Successfully uploaded photo", body = ProfileResponseDto),
        (status = 400, description = "Invalid upload", body = ErrorDto),
        (status = 401, description = "JWT is not correct", body = ErrorDto),
        (status = 403, description = "No permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_member_photo(
    State(state): State<AppState>,
    headers: HeaderMap,
    method: Method,
    PathParam(member_id): PathParam<i32>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let principal = JwtGuard::new(&state.db, &state.jwt_keys)
        .require(&headers, &method, Some(member_id))
        .await?;

    let upload = read_upload(multipart?).await?;
    let member = PhotoService::new(&state.db, &state.storage)
        .add_member_photo(principal.user_id(), upload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "success",
            ProfileResponseDto {
                profile: member.into_profile_dto(),
            },
        )),
    ))
}

/// Delete one of the caller's profile photos.
///
/// Removing the avatar promotes the first remaining photo.
///
/// # Access Control
/// - API key and JWT of the same member
///
/// # Returns
/// - `200 OK` - Profile without the photo
/// - `401 Unauthorized` - Invalid JWT
/// - `403 Forbidden` - Deleting another member's photo
/// - `404 Not Found` - Photo is not one of the member's
/// - `500 Internal Server Error` - Database or filesystem error
#[utoipa::path(
    delete,
    path = "/api/members/{member_id}/photos/{photo_id}",
    tag = PHOTO_TAG,
    params(
        ("member_id" = i32, Path, description = "Member ID"),
        ("photo_id" = i32, Path, description = "Photo ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted photo", body = ProfileResponseDto),
        (status = 401, description = "JWT is not correct", body = ErrorDto),
        (status = 403, description = "No permission", body = ErrorDto),
        (status = 404, description = "Photo not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_member_photo(
    State(state): State<AppState>,
    headers: HeaderMap,
    method: Method,
    PathParam((member_id, photo_id)): PathParam<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let principal = JwtGuard::new(&state.db, &state.jwt_keys)
        .require(&headers, &method, Some(member_id))
        .await?;

    let member = PhotoService::new(&state.db, &state.storage)
        .delete_member_photo(principal.user_id(), photo_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "success",
            ProfileResponseDto {
                profile: member.into_profile_dto(),
            },
        )),
    ))
}

/// Upload a photo to a hosted event.
///
/// # Access Control
/// - API key and JWT of one of the event's hosts
///
/// # Returns
/// - `201 Created` - Event including the new photo
/// - `400 Bad Request` - Invalid upload or 8 photos already stored
/// - `401 Unauthorized` - Invalid JWT
/// - `403 Forbidden` - Caller does not host the event
/// - `404 Not Found` - Unknown event
/// - `500 Internal Server Error` - Database or filesystem error
#[utoipa::path(
    post,
    path = "/api/events/{event_id}/photos",
    tag = PHOTO_TAG,
    params(
        ("event_id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 201, description = "Successfully uploaded photo", body = EventResponseDto),
        (status = 400, description = "Invalid upload", body = ErrorDto),
        (status = 401, description = "JWT is not correct", body = ErrorDto),
        (status = 403, description = "No permission", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_event_photo(
    State(state): State<AppState>,
    headers: HeaderMap,
    method: Method,
    PathParam(event_id): PathParam<i32>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let principal = JwtGuard::new(&state.db, &state.jwt_keys)
        .require(&headers, &method, None)
        .await?;

    let upload = read_upload(multipart?).await?;
    let event = PhotoService::new(&state.db, &state.storage)
        .add_event_photo(principal.user_id(), event_id, upload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "success",
            EventResponseDto {
                event: event.into_dto(),
            },
        )),
    ))
}

/// Delete a photo of a hosted event.
///
/// # Access Control
/// - API key and JWT of one of the event's hosts
///
/// # Returns
/// - `200 OK` - Event without the photo
/// - `401 Unauthorized` - Invalid JWT
/// - `403 Forbidden` - Caller does not host the event
/// - `404 Not Found` - Unknown event or photo
/// - `500 Internal Server Error` - Database or filesystem error
#[utoipa::path(
    delete,
    path = "/api/events/{event_id}/photos/{photo_id}",
    tag = PHOTO_TAG,
    params(
        ("event_id" = i32, Path, description = "Event ID"),
        ("photo_id" = i32, Path, description = "Photo ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted photo", body = EventResponseDto),
        (status = 401, description = "JWT is not correct", body = ErrorDto),
        (status = 403, description = "No permission", body = ErrorDto),
        (status = 404, description = "Event or photo not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_event_photo(
    State(state): State<AppState>,
    headers: HeaderMap,
    method: Method,
    PathParam((event_id, photo_id)): PathParam<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let principal = JwtGuard::new(&state.db, &state.jwt_keys)
        .require(&headers, &method, None)
        .await?;

    let event = PhotoService::new(&state.db, &state.storage)
        .delete_event_photo(principal.user_id(), event_id, photo_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "success",
            EventResponseDto {
                event: event.into_dto(),
            },
        )),
    ))
}

/// Collects the `photo`, `width` and `height` fields of an upload form.
async fn read_upload(mut multipart: Multipart) -> Result<PhotoUpload, AppError> {
    let mut photo = None;
    let mut width = None;
    let mut height = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);

        match name.as_deref() {
            Some("photo") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;
                photo = Some((file_name, content_type, bytes));
            }
            Some("width") => width = Some(field.text().await.map_err(multipart_error)?),
            Some("height") => height = Some(field.text().await.map_err(multipart_error)?),
            _ => {}
        }
    }

    let Some((file_name, content_type, bytes)) = photo else {
        return Err(AppError::BadRequest(PHOTO_REQUIRED_ERROR.to_string()));
    };

    Ok(PhotoUpload {
        file_name,
        content_type,
        bytes,
        width: PhotoUpload::dimension(width.as_deref(), DEFAULT_WIDTH),
        height: PhotoUpload::dimension(height.as_deref(), DEFAULT_HEIGHT),
    })
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::BadRequest(FILE_SIZE_ERROR.to_string())
    } else {
        AppError::BadRequest(err.body_text())
    }
}
