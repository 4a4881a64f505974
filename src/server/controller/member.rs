use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        user::{MemberDto, ProfileResponseDto, UpdateProfileDto},
    },
    server::{
        controller::extract::{JsonBody, PathParam},
        error::AppError,
        middleware::jwt::JwtGuard,
        model::user::UpdateProfileParam,
        service::member::MemberService,
        state::AppState,
    },
};

/// Tag for grouping member endpoints in OpenAPI documentation
pub static MEMBER_TAG: &str = "member";

/// Get a member's email and profile.
///
/// Any authenticated member may view any other member.
///
/// # Access Control
/// - API key and JWT
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `member_id` - Member to view
///
/// # Returns
/// - `200 OK` - Email and profile with photos
/// - `401 Unauthorized` - Invalid JWT or unknown member
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/members/{member_id}",
    tag = MEMBER_TAG,
    params(
        ("member_id" = i32, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved member", body = MemberDto),
        (status = 401, description = "JWT is not correct or member not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_member(
    State(state): State<AppState>,
    headers: HeaderMap,
    method: Method,
    PathParam(member_id): PathParam<i32>,
) -> Result<impl IntoResponse, AppError> {
    let principal = JwtGuard::new(&state.db, &state.jwt_keys)
        .require(&headers, &method, Some(member_id))
        .await?;

    let member_service = MemberService::new(&state.db);
    let member = match principal.user {
        Some(user) => member_service.with_photos(user).await?,
        None => member_service.get(member_id).await?,
    };

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("success", member.into_dto())),
    ))
}

/// Update the caller's own profile.
///
/// Absent fields keep their stored value. `avatar` must name one of the member's photos.
///
/// # Access Control
/// - API key and JWT of the same member
///
/// # Returns
/// - `200 OK` - Updated profile
/// - `400 Bad Request` - Validation failed or the email belongs to another account
/// - `401 Unauthorized` - Invalid JWT
/// - `403 Forbidden` - Updating another member
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    patch,
    path = "/api/members/{member_id}",
    tag = MEMBER_TAG,
    params(
        ("member_id" = i32, Path, description = "Member ID")
    ),
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Successfully updated profile", body = ProfileResponseDto),
        (status = 400, description = "Invalid profile data", body = ErrorDto),
        (status = 401, description = "JWT is not correct", body = ErrorDto),
        (status = 403, description = "No permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_member(
    State(state): State<AppState>,
    headers: HeaderMap,
    method: Method,
    PathParam(member_id): PathParam<i32>,
    JsonBody(payload): JsonBody<UpdateProfileDto>,
) -> Result<impl IntoResponse, AppError> {
    let principal = JwtGuard::new(&state.db, &state.jwt_keys)
        .require(&headers, &method, Some(member_id))
        .await?;

    let (param, avatar_id) = UpdateProfileParam::from_dto(payload)?;
    let member = MemberService::new(&state.db)
        .update_profile(principal.user_id(), param, avatar_id)
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
