use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        user::{LoginDto, SignupDto, TokenDto},
    },
    server::{
        controller::extract::JsonBody, error::AppError, model::user::Credentials,
        service::auth::AuthService, state::AppState,
    },
};

/// Tag for grouping token authentication endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Create an account and issue an API token.
///
/// # Access Control
/// - API key only
///
/// # Arguments
/// - `state` - Application state containing the database connection and JWT keys
/// - `payload` - Email, password and password confirmation
///
/// # Returns
/// - `201 Created` - Account created, token issued
/// - `400 Bad Request` - Validation failed or the email is already registered
/// - `401 Unauthorized` - Wrong API key
/// - `500 Internal Server Error` - Database or hashing error
#[utoipa::path(
    post,
    path = "/api/signup",
    tag = AUTH_TAG,
    request_body = SignupDto,
    responses(
        (status = 201, description = "Successfully signed up", body = TokenDto),
        (status = 400, description = "Invalid signup data", body = ErrorDto),
        (status = 401, description = "API key is not correct", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn signup(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SignupDto>,
) -> Result<impl IntoResponse, AppError> {
    let credentials = Credentials::validate(
        &payload.email,
        &payload.password,
        Some(payload.confirm_password.as_str()),
    )?;

    let user = AuthService::new(&state.db)
        .signup(&credentials.email, &credentials.password)
        .await?;
    let token = state.jwt_keys.issue(user.id)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Successfully signed up",
            TokenDto { token, id: user.id },
        )),
    ))
}

/// Exchange email and password for an API token.
///
/// # Access Control
/// - API key only
///
/// # Returns
/// - `200 OK` - Token issued
/// - `400 Bad Request` - Validation failed
/// - `401 Unauthorized` - Unknown email, wrong password or wrong API key
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Successfully logged in", body = TokenDto),
        (status = 400, description = "Invalid login data", body = ErrorDto),
        (status = 401, description = "Invalid email or password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let credentials = Credentials::validate(&payload.email, &payload.password, None)?;

    let user = AuthService::new(&state.db)
        .login(&credentials.email, &credentials.password)
        .await?;
    let token = state.jwt_keys.issue(user.id)?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Successfully logged in.",
            TokenDto { token, id: user.id },
        )),
    ))
}
