use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use tower_sessions::Session;

use crate::{
    model::account::{
        CsrfTokenDto, LoginFormDto, PasswordFormDto, ProfileFormDto, SignupFormDto,
    },
    server::{
        controller::extract::{FormBody, PathParam},
        error::{auth::AuthError, AppError},
        middleware::{
            auth::AuthGuard,
            session::{AuthSession, CsrfSession, FlashKind, FlashSession, ReturnToSession},
        },
        model::{
            oauth::Provider,
            user::{validate_new_password, Credentials, UpdateProfileParam},
        },
        service::{auth::AuthService, member::MemberService},
        state::AppState,
    },
};

/// Queues the messages of a failure the member can fix as flash errors and redirects.
///
/// Anything else (database, session, ...) is propagated unchanged.
async fn flash_failure(session: &Session, err: AppError, to: &str) -> Result<Redirect, AppError> {
    let flash = FlashSession::new(session);

    match err {
        AppError::Validation(errors) => {
            for error in errors {
                flash.push(FlashKind::Errors, error.msg).await?;
            }
        }
        AppError::BadRequest(msg) | AppError::NotFound(msg) => {
            flash.push(FlashKind::Errors, msg).await?;
        }
        AppError::AuthErr(AuthError::InvalidCredentials) => {
            flash
                .push(FlashKind::Errors, AuthError::InvalidCredentials.to_string())
                .await?;
        }
        err => return Err(err),
    }

    Ok(Redirect::to(to))
}

/// Log in with email and password.
///
/// Failures are flashed and redirect back to `/login`; success redirects to the page the
/// member was on before logging in.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    FormBody(form): FormBody<LoginFormDto>,
) -> Result<Redirect, AppError> {
    let result = match Credentials::validate(&form.email, &form.password, None) {
        Ok(credentials) => {
            AuthService::new(&state.db)
                .login(&credentials.email, &credentials.password)
                .await
        }
        Err(err) => Err(err),
    };

    let user = match result {
        Ok(user) => user,
        Err(err) => return flash_failure(&session, err, "/login").await,
    };

    AuthSession::new(&session).set_user_id(user.id).await?;
    FlashSession::new(&session)
        .push(FlashKind::Success, "Success! You are logged in.")
        .await?;

    let return_to = ReturnToSession::new(&session).take_or_root().await?;

    Ok(Redirect::to(&return_to))
}

/// Create an account with email and password and log in.
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    FormBody(form): FormBody<SignupFormDto>,
) -> Result<Redirect, AppError> {
    let result = match Credentials::validate(
        &form.email,
        &form.password,
        Some(form.confirm_password.as_str()),
    ) {
        Ok(credentials) => {
            AuthService::new(&state.db)
                .signup(&credentials.email, &credentials.password)
                .await
        }
        Err(err) => Err(err),
    };

    let user = match result {
        Ok(user) => user,
        Err(err) => return flash_failure(&session, err, "/signup").await,
    };

    AuthSession::new(&session).set_user_id(user.id).await?;

    Ok(Redirect::to("/"))
}

pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    AuthSession::new(&session).clear().await?;

    Ok(Redirect::to("/"))
}

/// Account of the logged in member with the providers they hold tokens for.
///
/// # Access Control
/// - Session login, otherwise redirected to `/login`
pub async fn get_account(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session, state.admin_user_id)
        .require(&[])
        .await?;

    let (user, tokens) = MemberService::new(&state.db).account(user.id).await?;

    Ok((StatusCode::OK, Json(user.into_account_dto(tokens))))
}

pub async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    FormBody(form): FormBody<ProfileFormDto>,
) -> Result<Redirect, AppError> {
    let user = AuthGuard::new(&state.db, &session, state.admin_user_id)
        .require(&[])
        .await?;

    let result = match UpdateProfileParam::from_form(form) {
        Ok(param) => {
            MemberService::new(&state.db)
                .update_profile(user.id, param, None)
                .await
        }
        Err(err) => Err(err),
    };

    if let Err(err) = result {
        return flash_failure(&session, err, "/account").await;
    }

    FlashSession::new(&session)
        .push(FlashKind::Success, "Profile information has been updated.")
        .await?;

    Ok(Redirect::to("/account"))
}

pub async fn update_password(
    State(state): State<AppState>,
    session: Session,
    FormBody(form): FormBody<PasswordFormDto>,
) -> Result<Redirect, AppError> {
    let user = AuthGuard::new(&state.db, &session, state.admin_user_id)
        .require(&[])
        .await?;

    let password = match validate_new_password(&form) {
        Ok(password) => password,
        Err(err) => return flash_failure(&session, err, "/account").await,
    };

    AuthService::new(&state.db)
        .change_password(user.id, &password)
        .await?;

    FlashSession::new(&session)
        .push(FlashKind::Success, "Password has been changed.")
        .await?;

    Ok(Redirect::to("/account"))
}

/// Delete the logged in member's account, then log out.
pub async fn delete_account(
    State(state): State<AppState>,
    session: Session,
) -> Result<Redirect, AppError> {
    let user = AuthGuard::new(&state.db, &session, state.admin_user_id)
        .require(&[])
        .await?;

    MemberService::new(&state.db)
        .delete_account(user.id, &state.storage)
        .await?;

    AuthSession::new(&session).clear().await?;
    FlashSession::new(&session)
        .push(FlashKind::Info, "Your account has been deleted.")
        .await?;

    Ok(Redirect::to("/"))
}

/// Detach a sign-in provider and drop its tokens.
pub async fn unlink_provider(
    State(state): State<AppState>,
    session: Session,
    PathParam(provider): PathParam<String>,
) -> Result<Redirect, AppError> {
    let user = AuthGuard::new(&state.db, &session, state.admin_user_id)
        .require(&[])
        .await?;

    let Some(provider) = Provider::parse(&provider) else {
        return Err(AppError::NotFound(format!("{} is not found", provider)));
    };

    MemberService::new(&state.db)
        .unlink(user.id, provider)
        .await?;

    FlashSession::new(&session)
        .push(
            FlashKind::Info,
            format!("{} account has been unlinked.", provider.as_str()),
        )
        .await?;

    Ok(Redirect::to("/account"))
}

/// Drain the queued flash messages.
pub async fn get_flash(session: Session) -> Result<impl IntoResponse, AppError> {
    let flash = FlashSession::new(&session).take().await?;

    Ok((StatusCode::OK, Json(flash)))
}

/// Token to send in the `x-csrf-token` header of form posts.
pub async fn get_csrf_token(session: Session) -> Result<impl IntoResponse, AppError> {
    let csrf_token = CsrfSession::new(&session).form_token().await?;

    Ok((StatusCode::OK, Json(CsrfTokenDto { csrf_token })))
}
