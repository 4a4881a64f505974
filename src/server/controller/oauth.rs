use axum::{
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::server::{
    controller::extract::PathParam,
    error::{auth::AuthError, AppError},
    middleware::{
        auth::AuthGuard,
        session::{AuthSession, CsrfSession, FlashKind, FlashSession, ReturnToSession},
    },
    model::oauth::{Provider, SignInOutcome},
    service::oauth::OAuthService,
    state::AppState,
};

/// Query parameters for the OAuth callback endpoint.
///
/// A provider that refuses the request sends `error` instead of `code`, so both fields
/// are optional.
///
/// # Fields
/// - `state` - CSRF protection token that must match the value stored in the session
/// - `code` - Authorization code used to exchange for access tokens
#[derive(Deserialize)]
pub struct CallbackParams {
    pub state: Option<String>,
    pub code: Option<String>,
}

fn parse_provider(provider: &str) -> Result<Provider, AppError> {
    Provider::parse(provider).ok_or_else(|| AppError::NotFound(format!("{} is not found", provider)))
}

/// Redirect to the provider's authorize page.
///
/// Foursquare only grants API access, so it requires a logged in member.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    PathParam(provider): PathParam<String>,
) -> Result<Redirect, AppError> {
    let provider = parse_provider(&provider)?;

    if !provider.is_sign_in() {
        let _ = AuthGuard::new(&state.db, &session, state.admin_user_id)
            .require(&[])
            .await?;
    }

    let oauth_service = OAuthService::new(
        &state.db,
        &state.http_client,
        state.oauth_clients.get(provider),
        provider,
    );

    let (url, csrf_token) = oauth_service.login_url();

    CsrfSession::new(&session)
        .set_token(csrf_token.secret().to_string())
        .await?;

    Ok(Redirect::temporary(url.as_str()))
}

/// Complete an OAuth flow.
///
/// Sign-in providers log in, link or create an account and redirect to the page the
/// member came from; refusals are flashed and redirect to `/login`. Foursquare stores the
/// token and redirects to `/api/foursquare`, or to `/api` when authorization fails.
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    PathParam(provider): PathParam<String>,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect, AppError> {
    let provider = parse_provider(&provider)?;

    validate_csrf(&session, params.state.as_deref()).await?;

    let oauth_service = OAuthService::new(
        &state.db,
        &state.http_client,
        state.oauth_clients.get(provider),
        provider,
    );

    if !provider.is_sign_in() {
        let user = AuthGuard::new(&state.db, &session, state.admin_user_id)
            .require(&[])
            .await?;

        let Some(code) = params.code else {
            return Ok(Redirect::to("/api"));
        };

        return match oauth_service.authorize(code, user.id).await {
            Ok(()) => Ok(Redirect::to("/api/foursquare")),
            Err(err) => {
                tracing::warn!("Foursquare authorization failed for user {}: {}", user.id, err);
                Ok(Redirect::to("/api"))
            }
        };
    }

    let flash = FlashSession::new(&session);

    let Some(code) = params.code else {
        flash
            .push(
                FlashKind::Errors,
                format!("{} sign in was cancelled.", provider.display_name()),
            )
            .await?;
        return Ok(Redirect::to("/login"));
    };

    let auth_session = AuthSession::new(&session);
    let current_user = auth_session.get_user_id().await?;

    let outcome = match oauth_service.callback(code, current_user).await {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::warn!("{} callback failed: {}", provider.display_name(), err);
            flash
                .push(
                    FlashKind::Errors,
                    format!("{} sign in failed.", provider.display_name()),
                )
                .await?;
            return Ok(Redirect::to("/login"));
        }
    };

    match outcome {
        SignInOutcome::Linked { .. } => {
            flash
                .push(
                    FlashKind::Info,
                    format!("{} account has been linked.", provider.display_name()),
                )
                .await?;
        }
        SignInOutcome::SignedIn { user_id } | SignInOutcome::Created { user_id } => {
            auth_session.set_user_id(user_id).await?;
        }
        SignInOutcome::Rejected { message } => {
            flash.push(FlashKind::Errors, message).await?;
            return Ok(Redirect::to("/login"));
        }
    }

    let return_to = ReturnToSession::new(&session).take_or_root().await?;

    Ok(Redirect::to(&return_to))
}

async fn validate_csrf(session: &Session, csrf_state: Option<&str>) -> Result<(), AppError> {
    let stored_state = CsrfSession::new(session).take_token().await?;

    match (stored_state, csrf_state) {
        (Some(stored), Some(received)) if stored == received => Ok(()),
        _ => Err(AppError::AuthErr(AuthError::CsrfValidationFailed)),
    }
}
