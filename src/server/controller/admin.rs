use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use tower_sessions::Session;

use crate::{
    model::admin::AdminDeleteDto,
    server::{
        controller::extract::FormBody,
        error::AppError,
        middleware::{
            auth::{AuthGuard, Permission},
            session::{FlashKind, FlashSession},
        },
        service::admin::AdminService,
        state::AppState,
    },
};

/// Every member, event and photo.
///
/// # Access Control
/// - `Admin` - Only the configured admin member
///
/// # Returns
/// - `200 OK` - Users, populated events and photos
/// - `403 Forbidden` - Logged in member is not the admin
/// - `303 See Other` - Not logged in, redirected to `/login`
pub async fn get_overview(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session, state.admin_user_id)
        .require(&[Permission::Admin])
        .await?;

    let overview = AdminService::new(&state.db, &state.storage)
        .overview()
        .await?;

    Ok((StatusCode::OK, Json(overview)))
}

pub async fn delete_account(
    State(state): State<AppState>,
    session: Session,
    FormBody(form): FormBody<AdminDeleteDto>,
) -> Result<Redirect, AppError> {
    let _ = AuthGuard::new(&state.db, &session, state.admin_user_id)
        .require(&[Permission::Admin])
        .await?;

    let deleted = AdminService::new(&state.db, &state.storage)
        .delete_account(form.id)
        .await?;

    flash_deleted(&session, "Account", form.id, deleted).await
}

pub async fn delete_event(
    State(state): State<AppState>,
    session: Session,
    FormBody(form): FormBody<AdminDeleteDto>,
) -> Result<Redirect, AppError> {
    let _ = AuthGuard::new(&state.db, &session, state.admin_user_id)
        .require(&[Permission::Admin])
        .await?;

    let deleted = AdminService::new(&state.db, &state.storage)
        .delete_event(form.id)
        .await?;

    flash_deleted(&session, "Event", form.id, deleted).await
}

pub async fn delete_photo(
    State(state): State<AppState>,
    session: Session,
    FormBody(form): FormBody<AdminDeleteDto>,
) -> Result<Redirect, AppError> {
    let _ = AuthGuard::new(&state.db, &session, state.admin_user_id)
        .require(&[Permission::Admin])
        .await?;

    let deleted = AdminService::new(&state.db, &state.storage)
        .delete_photo(form.id)
        .await?;

    flash_deleted(&session, "Photo", form.id, deleted).await
}

async fn flash_deleted(
    session: &Session,
    kind: &str,
    id: i32,
    deleted: bool,
) -> Result<Redirect, AppError> {
    let flash = FlashSession::new(session);

    if deleted {
        flash
            .push(FlashKind::Success, format!("{} {} has been deleted.", kind, id))
            .await?;
    } else {
        flash
            .push(FlashKind::Errors, format!("{} is not found", id))
            .await?;
    }

    Ok(Redirect::to("/admin"))
}
