use axum::{extract::State, http::StatusCode, response::IntoResponse};
use test_utils::builder::TestBuilder;

use super::*;
use crate::{
    model::{
        account::{LoginFormDto, SignupFormDto},
        user::SignupDto,
    },
    server::{
        controller::{
            account, api_auth,
            extract::{FormBody, JsonBody},
        },
        error::AppError,
        middleware::session::{AuthSession, FlashSession, ReturnToSession},
    },
};

/// Tests that a session login stores the member and returns to the remembered page.
///
/// Expected: redirect to `returnTo`, member id in session, success flash queued
#[tokio::test]
async fn login_sets_session_and_returns() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_member_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let state = test_state(db, None);

    api_auth::signup(
        State(state.clone()),
        JsonBody(SignupDto {
            email: "web@example.com".to_string(),
            password: "secret123".to_string(),
            confirm_password: "secret123".to_string(),
        }),
    )
    .await?;

    ReturnToSession::new(session).set("/account").await?;

    let response = account::login(
        State(state),
        session.clone(),
        FormBody(LoginFormDto {
            email: "web@example.com".to_string(),
            password: "secret123".to_string(),
        }),
    )
    .await?
    .into_response();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/account");
    assert!(AuthSession::new(session).get_user_id().await?.is_some());
    assert_eq!(
        FlashSession::new(session).take().await?.success,
        vec!["Success! You are logged in.".to_string()]
    );

    Ok(())
}

/// Tests that a failed login is flashed instead of returned as an error.
///
/// Expected: redirect to `/login` with the credentials error queued
#[tokio::test]
async fn failed_login_flashes_error() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_member_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let state = test_state(db, None);

    let response = account::login(
        State(state),
        session.clone(),
        FormBody(LoginFormDto {
            email: "nobody@example.com".to_string(),
            password: "secret123".to_string(),
        }),
    )
    .await?
    .into_response();

    assert_eq!(location(&response), "/login");
    assert!(!AuthSession::new(session).is_authenticated().await?);
    assert_eq!(
        FlashSession::new(session).take().await?.errors,
        vec!["Invalid email or password.".to_string()]
    );

    Ok(())
}

/// Tests that signup validation failures become one flash error per field.
///
/// Expected: redirect to `/signup` with two errors
#[tokio::test]
async fn signup_flashes_validation_errors() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_member_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let state = test_state(db, None);

    let response = account::signup(
        State(state),
        session.clone(),
        FormBody(SignupFormDto {
            email: "bad".to_string(),
            password: "secret123".to_string(),
            confirm_password: "other".to_string(),
        }),
    )
    .await?
    .into_response();

    assert_eq!(location(&response), "/signup");
    assert_eq!(FlashSession::new(session).take().await?.errors.len(), 2);

    Ok(())
}

/// Tests that the account page requires a login.
///
/// Expected: redirect to `/login`
#[tokio::test]
async fn account_requires_login() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_member_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let state = test_state(db, None);

    let response = match account::get_account(State(state), session.clone()).await {
        Ok(_) => panic!("anonymous visitor saw the account page"),
        Err(error) => error.into_response(),
    };

    assert_eq!(location(&response), "/login");

    Ok(())
}
