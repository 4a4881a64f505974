use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue, Method};

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::jwt::{decide, AccessDecision, JwtGuard},
    model::token::Claims,
    service::jwt::JwtKeys,
};
use test_utils::{builder::TestBuilder, factory};

fn claims(id: i32) -> Claims {
    Claims { id, iat: 0 }
}

fn auth_headers(keys: &JwtKeys, user_id: i32) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&keys.issue(user_id).unwrap()).unwrap(),
    );
    headers
}

#[test]
fn decision_without_member_param_uses_claims() {
    assert_eq!(
        decide(&Method::POST, None, &claims(1)),
        AccessDecision::ClaimsOnly
    );
}

#[test]
fn decision_for_own_member_routes() {
    assert_eq!(
        decide(&Method::DELETE, Some(1), &claims(1)),
        AccessDecision::ClaimsOnly
    );
    assert_eq!(
        decide(&Method::GET, Some(1), &claims(1)),
        AccessDecision::LoadTokenUser(1)
    );
    assert_eq!(
        decide(&Method::PATCH, Some(1), &claims(1)),
        AccessDecision::LoadTokenUser(1)
    );
}

#[test]
fn decision_for_other_member_routes() {
    assert_eq!(
        decide(&Method::GET, Some(2), &claims(1)),
        AccessDecision::LoadParamUser(2)
    );
    assert_eq!(decide(&Method::PATCH, Some(2), &claims(1)), AccessDecision::Deny);
    assert_eq!(decide(&Method::DELETE, Some(2), &claims(1)), AccessDecision::Deny);
    assert_eq!(decide(&Method::POST, Some(2), &claims(1)), AccessDecision::Deny);
}

/// Tests a request without an Authorization header.
///
/// Expected: Err(InvalidJwt)
#[tokio::test]
async fn missing_token_is_rejected() -> Result<(), AppError> {
    let test = TestBuilder::new().with_member_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = JwtKeys::new("secret");

    let result = JwtGuard::new(db, &keys)
        .require(&HeaderMap::new(), &Method::GET, None)
        .await;

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::InvalidJwt))));

    Ok(())
}

/// Tests a token signed with another secret.
///
/// Expected: Err(InvalidJwt)
#[tokio::test]
async fn foreign_token_is_rejected() -> Result<(), AppError> {
    let test = TestBuilder::new().with_member_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let headers = auth_headers(&JwtKeys::new("other"), 1);
    let result = JwtGuard::new(db, &JwtKeys::new("secret"))
        .require(&headers, &Method::GET, None)
        .await;

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::InvalidJwt))));

    Ok(())
}

/// Tests the lookups each decision performs.
///
/// Expected: own profile loads the token owner, a stale token fails with
/// JwtUserNotFound, and an unknown addressed member fails with ParamUserNotFound
#[tokio::test]
async fn guard_loads_users_per_decision() -> Result<(), AppError> {
    let test = TestBuilder::new().with_member_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = JwtKeys::new("secret");
    let guard = JwtGuard::new(db, &keys);

    let user = factory::create_user(db).await?;
    let headers = auth_headers(&keys, user.id);

    let principal = guard.require(&headers, &Method::GET, Some(user.id)).await?;
    assert_eq!(principal.user.map(|u| u.id), Some(user.id));

    let result = guard.require(&headers, &Method::GET, Some(9999)).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::ParamUserNotFound(9999)))
    ));

    let stale = auth_headers(&keys, 8888);
    let result = guard.require(&stale, &Method::PATCH, Some(8888)).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::JwtUserNotFound(8888)))
    ));

    let principal = guard.require(&stale, &Method::DELETE, Some(8888)).await?;
    assert_eq!(principal.user_id(), 8888);
    assert!(principal.user.is_none());

    Ok(())
}

/// Tests modifying another member.
///
/// Expected: Err(AccessDenied)
#[tokio::test]
async fn modifying_other_member_is_denied() -> Result<(), AppError> {
    let test = TestBuilder::new().with_member_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = JwtKeys::new("secret");

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;

    let result = JwtGuard::new(db, &keys)
        .require(&auth_headers(&keys, user.id), &Method::PATCH, Some(other.id))
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(id, _))) if id == user.id
    ));

    Ok(())
}
