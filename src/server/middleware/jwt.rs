//! Bearer token access control for the `/api` member and event routes.

use axum::http::{HeaderMap, Method};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::{token::Claims, user::User},
    service::jwt::JwtKeys,
};

/// What the guard must do for a request, decided from method, route and claims alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The claims are the principal; nothing is loaded.
    ClaimsOnly,
    /// Load the token owner; a missing row means the token is stale.
    LoadTokenUser(i32),
    /// Read-only view of another member; load the addressed member.
    LoadParamUser(i32),
    Deny,
}

/// Decides access for a route that may carry a `member_id` parameter.
pub fn decide(method: &Method, member_id: Option<i32>, claims: &Claims) -> AccessDecision {
    match member_id {
        None => AccessDecision::ClaimsOnly,
        Some(member_id) if member_id == claims.id => {
            if method == Method::DELETE {
                AccessDecision::ClaimsOnly
            } else {
                AccessDecision::LoadTokenUser(claims.id)
            }
        }
        Some(member_id) if method == Method::GET => AccessDecision::LoadParamUser(member_id),
        Some(_) => AccessDecision::Deny,
    }
}

/// Authenticated caller of a JWT route.
#[derive(Debug, Clone)]
pub struct JwtPrincipal {
    pub claims: Claims,
    /// Member loaded by the decision, if it required one.
    pub user: Option<User>,
}

impl JwtPrincipal {
    pub fn user_id(&self) -> i32 {
        self.claims.id
    }
}

pub struct JwtGuard<'a> {
    db: &'a DatabaseConnection,
    keys: &'a JwtKeys,
}

impl<'a> JwtGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, keys: &'a JwtKeys) -> Self {
        Self { db, keys }
    }

    /// Verifies the token and executes the access decision.
    ///
    /// # Arguments
    /// - `headers` - Request headers carrying `Authorization`
    /// - `method` - Request method
    /// - `member_id` - `member_id` route parameter, if the route has one
    ///
    /// # Returns
    /// - `Ok(JwtPrincipal)` - Access granted
    /// - `Err(AuthError::InvalidJwt)` - Token missing or invalid
    /// - `Err(AuthError::JwtUserNotFound)` - Token owner no longer exists
    /// - `Err(AuthError::ParamUserNotFound)` - Addressed member does not exist
    /// - `Err(AuthError::AccessDenied)` - Modifying another member
    pub async fn require(
        &self,
        headers: &HeaderMap,
        method: &Method,
        member_id: Option<i32>,
    ) -> Result<JwtPrincipal, AppError> {
        let claims = self.keys.claims_from_headers(headers)?;
        let user_repo = UserRepository::new(self.db);

        let user = match decide(method, member_id, &claims) {
            AccessDecision::ClaimsOnly => None,
            AccessDecision::LoadTokenUser(user_id) => Some(
                user_repo
                    .find_by_id(user_id)
                    .await?
                    .ok_or(AuthError::JwtUserNotFound(user_id))?,
            ),
            AccessDecision::LoadParamUser(member_id) => Some(
                user_repo
                    .find_by_id(member_id)
                    .await?
                    .ok_or(AuthError::ParamUserNotFound(member_id))?,
            ),
            AccessDecision::Deny => {
                return Err(AuthError::AccessDenied(
                    claims.id,
                    format!("{} on member {:?}", method, member_id),
                )
                .into())
            }
        };

        Ok(JwtPrincipal { claims, user })
    }
}
