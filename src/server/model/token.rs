//! API token claims and stored provider tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JWT payload. Tokens carry no expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Member id the token was issued for.
    pub id: i32,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
}

/// Provider access token stored for a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserToken {
    pub id: i32,
    pub user_id: i32,
    /// Provider name, e.g. `facebook`.
    pub kind: String,
    pub access_token: String,
    pub created_at: DateTime<Utc>,
}

impl UserToken {
    pub fn from_entity(entity: entity::user_token::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            kind: entity.kind,
            access_token: entity.access_token,
            created_at: entity.created_at,
        }
    }
}
