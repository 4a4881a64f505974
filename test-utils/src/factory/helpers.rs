//! Shared helper utilities for factory methods.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Registers `user_id` as an additional host of `event_id`.
///
/// # Arguments
/// - `db` - Database connection
/// - `event_id` - Event to add the host to
/// - `user_id` - Member becoming a host
///
/// # Returns
/// - `Ok(entity::event_host::Model)` - Created host row
/// - `Err(DbErr)` - Database error during insert
pub async fn add_host(
    db: &DatabaseConnection,
    event_id: i32,
    user_id: i32,
) -> Result<entity::event_host::Model, DbErr> {
    entity::event_host::ActiveModel {
        event_id: ActiveValue::Set(event_id),
        user_id: ActiveValue::Set(user_id),
    }
    .insert(db)
    .await
}

/// Stores a provider access token for a member.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Owner of the token
/// - `kind` - Provider name such as `facebook` or `foursquare`
///
/// # Returns
/// - `Ok(entity::user_token::Model)` - Created token row
/// - `Err(DbErr)` - Database error during insert
pub async fn add_token(
    db: &DatabaseConnection,
    user_id: i32,
    kind: &str,
) -> Result<entity::user_token::Model, DbErr> {
    entity::user_token::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        kind: ActiveValue::Set(kind.to_string()),
        access_token: ActiveValue::Set(format!("{}-token-{}", kind, next_id())),
        created_at: ActiveValue::Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
