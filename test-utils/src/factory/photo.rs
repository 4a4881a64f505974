//! Photo factory for member and event photos.
//!
//! Only the database row is created; no files are written to disk.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

async fn insert_photo(
    db: &DatabaseConnection,
    kind: &str,
    member_id: Option<i32>,
    event_id: Option<i32>,
) -> Result<entity::photo::Model, DbErr> {
    let id = next_id();
    let base_url = "http://localhost:7000".to_string();
    entity::photo::ActiveModel {
        kind: ActiveValue::Set(kind.to_string()),
        member_id: ActiveValue::Set(member_id),
        event_id: ActiveValue::Set(event_id),
        photo_url: ActiveValue::Set(format!("{}/uploads/photo{}_320_240.png", base_url, id)),
        highres_url: ActiveValue::Set(format!("{}/uploads/photo{}.png", base_url, id)),
        base_url: ActiveValue::Set(base_url),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Creates a photo owned by member `member_id`.
pub async fn create_member_photo(
    db: &DatabaseConnection,
    member_id: i32,
) -> Result<entity::photo::Model, DbErr> {
    insert_photo(db, "member", Some(member_id), None).await
}

/// Creates a photo attached to event `event_id`.
pub async fn create_event_photo(
    db: &DatabaseConnection,
    event_id: i32,
) -> Result<entity::photo::Model, DbErr> {
    insert_photo(db, "event", None, Some(event_id)).await
}
