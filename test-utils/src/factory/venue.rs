//! Venue factory.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a venue with a generated name and a single address line.
///
/// # Returns
/// - `Ok(entity::venue::Model)` - Created venue entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_venue(db: &DatabaseConnection) -> Result<entity::venue::Model, DbErr> {
    let id = next_id();
    entity::venue::ActiveModel {
        name: ActiveValue::Set(format!("Venue {}", id)),
        address1: ActiveValue::Set(format!("{} Nathan Road", id)),
        address2: ActiveValue::Set(None),
        address3: ActiveValue::Set(None),
        city: ActiveValue::Set(Some("Hong Kong".to_string())),
        country: ActiveValue::Set(Some("HK".to_string())),
        phone: ActiveValue::Set(None),
        lat: ActiveValue::Set(None),
        lon: ActiveValue::Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}
