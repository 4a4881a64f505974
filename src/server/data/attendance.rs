use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

pub struct AttendanceRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AttendanceRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, event_id: i32, user_id: i32) -> Result<(), DbErr> {
        entity::event_attendance::ActiveModel {
            event_id: ActiveValue::Set(event_id),
            user_id: ActiveValue::Set(user_id),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    pub async fn exists(&self, event_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let row = entity::prelude::EventAttendance::find_by_id((event_id, user_id))
            .one(self.db)
            .await?;

        Ok(row.is_some())
    }

    /// Removes an attendance row.
    ///
    /// # Returns
    /// - `Ok(true)` - The member was attending and no longer is
    /// - `Ok(false)` - The member was not attending
    pub async fn delete(&self, event_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::EventAttendance::delete_by_id((event_id, user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// `(event_id, user_id)` pairs for the given events in join order.
    pub async fn get_by_events(&self, event_ids: Vec<i32>) -> Result<Vec<(i32, i32)>, DbErr> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::EventAttendance::find()
            .filter(entity::event_attendance::Column::EventId.is_in(event_ids))
            .order_by_asc(entity::event_attendance::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(|row| (row.event_id, row.user_id))
            .collect())
    }
}
