pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_user_table;
mod m20260301_000002_create_user_token_table;
mod m20260301_000003_create_venue_table;
mod m20260301_000004_create_event_table;
mod m20260301_000005_create_event_host_table;
mod m20260301_000006_create_photo_table;
mod m20260301_000007_create_event_attendance_table;
mod m20260301_000008_create_event_comment_table;
mod m20260301_000009_create_event_rating_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_user_table::Migration),
            Box::new(m20260301_000002_create_user_token_table::Migration),
            Box::new(m20260301_000003_create_venue_table::Migration),
            Box::new(m20260301_000004_create_event_table::Migration),
            Box::new(m20260301_000005_create_event_host_table::Migration),
            Box::new(m20260301_000006_create_photo_table::Migration),
            Box::new(m20260301_000007_create_event_attendance_table::Migration),
            Box::new(m20260301_000008_create_event_comment_table::Migration),
            Box::new(m20260301_000009_create_event_rating_table::Migration),
        ]
    }
}
