use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260301_000001_create_user_table::User, m20260301_000004_create_event_table::Event,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EventAttendance::Table)
                    .if_not_exists()
                    .col(integer(EventAttendance::EventId))
                    .col(integer(EventAttendance::UserId))
                    .col(
                        timestamp_with_time_zone(EventAttendance::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(EventAttendance::EventId)
                            .col(EventAttendance::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_attendance_event_id")
                            .from(EventAttendance::Table, EventAttendance::EventId)
                            .to(Event::Table, Event::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_attendance_user_id")
                            .from(EventAttendance::Table, EventAttendance::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EventAttendance::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum EventAttendance {
    Table,
    EventId,
    UserId,
    CreatedAt,
}
