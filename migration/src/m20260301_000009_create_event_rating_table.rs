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
                    .table(EventRating::Table)
                    .if_not_exists()
                    .col(pk_auto(EventRating::Id))
                    .col(integer(EventRating::EventId))
                    .col(integer(EventRating::UserId))
                    .col(integer(EventRating::Rating))
                    .col(
                        timestamp_with_time_zone(EventRating::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_rating_event_id")
                            .from(EventRating::Table, EventRating::EventId)
                            .to(Event::Table, Event::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_rating_user_id")
                            .from(EventRating::Table, EventRating::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_rating_event_user")
                    .table(EventRating::Table)
                    .col(EventRating::EventId)
                    .col(EventRating::UserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EventRating::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum EventRating {
    Table,
    Id,
    EventId,
    UserId,
    Rating,
    CreatedAt,
}
