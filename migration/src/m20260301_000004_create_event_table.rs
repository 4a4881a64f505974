use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000003_create_venue_table::Venue;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(pk_auto(Event::Id))
                    .col(string(Event::Name))
                    .col(text(Event::Description))
                    .col(timestamp_with_time_zone(Event::Time))
                    .col(double(Event::DurationHours))
                    .col(big_integer(Event::Fee))
                    .col(string(Event::Status))
                    .col(integer_null(Event::VenueId))
                    .col(integer(Event::RatingCount).default(0))
                    .col(double(Event::RatingOverall).default(0.0))
                    .col(
                        timestamp_with_time_zone(Event::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Event::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_venue_id")
                            .from(Event::Table, Event::VenueId)
                            .to(Venue::Table, Venue::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Event {
    Table,
    Id,
    Name,
    Description,
    Time,
    DurationHours,
    Fee,
    Status,
    VenueId,
    RatingCount,
    RatingOverall,
    CreatedAt,
    UpdatedAt,
}
