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
                    .table(Photo::Table)
                    .if_not_exists()
                    .col(pk_auto(Photo::Id))
                    .col(string(Photo::Kind))
                    .col(integer_null(Photo::MemberId))
                    .col(integer_null(Photo::EventId))
                    .col(string(Photo::PhotoUrl))
                    .col(string(Photo::HighresUrl))
                    .col(string(Photo::BaseUrl))
                    .col(
                        timestamp_with_time_zone(Photo::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_photo_member_id")
                            .from(Photo::Table, Photo::MemberId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_photo_event_id")
                            .from(Photo::Table, Photo::EventId)
                            .to(Event::Table, Event::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Photo::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Photo {
    Table,
    Id,
    Kind,
    MemberId,
    EventId,
    PhotoUrl,
    HighresUrl,
    BaseUrl,
    CreatedAt,
}
