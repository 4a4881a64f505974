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
                    .table(EventHost::Table)
                    .if_not_exists()
                    .col(integer(EventHost::EventId))
                    .col(integer(EventHost::UserId))
                    .primary_key(
                        Index::create()
                            .col(EventHost::EventId)
                            .col(EventHost::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_host_event_id")
                            .from(EventHost::Table, EventHost::EventId)
                            .to(Event::Table, Event::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_host_user_id")
                            .from(EventHost::Table, EventHost::UserId)
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
            .drop_table(Table::drop().table(EventHost::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum EventHost {
    Table,
    EventId,
    UserId,
}
