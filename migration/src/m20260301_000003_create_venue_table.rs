use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Venue::Table)
                    .if_not_exists()
                    .col(pk_auto(Venue::Id))
                    .col(string(Venue::Name))
                    .col(string(Venue::Address1))
                    .col(string_null(Venue::Address2))
                    .col(string_null(Venue::Address3))
                    .col(string_null(Venue::City))
                    .col(string_null(Venue::Country))
                    .col(string_null(Venue::Phone))
                    .col(double_null(Venue::Lat))
                    .col(double_null(Venue::Lon))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Venue::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Venue {
    Table,
    Id,
    Name,
    Address1,
    Address2,
    Address3,
    City,
    Country,
    Phone,
    Lat,
    Lon,
}
