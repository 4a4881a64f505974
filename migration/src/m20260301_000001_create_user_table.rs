use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string_null(User::Email).unique_key())
                    .col(string_null(User::Password))
                    .col(string_null(User::Facebook).unique_key())
                    .col(string_null(User::Google).unique_key())
                    .col(string_null(User::Name))
                    .col(string(User::Gender).default("male"))
                    .col(string(User::Location).default("Hong Kong"))
                    .col(string_null(User::Phone))
                    .col(string_null(User::Website))
                    .col(string_null(User::Picture))
                    // Points at a row of `photo`, which itself references `user`, so the
                    // avatar is kept consistent by the repositories instead of a foreign key.
                    .col(integer_null(User::AvatarId))
                    .col(
                        timestamp_with_time_zone(User::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(User::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    Email,
    Password,
    Facebook,
    Google,
    Name,
    Gender,
    Location,
    Phone,
    Website,
    Picture,
    AvatarId,
    CreatedAt,
    UpdatedAt,
}
