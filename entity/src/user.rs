use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: Option<String>,
    /// Argon2 PHC string, absent for accounts created through OAuth sign-in.
    pub password: Option<String>,
    #[sea_orm(unique)]
    pub facebook: Option<String>,
    #[sea_orm(unique)]
    pub google: Option<String>,
    pub name: Option<String>,
    pub gender: String,
    pub location: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub picture: Option<String>,
    pub avatar_id: Option<i32>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
