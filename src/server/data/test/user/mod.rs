use crate::server::{
    data::user::UserRepository,
    model::{
        oauth::Provider,
        user::{CreateUserParam, UpdateProfileParam},
    },
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod find;
mod update_profile;
