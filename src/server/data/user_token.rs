//! Provider access tokens held for members.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::token::UserToken;

pub struct UserTokenRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserTokenRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends a token for `kind`.
    ///
    /// Earlier tokens of the same kind are kept; lookups return the newest.
    ///
    /// # Arguments
    /// - `user_id` - Owner of the token
    /// - `kind` - Provider name
    /// - `access_token` - Token secret returned by the provider
    ///
    /// # Returns
    /// - `Ok(UserToken)` - Stored token
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(
        &self,
        user_id: i32,
        kind: &str,
        access_token: String,
    ) -> Result<UserToken, DbErr> {
        let entity = entity::user_token::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            kind: ActiveValue::Set(kind.to_string()),
            access_token: ActiveValue::Set(access_token),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(UserToken::from_entity(entity))
    }

    /// Newest token of `kind` held by the member.
    pub async fn find_by_kind(&self, user_id: i32, kind: &str) -> Result<Option<UserToken>, DbErr> {
        let entity = entity::prelude::UserToken::find()
            .filter(entity::user_token::Column::UserId.eq(user_id))
            .filter(entity::user_token::Column::Kind.eq(kind))
            .order_by_desc(entity::user_token::Column::Id)
            .one(self.db)
            .await?;

        Ok(entity.map(UserToken::from_entity))
    }

    /// Distinct token kinds held by the member, sorted.
    pub async fn get_kinds(&self, user_id: i32) -> Result<Vec<String>, DbErr> {
        let entities = entity::prelude::UserToken::find()
            .filter(entity::user_token::Column::UserId.eq(user_id))
            .order_by_asc(entity::user_token::Column::Kind)
            .all(self.db)
            .await?;

        let mut kinds: Vec<String> = entities.into_iter().map(|token| token.kind).collect();
        kinds.dedup();

        Ok(kinds)
    }

    /// Removes every token of `kind` held by the member.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of removed tokens
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete_by_kind(&self, user_id: i32, kind: &str) -> Result<u64, DbErr> {
        let result = entity::prelude::UserToken::delete_many()
            .filter(entity::user_token::Column::UserId.eq(user_id))
            .filter(entity::user_token::Column::Kind.eq(kind))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
