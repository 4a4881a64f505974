use crate::server::data::user_token::UserTokenRepository;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

/// Tests that the newest token of a kind is returned.
///
/// Expected: the second token's secret
#[tokio::test]
async fn finds_newest_token_of_kind() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_member_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = UserTokenRepository::new(db);

    repo.create(user.id, "facebook", "old".to_string()).await?;
    repo.create(user.id, "facebook", "new".to_string()).await?;

    let token = repo.find_by_kind(user.id, "facebook").await?.unwrap();

    assert_eq!(token.access_token, "new");

    Ok(())
}

/// Tests listing distinct token kinds.
///
/// Expected: each kind once, sorted
#[tokio::test]
async fn lists_distinct_kinds() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_member_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    factory::helpers::add_token(db, user.id, "google").await?;
    factory::helpers::add_token(db, user.id, "facebook").await?;
    factory::helpers::add_token(db, user.id, "facebook").await?;

    let repo = UserTokenRepository::new(db);
    let kinds = repo.get_kinds(user.id).await?;

    assert_eq!(kinds, vec!["facebook".to_string(), "google".to_string()]);

    Ok(())
}

/// Tests removing all tokens of one kind.
///
/// Expected: facebook tokens removed, google token kept
#[tokio::test]
async fn deletes_tokens_of_kind_only() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_member_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    factory::helpers::add_token(db, user.id, "facebook").await?;
    factory::helpers::add_token(db, user.id, "facebook").await?;
    factory::helpers::add_token(db, user.id, "google").await?;

    let repo = UserTokenRepository::new(db);
    let removed = repo.delete_by_kind(user.id, "facebook").await?;

    assert_eq!(removed, 2);
    assert!(repo.find_by_kind(user.id, "facebook").await?.is_none());
    assert!(repo.find_by_kind(user.id, "google").await?.is_some());

    Ok(())
}
