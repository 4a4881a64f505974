use super::*;
use sea_orm::{EntityTrait, PaginatorTrait};

/// Tests that deleting a member removes their dependent rows.
///
/// Verifies tokens, photos, hosting and attendance rows of the member are gone while
/// the event itself remains.
///
/// Expected: Ok(true) and no dependent rows left
#[tokio::test]
async fn deletes_user_and_dependents() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let event = factory::event::create_event(db, user.id).await?;
    factory::helpers::add_token(db, user.id, "facebook").await?;
    factory::photo::create_member_photo(db, user.id).await?;

    let repo = UserRepository::new(db);
    let deleted = repo.delete(user.id).await?;

    assert!(deleted);
    assert!(repo.find_by_id(user.id).await?.is_none());
    assert_eq!(entity::prelude::UserToken::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Photo::find().count(db).await?, 0);
    assert_eq!(entity::prelude::EventHost::find().count(db).await?, 0);
    assert!(entity::prelude::Event::find_by_id(event.id)
        .one(db)
        .await?
        .is_some());

    Ok(())
}

/// Tests deleting an unknown member.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);

    assert!(!repo.delete(4242).await?);

    Ok(())
}
