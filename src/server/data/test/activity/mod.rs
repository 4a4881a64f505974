use crate::server::data::{
    attendance::AttendanceRepository, comment::CommentRepository, rating::RatingRepository,
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

/// Tests joining and leaving an event.
///
/// Expected: exists after join, gone after leave, second leave reports false
#[tokio::test]
async fn joins_and_leaves() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::user::create_user(db).await?;
    let guest = factory::user::create_user(db).await?;
    let event = factory::event::create_event(db, host.id).await?;

    let repo = AttendanceRepository::new(db);
    repo.create(event.id, guest.id).await?;

    assert!(repo.exists(event.id, guest.id).await?);
    assert_eq!(
        repo.get_by_events(vec![event.id]).await?,
        vec![(event.id, guest.id)]
    );

    assert!(repo.delete(event.id, guest.id).await?);
    assert!(!repo.exists(event.id, guest.id).await?);
    assert!(!repo.delete(event.id, guest.id).await?);

    Ok(())
}

/// Tests that joining twice violates the composite key.
///
/// Expected: Err on the second insert
#[tokio::test]
async fn double_join_fails() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::user::create_user(db).await?;
    let event = factory::event::create_event(db, host.id).await?;

    let repo = AttendanceRepository::new(db);
    repo.create(event.id, host.id).await?;

    assert!(repo.create(event.id, host.id).await.is_err());

    Ok(())
}

/// Tests storing and listing comments.
///
/// Expected: comments returned oldest first for the requested event only
#[tokio::test]
async fn lists_comments_per_event() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::user::create_user(db).await?;
    let event = factory::event::create_event(db, host.id).await?;
    let other_event = factory::event::create_event(db, host.id).await?;

    let repo = CommentRepository::new(db);
    let first = repo
        .create(event.id, host.id, Some("Title".to_string()), "First".to_string())
        .await?;
    repo.create(event.id, host.id, None, "Second".to_string())
        .await?;
    repo.create(other_event.id, host.id, None, "Elsewhere".to_string())
        .await?;

    let comments = repo.get_by_events(vec![event.id]).await?;

    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].id, first.id);
    assert_eq!(comments[0].title.as_deref(), Some("Title"));
    assert_eq!(comments[1].comment, "Second");

    Ok(())
}

/// Tests rating storage and lookup.
///
/// Expected: existence per member and all values returned
#[tokio::test]
async fn stores_ratings() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::user::create_user(db).await?;
    let guest = factory::user::create_user(db).await?;
    let event = factory::event::create_event(db, host.id).await?;

    let repo = RatingRepository::new(db);
    repo.create(event.id, host.id, 5).await?;
    repo.create(event.id, guest.id, 3).await?;

    assert!(repo.exists(event.id, guest.id).await?);
    let mut values = repo.get_values(event.id).await?;
    values.sort();
    assert_eq!(values, vec![3, 5]);

    Ok(())
}
