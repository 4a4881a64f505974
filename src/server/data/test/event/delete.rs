use super::*;
use crate::server::data::{
    attendance::AttendanceRepository, comment::CommentRepository, rating::RatingRepository,
};
use sea_orm::{EntityTrait, PaginatorTrait};

/// Tests that deleting an event removes everything attached to it.
///
/// Expected: Ok(true) and no host, attendance, comment, rating or photo rows left
#[tokio::test]
async fn deletes_event_and_dependents() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::user::create_user(db).await?;
    let guest = factory::user::create_user(db).await?;
    let event = factory::event::create_event(db, host.id).await?;
    factory::photo::create_event_photo(db, event.id).await?;
    AttendanceRepository::new(db).create(event.id, guest.id).await?;
    CommentRepository::new(db)
        .create(event.id, guest.id, None, "Nice".to_string())
        .await?;
    RatingRepository::new(db).create(event.id, guest.id, 5).await?;

    let repo = EventRepository::new(db);
    let deleted = repo.delete(event.id).await?;

    assert!(deleted);
    assert!(repo.find_by_id(event.id).await?.is_none());
    assert_eq!(entity::prelude::EventHost::find().count(db).await?, 0);
    assert_eq!(entity::prelude::EventAttendance::find().count(db).await?, 0);
    assert_eq!(entity::prelude::EventComment::find().count(db).await?, 0);
    assert_eq!(entity::prelude::EventRating::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Photo::find().count(db).await?, 0);

    Ok(())
}
