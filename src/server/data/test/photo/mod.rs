use crate::server::{
    data::photo::PhotoRepository,
    model::photo::{CreatePhotoParam, PhotoKind},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

/// Tests inserting a member photo.
///
/// Expected: Ok with kind Member and both URLs stored
#[tokio::test]
async fn creates_member_photo() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_member_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = PhotoRepository::new(db);

    let photo = repo
        .create(CreatePhotoParam {
            kind: PhotoKind::Member,
            member_id: Some(user.id),
            event_id: None,
            photo_url: "http://localhost:7000/uploads/a_320_240.png".to_string(),
            highres_url: "http://localhost:7000/uploads/a.png".to_string(),
            base_url: "http://localhost:7000".to_string(),
        })
        .await?;

    assert_eq!(photo.kind, PhotoKind::Member);
    assert_eq!(photo.member_id, Some(user.id));
    assert_eq!(
        photo.file_names(),
        [Some("a_320_240.png"), Some("a.png")]
    );

    Ok(())
}

/// Tests that member and event photos are listed and counted separately.
///
/// Expected: two member photos, one event photo
#[tokio::test]
async fn separates_member_and_event_photos() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let event = factory::event::create_event(db, user.id).await?;
    let first = factory::photo::create_member_photo(db, user.id).await?;
    factory::photo::create_member_photo(db, user.id).await?;
    factory::photo::create_event_photo(db, event.id).await?;

    let repo = PhotoRepository::new(db);

    let member_photos = repo.get_by_member(user.id).await?;
    assert_eq!(member_photos.len(), 2);
    assert_eq!(member_photos[0].id, first.id);
    assert_eq!(repo.count_by_member(user.id).await?, 2);
    assert_eq!(repo.count_by_event(event.id).await?, 1);
    assert_eq!(repo.get_by_event(event.id).await?[0].kind, PhotoKind::Event);

    Ok(())
}

/// Tests loading the photos of several events in one query.
///
/// Expected: photos of both requested events in upload order, none of the third
#[tokio::test]
async fn gets_photos_of_several_events() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let first = factory::event::create_event(db, user.id).await?;
    let second = factory::event::create_event(db, user.id).await?;
    let skipped = factory::event::create_event(db, user.id).await?;
    let a = factory::photo::create_event_photo(db, first.id).await?;
    let b = factory::photo::create_event_photo(db, second.id).await?;
    factory::photo::create_event_photo(db, skipped.id).await?;
    factory::photo::create_member_photo(db, user.id).await?;

    let photos = PhotoRepository::new(db)
        .get_by_events(vec![first.id, second.id])
        .await?;

    let ids: Vec<i32> = photos.iter().map(|photo| photo.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);
    assert!(PhotoRepository::new(db).get_by_events(Vec::new()).await?.is_empty());

    Ok(())
}

/// Tests deleting a photo row.
///
/// Expected: Ok(true) then Ok(false) on a second attempt
#[tokio::test]
async fn deletes_photo() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_member_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let photo = factory::photo::create_member_photo(db, user.id).await?;

    let repo = PhotoRepository::new(db);

    assert!(repo.delete(photo.id).await?);
    assert!(!repo.delete(photo.id).await?);
    assert!(repo.find_by_id(photo.id).await?.is_none());

    Ok(())
}
