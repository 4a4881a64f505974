use super::*;

/// Tests creating an event.
///
/// Verifies the event is stored with an empty rating and the creator becomes its host.
///
/// Expected: Ok with the creator registered as host
#[tokio::test]
async fn creates_event_with_host() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = EventRepository::new(db);

    let event = repo.create(user.id, event_param("Yum cha")).await?;

    assert_eq!(event.name, "Yum cha");
    assert_eq!(event.status, EventStatus::Upcoming);
    assert_eq!(event.rating, Rating::default());
    assert!(repo.is_host(event.id, user.id).await?);

    Ok(())
}

/// Tests replacing event fields.
///
/// Expected: every field replaced, venue untouched
#[tokio::test]
async fn updates_all_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let venue = factory::venue::create_venue(db).await?;
    let created = factory::event::EventFactory::new(db, user.id)
        .venue_id(venue.id)
        .build()
        .await?;

    let repo = EventRepository::new(db);
    let mut param = event_param("Hike");
    param.status = EventStatus::Cancelled;
    let updated = repo.update(created.id, param).await?;

    assert_eq!(updated.name, "Hike");
    assert_eq!(updated.status, EventStatus::Cancelled);
    assert_eq!(updated.fee, 1000);
    assert_eq!(updated.venue_id, Some(venue.id));

    Ok(())
}

/// Tests that only hosted events are listed for a member.
///
/// Expected: the member's two events, not the other member's
#[tokio::test]
async fn lists_hosted_events() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::user::create_user(db).await?;
    let other = factory::user::create_user(db).await?;
    let first = factory::event::create_event(db, host.id).await?;
    let second = factory::event::create_event(db, host.id).await?;
    factory::event::create_event(db, other.id).await?;

    let repo = EventRepository::new(db);
    let hosted = repo.get_hosted_by(host.id).await?;

    assert_eq!(
        hosted.iter().map(|event| event.id).collect::<Vec<_>>(),
        vec![first.id, second.id]
    );
    assert_eq!(repo.get_all().await?.len(), 3);

    Ok(())
}

/// Tests storing a recomputed rating.
///
/// Expected: count and overall persisted
#[tokio::test]
async fn stores_rating() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let event = factory::event::create_event(db, user.id).await?;

    let repo = EventRepository::new(db);
    repo.set_rating(event.id, Rating { count: 2, overall: 4.5 })
        .await?;

    let stored = repo.find_by_id(event.id).await?.unwrap();
    assert_eq!(stored.rating, Rating { count: 2, overall: 4.5 });

    Ok(())
}
