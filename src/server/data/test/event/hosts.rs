use super::*;

/// Tests host pairs across several events.
///
/// Expected: a co-host appears next to the creator
#[tokio::test]
async fn returns_host_pairs() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::user::create_user(db).await?;
    let cohost = factory::user::create_user(db).await?;
    let event = factory::event::create_event(db, host.id).await?;
    factory::helpers::add_host(db, event.id, cohost.id).await?;

    let repo = EventRepository::new(db);
    let pairs = repo.get_hosts(vec![event.id]).await?;

    assert_eq!(pairs, vec![(event.id, host.id), (event.id, cohost.id)]);
    assert!(repo.is_host(event.id, cohost.id).await?);

    Ok(())
}

/// Tests host check for a non-host.
///
/// Expected: false
#[tokio::test]
async fn non_host_is_not_host() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let host = factory::user::create_user(db).await?;
    let other = factory::user::create_user(db).await?;
    let event = factory::event::create_event(db, host.id).await?;

    let repo = EventRepository::new(db);

    assert!(!repo.is_host(event.id, other.id).await?);

    Ok(())
}
