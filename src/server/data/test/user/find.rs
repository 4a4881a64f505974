use super::*;

/// Tests that email lookup ignores case.
///
/// Expected: Ok(Some) for an uppercased query
#[tokio::test]
async fn finds_by_email_case_insensitively() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::user::UserFactory::new(db)
        .email("mixed@example.com")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let found = repo.find_by_email("MIXED@example.com").await?;

    assert_eq!(found.map(|user| user.id), Some(created.id));

    Ok(())
}

/// Tests finding the owner of a provider account.
///
/// Expected: Ok(Some) for the linked provider, Ok(None) for the other one
#[tokio::test]
async fn finds_by_provider_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::user::UserFactory::new(db)
        .facebook("fb-77")
        .build()
        .await?;

    let repo = UserRepository::new(db);

    let by_facebook = repo.find_by_provider_id(Provider::Facebook, "fb-77").await?;
    let by_google = repo.find_by_provider_id(Provider::Google, "fb-77").await?;
    let by_foursquare = repo.find_by_provider_id(Provider::Foursquare, "fb-77").await?;

    assert_eq!(by_facebook.map(|user| user.id), Some(created.id));
    assert!(by_google.is_none());
    assert!(by_foursquare.is_none());

    Ok(())
}

/// Tests the email ownership check used by profile updates.
///
/// Expected: taken for another member, free for the owner themselves
#[tokio::test]
async fn email_taken_excludes_self() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::UserFactory::new(db)
        .email("owner@example.com")
        .build()
        .await?;
    let other = factory::user::create_user(db).await?;

    let repo = UserRepository::new(db);

    assert!(repo.email_taken("owner@example.com", other.id).await?);
    assert!(!repo.email_taken("owner@example.com", owner.id).await?);
    assert!(!repo.email_taken("nobody@example.com", other.id).await?);

    Ok(())
}
