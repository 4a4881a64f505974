use super::*;

/// Tests that only provided fields change.
///
/// Expected: name and phone updated, gender and location unchanged
#[tokio::test]
async fn updates_only_provided_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;

    let repo = UserRepository::new(db);
    let updated = repo
        .update_profile(
            user.id,
            UpdateProfileParam {
                name: Some("Renamed".to_string()),
                phone: Some("91234567".to_string()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.name.as_deref(), Some("Renamed"));
    assert_eq!(updated.phone.as_deref(), Some("91234567"));
    assert_eq!(updated.gender, user.gender);
    assert_eq!(updated.location, user.location);
    assert_eq!(updated.email, user.email);

    Ok(())
}

/// Tests setting and clearing a provider id.
///
/// Expected: google id set, then cleared
#[tokio::test]
async fn sets_and_clears_provider_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = UserRepository::new(db);

    repo.set_provider_id(user.id, Provider::Google, Some("g-9".to_string()))
        .await?;
    let linked = repo.find_by_id(user.id).await?.unwrap();
    assert_eq!(linked.google.as_deref(), Some("g-9"));

    repo.set_provider_id(user.id, Provider::Google, None).await?;
    let unlinked = repo.find_by_id(user.id).await?.unwrap();
    assert!(unlinked.google.is_none());

    Ok(())
}

/// Tests updating a member that does not exist.
///
/// Expected: Err
#[tokio::test]
async fn fails_for_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let result = repo
        .update_profile(
            9999,
            UpdateProfileParam {
                name: Some("Ghost".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(result.is_err());

    Ok(())
}
