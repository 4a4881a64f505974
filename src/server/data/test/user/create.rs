use super::*;

/// Tests creating a local account.
///
/// Verifies that the email is stored lowercased and that profile defaults are applied
/// when no gender or location is supplied.
///
/// Expected: Ok with lowercased email, gender "male" and location "Hong Kong"
#[tokio::test]
async fn creates_user_with_defaults() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create(CreateUserParam {
            email: Some("Someone@Example.COM".to_string()),
            password_hash: Some("hash".to_string()),
            ..Default::default()
        })
        .await?;

    assert_eq!(user.email.as_deref(), Some("someone@example.com"));
    assert_eq!(user.gender, "male");
    assert_eq!(user.location, "Hong Kong");
    assert!(user.avatar_id.is_none());

    Ok(())
}

/// Tests that a second account with the same email is rejected by the unique index.
///
/// Expected: Err on the second insert
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let param = CreateUserParam {
        email: Some("dup@example.com".to_string()),
        ..Default::default()
    };
    repo.create(param.clone()).await?;

    let result = repo.create(param).await;

    assert!(result.is_err());

    Ok(())
}

/// Tests creating an OAuth-only account.
///
/// Expected: Ok with the provider id set and no password
#[tokio::test]
async fn creates_provider_account_without_password() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create(CreateUserParam {
            google: Some("g-1".to_string()),
            name: Some("Google User".to_string()),
            gender: Some("female".to_string()),
            ..Default::default()
        })
        .await?;

    assert!(user.password_hash.is_none());
    assert_eq!(user.google.as_deref(), Some("g-1"));
    assert_eq!(user.gender, "female");

    Ok(())
}
