//! Integration tests for profile editing and preferences.

mod common;

use common::*;

fn profile(name: &str, password: &str, confirm: &str) -> ProfileForm {
    ProfileForm {
        name: name.to_string(),
        email: "demo@ejemplo.com".to_string(),
        bio: "Me gusta el trekking".to_string(),
        password: password.to_string(),
        confirm_password: confirm.to_string(),
    }
}

#[tokio::test]
async fn test_save_profile_updates_user() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let profiles = ProfileService::new(store.clone());

    let user = profiles.save_profile(&profile(" Ana ", "", "")).await?;

    assert_eq!(user.id, 1, "Id comes from the stored user");
    assert_eq!(user.name, "Ana");
    assert_eq!(user.email.as_deref(), Some("demo@ejemplo.com"));
    assert_eq!(user.bio.as_deref(), Some("Me gusta el trekking"));
    assert_eq!(store.current_user().await?, user);

    Ok(())
}

#[tokio::test]
async fn test_password_is_never_stored() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let profiles = ProfileService::new(store.clone());

    profiles
        .save_profile(&profile("Ana", "secreto", "secreto"))
        .await?;

    let raw = store.raw(CURRENT_USER_KEY).unwrap();
    assert!(!raw.contains("secreto"));
    assert!(!raw.contains("password"));

    Ok(())
}

#[tokio::test]
async fn test_invalid_profile_writes_nothing() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let profiles = ProfileService::new(store.clone());
    let before = profiles.current_user().await?;
    let writes_before = store.writes();

    let missing_name = profiles.save_profile(&profile("  ", "", "")).await;
    assert!(matches!(missing_name, Err(ProfileError::MissingName)));

    let mismatch = profiles.save_profile(&profile("Ana", "abcd", "abce")).await;
    assert!(matches!(mismatch, Err(ProfileError::PasswordMismatch)));

    let short = profiles.save_profile(&profile("Ana", "abc", "abc")).await;
    assert!(matches!(short, Err(ProfileError::PasswordTooShort { min: 4 })));

    assert_eq!(store.writes(), writes_before);
    assert_eq!(profiles.current_user().await?, before);

    Ok(())
}

#[tokio::test]
async fn test_renamed_user_comments_under_new_name() -> anyhow::Result<()> {
    let (engine, store) = memory_engine();
    let profiles = ProfileService::new(store);
    let user = profiles.save_profile(&profile("Ana", "", "")).await?;
    let mut view = ViewCommands::new();

    engine
        .add_comment(1, &user.identity(), "hola", &mut view)
        .await?;

    let card = view.last_board().unwrap().get(1).unwrap();
    assert_eq!(card.comments[0].author_name, "Ana");

    Ok(())
}

#[tokio::test]
async fn test_dark_mode_round_trips_through_service() -> anyhow::Result<()> {
    let profiles = ProfileService::new(MemoryStore::new());

    assert!(!profiles.dark_mode().await?);
    profiles.set_dark_mode(true).await?;
    assert!(profiles.dark_mode().await?);

    Ok(())
}

#[tokio::test]
async fn test_set_avatar_on_project() -> anyhow::Result<()> {
    let (store, _dir) = create_test_project().await;
    let profiles = ProfileService::new(store);
    let image = create_test_image(".jpg");

    let user = profiles.set_avatar(image.path()).await?;

    let path = profiles.avatar_path(&user).expect("avatar should be set");
    assert!(path.is_file());
    assert_eq!(profiles.current_user().await?.avatar_ref, user.avatar_ref);

    Ok(())
}
