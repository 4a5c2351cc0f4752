//! Integration tests for first-access seeding of the state store.

mod common;

use common::*;

#[tokio::test]
async fn test_empty_store_seeds_two_fixtures() -> anyhow::Result<()> {
    let store = MemoryStore::new();

    let activities = store.activities().await?;

    assert_eq!(activities.len(), 2);
    assert_eq!(activities[0].id, 1);
    assert_eq!(activities[0].name, "Senderismo en el Parque Nacional");
    assert_eq!(activities[0].capacity, 20);
    assert_eq!(activities[1].id, 2);
    assert_eq!(activities[1].capacity, 15);
    assert!(activities.iter().all(|a| a.attendees.is_empty() && a.comments.is_empty()));
    assert!(store.raw(ACTIVITIES_KEY).is_some(), "Fixtures should be persisted");

    Ok(())
}

#[tokio::test]
async fn test_second_load_does_not_write() -> anyhow::Result<()> {
    let store = MemoryStore::new();

    let first = store.activities().await?;
    let writes_after_first = store.writes();
    let second = store.activities().await?;

    assert_eq!(writes_after_first, 1);
    assert_eq!(store.writes(), writes_after_first, "Second load must not save");
    assert_eq!(first, second);

    Ok(())
}

#[tokio::test]
async fn test_default_user_is_seeded_once() -> anyhow::Result<()> {
    let store = MemoryStore::new();

    let user = store.current_user().await?;
    assert_eq!(user.id, 1);
    assert_eq!(user.name, "Usuario Demo");
    assert_eq!(store.writes(), 1);

    let again = store.current_user().await?;
    assert_eq!(again, user);
    assert_eq!(store.writes(), 1);

    Ok(())
}

#[tokio::test]
async fn test_stored_user_is_not_replaced() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    store
        .save(
            CURRENT_USER_KEY,
            r#"{"id":99,"name":"Tester","email":"test@mail.com"}"#.to_string(),
        )
        .await?;

    let user = store.current_user().await?;

    assert_eq!(user.id, 99);
    assert_eq!(user.name, "Tester");
    assert_eq!(user.email.as_deref(), Some("test@mail.com"));
    assert_eq!(user.bio, None);

    Ok(())
}

#[tokio::test]
async fn test_corrupt_value_is_an_error() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    store.save(ACTIVITIES_KEY, "not json".to_string()).await?;

    let result = store.activities().await;

    assert!(result.is_err(), "Corrupt data must not be silently replaced");
    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("activities"), "Error should name the key, got: {message}");
    assert_eq!(store.raw(ACTIVITIES_KEY).as_deref(), Some("not json"));

    Ok(())
}

#[tokio::test]
async fn test_dark_mode_defaults_off() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    assert!(!store.dark_mode().await?);

    store.set_dark_mode(true).await?;
    assert!(store.dark_mode().await?);
    assert_eq!(store.raw(DARK_MODE_KEY).as_deref(), Some("1"));

    store.set_dark_mode(false).await?;
    assert_eq!(store.raw(DARK_MODE_KEY).as_deref(), Some("0"));

    Ok(())
}
