//! Integration tests for adding comments to activities.

mod common;

use common::*;
use time::{Duration, macros::datetime};

#[tokio::test]
async fn test_comment_is_appended_with_author() -> anyhow::Result<()> {
    let (engine, _store) = memory_engine();
    let mut view = ViewCommands::new();

    let outcome = engine
        .add_comment(1, &tester(), "  ¡Nos vemos ahí!  ", &mut view)
        .await?;

    assert_eq!(outcome, Outcome::Applied);
    let activity = engine.activities().await?.into_iter().find(|a| a.id == 1).unwrap();
    assert_eq!(activity.comments.len(), 1);
    let comment = &activity.comments[0];
    assert_eq!(comment.author_id, 99);
    assert_eq!(comment.author_name, "Tester");
    assert_eq!(comment.text, "¡Nos vemos ahí!", "Text is stored trimmed");
    assert_eq!(comment.created_at, datetime!(2025-06-01 12:00 UTC));

    Ok(())
}

#[tokio::test]
async fn test_comments_keep_insertion_order_and_unique_ids() -> anyhow::Result<()> {
    let (engine, _store) = memory_engine();
    let mut view = ViewCommands::new();

    // Same clock instant for every comment.
    for text in ["uno", "dos", "tres"] {
        engine.add_comment(2, &tester(), text, &mut view).await?;
    }
    engine.add_comment(1, &other_user(), "cuatro", &mut view).await?;

    let activities = engine.activities().await?;
    let texts: Vec<&str> = activities[1].comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["uno", "dos", "tres"]);

    let mut ids: Vec<i64> = activities
        .iter()
        .flat_map(|a| a.comments.iter().map(|c| c.id))
        .collect();
    let total = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), total, "Comment ids must not collide");

    Ok(())
}

#[tokio::test]
async fn test_comment_ids_follow_the_clock() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let clock = test_clock();
    let engine = ActivityEngine::with_clock(store, clock.clone());
    let mut view = ViewCommands::new();

    engine.add_comment(1, &tester(), "primero", &mut view).await?;
    clock.advance(Duration::seconds(5));
    engine.add_comment(1, &tester(), "segundo", &mut view).await?;

    let activities = engine.activities().await?;
    let comments = &activities[0].comments;
    assert_eq!(comments[0].id, 1_748_779_200_000);
    assert_eq!(comments[1].id, 1_748_779_205_000);
    assert!(comments[1].created_at > comments[0].created_at);

    Ok(())
}

#[tokio::test]
async fn test_blank_comment_is_dropped_silently() -> anyhow::Result<()> {
    let (engine, store) = memory_engine();
    engine.activities().await?;
    let writes_before = store.writes();

    for text in ["", "   ", "\n\t"] {
        let mut view = ViewCommands::new();
        let outcome = engine.add_comment(1, &tester(), text, &mut view).await?;

        assert_eq!(outcome, Outcome::Rejected(Rejection::EmptyInput));
        assert!(!Rejection::EmptyInput.is_user_visible());
        assert_eq!(view.notices().count(), 0, "Blank comments get no notice");
        assert!(view.last_board().is_none());
        assert_eq!(
            view.commands(),
            &[ViewCommand::ClearInput(InputField::Comment(1))]
        );
    }

    assert_eq!(store.writes(), writes_before);
    assert!(engine.activities().await?[0].comments.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_comment_on_unknown_activity() -> anyhow::Result<()> {
    let (engine, store) = memory_engine();
    engine.activities().await?;
    let writes_before = store.writes();
    let mut view = ViewCommands::new();

    let outcome = engine.add_comment(404, &tester(), "hola", &mut view).await?;

    assert_eq!(outcome, Outcome::NotFound);
    assert_eq!(store.writes(), writes_before);
    assert!(view.is_empty(), "No signal for a missing activity, not even an input clear");

    Ok(())
}

#[tokio::test]
async fn test_comment_refreshes_board_then_clears_input() -> anyhow::Result<()> {
    let (engine, _store) = memory_engine();
    let mut view = ViewCommands::new();

    engine.add_comment(2, &tester(), "hola", &mut view).await?;

    let commands = view.commands();
    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[0], ViewCommand::ShowActivities(_)));
    assert_eq!(commands[1], ViewCommand::ClearInput(InputField::Comment(2)));

    let card = view.last_board().unwrap().get(2).unwrap();
    assert_eq!(card.comments.len(), 1);
    assert_eq!(card.comments[0].author_name, "Tester");
    assert_eq!(card.comments[0].text, "hola");

    Ok(())
}

#[tokio::test]
async fn test_comment_does_not_touch_attendance() -> anyhow::Result<()> {
    let (engine, store) = memory_engine();
    store.save_activities(&[make_activity(8, 2, &[7, 99])]).await?;
    let mut view = ViewCommands::new();

    engine.add_comment(8, &tester(), "vamos", &mut view).await?;

    let activities = engine.activities().await?;
    let activity = &activities[0];
    assert_eq!(activity.attendees.len(), 2);
    assert_eq!(activity.capacity, 2);
    assert_eq!(activity.comments.len(), 1);

    Ok(())
}
