//! Integration tests for the append-only play history


use cadence_core::{ContextKind, ContextRef, HistoryLog, NewHistoryEntry, TrackId, UserId};
use cadence_storage::{history, Database};
use chrono::{Duration, TimeZone, Utc};
use test_helpers::*;

fn play(user: &UserId, track: &str, secs: i64, context: Option<ContextRef>) -> NewHistoryEntry {
    NewHistoryEntry {
        user_id: user.clone(),
        track_id: TrackId::new(track),
        context,
        played_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(secs),
    }
}

#[tokio::test]
async fn test_append_and_read_back() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let user = create_test_user(pool, "listener").await;
    create_test_track(pool, "t1", "ar", Some(("al", "Album")), Some(1)).await;

    let context = ContextRef::new(ContextKind::Album, "al");
    let entry = history::append(pool, &play(&user, "t1", 0, Some(context.clone())))
        .await
        .unwrap();

    assert!(entry.id > 0);
    assert_eq!(entry.track_id, TrackId::new("t1"));
    assert_eq!(entry.context, Some(context));

    let recent = history::recent(pool, &user, 10).await.unwrap();
    assert_eq!(recent, vec![entry]);
}

#[tokio::test]
async fn test_recent_is_newest_first_and_limited() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let user = create_test_user(pool, "listener").await;
    for id in ["a", "b", "c"] {
        create_test_track(pool, id, "ar", None, None).await;
    }

    history::append(pool, &play(&user, "a", 0, None)).await.unwrap();
    history::append(pool, &play(&user, "b", 10, None)).await.unwrap();
    history::append(pool, &play(&user, "c", 20, None)).await.unwrap();

    let recent = history::recent(pool, &user, 2).await.unwrap();
    let tracks: Vec<&str> = recent.iter().map(|e| e.track_id.as_str()).collect();
    assert_eq!(tracks, vec!["c", "b"]);
}

#[tokio::test]
async fn test_same_second_plays_keep_insertion_order() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let user = create_test_user(pool, "listener").await;
    create_test_track(pool, "a", "ar", None, None).await;
    create_test_track(pool, "b", "ar", None, None).await;

    history::append(pool, &play(&user, "a", 5, None)).await.unwrap();
    history::append(pool, &play(&user, "b", 5, None)).await.unwrap();

    let recent = history::recent(pool, &user, 10).await.unwrap();
    assert_eq!(recent[0].track_id, TrackId::new("b"));
    assert_eq!(recent[1].track_id, TrackId::new("a"));
}

#[tokio::test]
async fn test_history_is_per_user() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let alice = create_test_user(pool, "alice").await;
    let bob = create_test_user(pool, "bob").await;
    create_test_track(pool, "t", "ar", None, None).await;

    history::append(pool, &play(&alice, "t", 0, None)).await.unwrap();

    assert_eq!(history::recent(pool, &alice, 10).await.unwrap().len(), 1);
    assert!(history::recent(pool, &bob, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_history_rejects_update_and_delete() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let user = create_test_user(pool, "listener").await;
    create_test_track(pool, "t", "ar", None, None).await;
    history::append(pool, &play(&user, "t", 0, None)).await.unwrap();

    let update = sqlx::query("UPDATE play_history SET track_id = 't'")
        .execute(pool)
        .await;
    assert!(update.is_err());

    let delete = sqlx::query("DELETE FROM play_history").execute(pool).await;
    assert!(delete.is_err());

    assert_eq!(history::recent(pool, &user, 10).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_track_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let user = create_test_user(pool, "listener").await;

    assert!(history::append(pool, &play(&user, "ghost", 0, None)).await.is_err());
}

#[tokio::test]
async fn test_database_implements_history_log() {
    let test_db = TestDb::new().await;
    let db = Database::from_pool(test_db.pool.clone());
    let user = create_test_user(db.pool(), "listener").await;
    create_test_track(db.pool(), "t", "ar", None, None).await;

    db.append(play(&user, "t", 0, None)).await.unwrap();
    let recent = db.recent(&user, 5).await.unwrap();

    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].user_id, user);
}
