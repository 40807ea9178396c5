//! Integration tests for shortlist replace semantics.
//!
//! This test suite validates:
//! - Replace fully supersedes the previous shortlist (last-run-wins)
//! - Replacing with an empty set clears the shortlist
//! - Rank ordering follows insertion order
//!
//! **IMPORTANT**: These tests require a fully migrated PostgreSQL database.
//! Run migrations first, then `cargo test -- --ignored`.

use shortlist_db::{Database, ShortlistRepository, DEFAULT_TEST_DATABASE_URL};
use uuid::Uuid;

/// Helper to create a test database connection.
async fn setup_test_db() -> Database {
    dotenvy::dotenv().ok();
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_TEST_DATABASE_URL.to_string());

    Database::connect(&database_url)
        .await
        .expect("Failed to connect to test database")
}

/// Insert an event plus `n` registrations, returning (event_id, reg_ids).
async fn seed_event(db: &Database, n: usize) -> (Uuid, Vec<Uuid>) {
    let event_id = Uuid::now_v7();
    sqlx::query("INSERT INTO event (id, name) VALUES ($1, $2)")
        .bind(event_id)
        .bind("test-event")
        .execute(&db.pool)
        .await
        .unwrap();

    let mut reg_ids = Vec::new();
    for i in 0..n {
        let reg_id = Uuid::now_v7();
        sqlx::query(
            "INSERT INTO registration (id, event_id, team_name, document_url)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(reg_id)
        .bind(event_id)
        .bind(format!("team-{}", i))
        .bind(format!("https://cdn.test/{}/{}.pdf", event_id, i))
        .execute(&db.pool)
        .await
        .unwrap();
        reg_ids.push(reg_id);
    }
    (event_id, reg_ids)
}

async fn cleanup(db: &Database, event_id: Uuid) {
    sqlx::query("DELETE FROM event WHERE id = $1")
        .bind(event_id)
        .execute(&db.pool)
        .await
        .unwrap();
}

#[tokio::test]
#[ignore]
async fn test_replace_supersedes_previous_shortlist() {
    let db = setup_test_db().await;
    let (event_id, regs) = seed_event(&db, 4).await;

    db.shortlists
        .replace_for_event(event_id, &[regs[0], regs[1]])
        .await
        .unwrap();

    db.shortlists
        .replace_for_event(event_id, &[regs[2], regs[3]])
        .await
        .unwrap();

    let entries = db.shortlists.list_for_event(event_id).await.unwrap();
    let persisted: Vec<Uuid> = entries.iter().map(|e| e.registration_id).collect();
    assert_eq!(persisted, vec![regs[2], regs[3]]);
    // Zero rows from the first run survive.
    assert!(!persisted.contains(&regs[0]));
    assert!(!persisted.contains(&regs[1]));

    cleanup(&db, event_id).await;
}

#[tokio::test]
#[ignore]
async fn test_replace_with_empty_set_clears_shortlist() {
    let db = setup_test_db().await;
    let (event_id, regs) = seed_event(&db, 2).await;

    db.shortlists
        .replace_for_event(event_id, &regs)
        .await
        .unwrap();
    assert_eq!(db.shortlists.list_for_event(event_id).await.unwrap().len(), 2);

    db.shortlists.replace_for_event(event_id, &[]).await.unwrap();
    assert!(db.shortlists.list_for_event(event_id).await.unwrap().is_empty());

    cleanup(&db, event_id).await;
}

#[tokio::test]
#[ignore]
async fn test_ranks_follow_insertion_order() {
    let db = setup_test_db().await;
    let (event_id, regs) = seed_event(&db, 3).await;

    // Deliberately not in seeding order: reply order must win.
    db.shortlists
        .replace_for_event(event_id, &[regs[2], regs[0], regs[1]])
        .await
        .unwrap();

    let entries = db.shortlists.list_for_event(event_id).await.unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].registration_id, regs[2]);
    assert_eq!(entries[0].rank, 0);
    assert_eq!(entries[2].registration_id, regs[1]);
    assert_eq!(entries[2].rank, 2);

    cleanup(&db, event_id).await;
}
