
use portal_core::{AccountStore, NewAccount, StoreError};
use portal_storage::SqliteAccountStore;
use std::sync::Arc;
use test_helpers::TestDb;

fn alice() -> NewAccount {
    NewAccount::new("Alice", "alice@example.com", "QWxpY2VTZWNyZXQ=")
}

#[tokio::test]
async fn test_create_and_find_by_email() {
    let db = TestDb::new().await;

    let created = db.store.create_account(alice()).await.unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.name, "Alice");
    assert_eq!(created.credential, "QWxpY2VTZWNyZXQ=");

    let found = db
        .store
        .find_by_email("alice@example.com")
        .await
        .unwrap()
        .expect("account should exist");
    assert_eq!(found, created);
}

#[tokio::test]
async fn test_find_missing_email_returns_none() {
    let db = TestDb::new().await;

    let found = db.store.find_by_email("nobody@example.com").await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_email_lookup_is_case_sensitive() {
    let db = TestDb::new().await;
    db.store.create_account(alice()).await.unwrap();

    let found = db.store.find_by_email("Alice@Example.com").await.unwrap();
    assert!(found.is_none());

    // Different case is a different key
    let other = db
        .store
        .create_account(NewAccount::new("Alice 2", "Alice@Example.com", "x"))
        .await;
    assert!(other.is_ok());
}

#[tokio::test]
async fn test_duplicate_email_is_rejected_and_original_unchanged() {
    let db = TestDb::new().await;
    let original = db.store.create_account(alice()).await.unwrap();

    let err = db
        .store
        .create_account(NewAccount::new("Bob", "alice@example.com", "Ym9i"))
        .await
        .unwrap_err();
    assert!(
        matches!(err, StoreError::DuplicateKey { ref email } if email == "alice@example.com"),
        "unexpected error: {err:?}"
    );

    let stored = db
        .store
        .find_by_email("alice@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, original);
}

#[tokio::test]
async fn test_ids_strictly_increase_and_are_not_reused_after_conflict() {
    let db = TestDb::new().await;

    let first = db.store.create_account(alice()).await.unwrap();
    let _ = db.store.create_account(alice()).await.unwrap_err();
    let second = db
        .store
        .create_account(NewAccount::new("Bob", "bob@example.com", "Ym9i"))
        .await
        .unwrap();
    let third = db
        .store
        .create_account(NewAccount::new("Carol", "carol@example.com", "Y2Fyb2w="))
        .await
        .unwrap();

    assert!(first.id < second.id);
    assert!(second.id < third.id);
}

#[tokio::test]
async fn test_list_accounts_in_insertion_order_without_credentials() {
    let db = TestDb::new().await;

    // Insert in non-alphabetical order to prove ordering is by id
    for (name, email) in [
        ("Zed", "zed@example.com"),
        ("Alice", "alice@example.com"),
        ("Mallory", "mallory@example.com"),
    ] {
        db.store
            .create_account(NewAccount::new(name, email, "c2VjcmV0"))
            .await
            .unwrap();
    }

    let accounts = db.store.list_accounts().await.unwrap();
    let names: Vec<&str> = accounts.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Zed", "Alice", "Mallory"]);
    assert!(accounts.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn test_created_at_is_set_on_insert() {
    let db = TestDb::new().await;
    let before = chrono::Utc::now().timestamp();

    let created = db.store.create_account(alice()).await.unwrap();

    assert!(created.created_at.timestamp() >= before);
    let found = db
        .store
        .find_by_email("alice@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.created_at, created.created_at);
}

#[tokio::test]
async fn test_reopen_is_idempotent_and_keeps_data() {
    let db = TestDb::new().await;
    db.store.create_account(alice()).await.unwrap();

    // Opening the same file again re-runs schema setup
    let reopened = SqliteAccountStore::open(&db.url).await.unwrap();
    let found = reopened.find_by_email("alice@example.com").await.unwrap();
    assert!(found.is_some());
}

#[tokio::test]
async fn test_concurrent_duplicate_inserts_yield_single_account() {
    let db = TestDb::new().await;
    let store = Arc::new(db.store.clone());

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .create_account(NewAccount::new(
                    format!("Racer {i}"),
                    "race@example.com",
                    "cmFjZQ==",
                ))
                .await
        }));
    }

    let mut created = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(StoreError::DuplicateKey { .. }) => duplicates += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(duplicates, 7);
    assert_eq!(db.store.list_accounts().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_open_creates_missing_parent_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("data").join("nested").join("users.db");
    let url = format!("sqlite://{}", db_path.display());

    let store = SqliteAccountStore::open(&url).await.unwrap();
    store.create_account(alice()).await.unwrap();

    assert!(db_path.exists());
}
