use taskboard_core::{KvStore, RepoError, SqliteKvStore};

#[test]
fn sqlite_store_upserts_and_reads_back() {
    let mut store = SqliteKvStore::open_in_memory().unwrap();
    assert_eq!(store.get("projects").unwrap(), None);

    store.set("projects", "first").unwrap();
    store.set("projects", "second").unwrap();
    assert_eq!(store.get("projects").unwrap().as_deref(), Some("second"));

    let rows: i64 = store
        .connection()
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn sqlite_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kv.db");

    let mut store = SqliteKvStore::open(&path).unwrap();
    store.set("projects", r#"{"projects":[]}"#).unwrap();
    drop(store);

    let reopened = SqliteKvStore::open(&path).unwrap();
    assert_eq!(
        reopened.get("projects").unwrap().as_deref(),
        Some(r#"{"projects":[]}"#)
    );
}

#[test]
fn blank_keys_never_reach_sqlite() {
    let mut store = SqliteKvStore::open_in_memory().unwrap();

    let err = store.set("", "x").unwrap_err();
    assert!(matches!(err, RepoError::InvalidKey(_)));
    assert!(matches!(store.get(" "), Err(RepoError::InvalidKey(_))));
}
