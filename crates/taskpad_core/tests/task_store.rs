use taskpad_core::db::open_db_in_memory;
use taskpad_core::{SqliteTaskStore, StoreError, Task, TaskStore};

#[test]
fn insert_assigns_ascending_ids_in_creation_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::new(&conn);

    let id_a = store.insert(&Task::new("A", None)).unwrap();
    let id_b = store.insert(&Task::new("B", None)).unwrap();
    let id_c = store.insert(&Task::new("C", None)).unwrap();
    assert!(id_a < id_b && id_b < id_c);

    let titles: Vec<String> = store
        .list_all()
        .unwrap()
        .into_iter()
        .map(|task| task.title)
        .collect();
    assert_eq!(titles, vec!["A", "B", "C"]);
}

#[test]
fn insert_roundtrip_preserves_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::new(&conn);

    let task = Task::new("groceries", Some("milk, eggs".to_string()));
    let id = store.insert(&task).unwrap();

    let rows = store.list_all().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, Some(id));
    assert_eq!(rows[0].title, task.title);
    assert_eq!(rows[0].description, task.description);
    assert_eq!(rows[0].is_done, task.is_done);
}

#[test]
fn insert_with_existing_id_replaces_the_row() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::new(&conn);

    let id = store.insert(&Task::new("draft", None)).unwrap();

    let mut replacement = Task::new("final", Some("rewritten".to_string()));
    replacement.id = Some(id);
    let returned = store.insert(&replacement).unwrap();
    assert_eq!(returned, id);

    let rows = store.list_all().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "final");
    assert_eq!(rows[0].description.as_deref(), Some("rewritten"));
}

#[test]
fn duplicate_titles_persist_as_distinct_rows() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::new(&conn);

    let first = store.insert(&Task::new("same", None)).unwrap();
    let second = store.insert(&Task::new("same", None)).unwrap();

    assert_ne!(first, second);
    assert_eq!(store.list_all().unwrap().len(), 2);
}

#[test]
fn update_replaces_the_full_record() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::new(&conn);

    let id = store
        .insert(&Task::new("call bank", Some("before noon".to_string())))
        .unwrap();

    let mut edited = Task::new("call bank", None);
    edited.id = Some(id);
    edited.is_done = true;
    store.update(&edited).unwrap();

    let rows = store.list_all().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, None);
    assert!(rows[0].is_done);
}

#[test]
fn update_missing_row_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::new(&conn);

    let mut ghost = Task::new("ghost", None);
    ghost.id = Some(41);
    let err = store.update(&ghost).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(41)));
}

#[test]
fn update_unsaved_record_returns_missing_id() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::new(&conn);

    let err = store.update(&Task::new("unsaved", None)).unwrap_err();
    assert!(matches!(err, StoreError::MissingId));
}

#[test]
fn status_queries_track_the_completion_flag() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::new(&conn);

    let task = Task::new("toggle me", None);
    let id = store.insert(&task).unwrap();
    store.insert(&Task::new("stays open", None)).unwrap();

    let mut done = task.with_done(true);
    done.id = Some(id);
    store.update(&done).unwrap();

    let complete = store.list_by_status(true).unwrap();
    assert_eq!(complete.len(), 1);
    assert_eq!(complete[0].id, Some(id));

    let incomplete = store.list_by_status(false).unwrap();
    assert!(incomplete.iter().all(|row| row.id != Some(id)));
}

#[test]
fn delete_removes_from_every_query_and_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::new(&conn);

    let id = store.insert(&Task::new("short lived", None)).unwrap();
    store.delete(id).unwrap();

    assert!(store.list_all().unwrap().is_empty());
    assert!(store.list_by_status(false).unwrap().is_empty());
    assert!(store.list_by_status(true).unwrap().is_empty());

    // Second delete of the same id is a no-op, not an error.
    store.delete(id).unwrap();
}
