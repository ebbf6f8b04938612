use revtrack_core::db::open_db_in_memory;
use revtrack_core::{
    RepoError, Review, ReviewRepository, ReviewService, SqliteReviewStore,
};
use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

fn seed_employee(conn: &Connection, id: i64, name: &str) {
    conn.execute(
        "INSERT INTO employees (id, name) VALUES (?1, ?2);",
        rusqlite::params![id, name],
    )
    .unwrap();
}

#[test]
fn create_and_find_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    seed_employee(&conn, 5, "Ada");
    let mut store = SqliteReviewStore::new(&conn);

    let created = store.create(2023, "Exceeds expectations", 5).unwrap();
    let id = created.borrow().id.expect("create should assign an id");

    let found = store.find_by_id(id).unwrap().unwrap();
    let review = found.borrow();
    assert_eq!(review.id, Some(id));
    assert_eq!(review.year, 2023);
    assert_eq!(review.summary, "Exceeds expectations");
    assert_eq!(review.employee_id, 5);
}

#[test]
fn save_assigns_sequential_storage_ids() {
    let conn = open_db_in_memory().unwrap();
    seed_employee(&conn, 1, "Ada");
    let mut store = SqliteReviewStore::new(&conn);

    let first = Rc::new(RefCell::new(Review::new(2021, "first", 1)));
    let second = Rc::new(RefCell::new(Review::new(2022, "second", 1)));
    store.save(&first).unwrap();
    store.save(&second).unwrap();

    let first_id = first.borrow().id.unwrap();
    let second_id = second.borrow().id.unwrap();
    assert!(first.borrow().is_persisted());
    assert!(second_id > first_id);
}

#[test]
fn save_on_persisted_instance_updates_in_place() {
    let conn = open_db_in_memory().unwrap();
    seed_employee(&conn, 2, "Grace");
    seed_employee(&conn, 3, "Linus");
    let mut store = SqliteReviewStore::new(&conn);

    let handle = store.create(2020, "Meets expectations", 2).unwrap();
    let id = handle.borrow().id.unwrap();

    {
        let mut review = handle.borrow_mut();
        review.year = 2021;
        review.summary = "Exceeds expectations".to_string();
        review.employee_id = 3;
    }
    store.save(&handle).unwrap();

    // Update, not append: still exactly one row, with the new values.
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM reviews;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);

    let fetched = store.find_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.borrow().year, 2021);
    assert_eq!(fetched.borrow().summary, "Exceeds expectations");
    assert_eq!(fetched.borrow().employee_id, 3);
}

#[test]
fn update_is_equivalent_to_save() {
    let conn = open_db_in_memory().unwrap();
    seed_employee(&conn, 4, "Barbara");
    let mut store = SqliteReviewStore::new(&conn);

    let handle = store.create(2019, "draft", 4).unwrap();
    handle.borrow_mut().summary = "final".to_string();
    store.update(&handle).unwrap();

    let stored: String = conn
        .query_row(
            "SELECT summary FROM reviews WHERE id = ?1;",
            [handle.borrow().id.unwrap()],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(stored, "final");
}

#[test]
fn delete_removes_row_and_detaches_instance() {
    let conn = open_db_in_memory().unwrap();
    seed_employee(&conn, 5, "Ada");
    let mut store = SqliteReviewStore::new(&conn);

    let handle = store.create(2023, "to be removed", 5).unwrap();
    let id = handle.borrow().id.unwrap();

    store.delete(&handle).unwrap();
    assert_eq!(handle.borrow().id, None);
    assert!(store.find_by_id(id).unwrap().is_none());

    // Repeated delete of a detached instance is a no-op.
    store.delete(&handle).unwrap();
}

#[test]
fn detached_instance_can_be_resaved_with_fresh_id() {
    let conn = open_db_in_memory().unwrap();
    seed_employee(&conn, 5, "Ada");
    let mut store = SqliteReviewStore::new(&conn);

    let handle = store.create(2023, "kept fields", 5).unwrap();
    let old_id = handle.borrow().id.unwrap();
    store.delete(&handle).unwrap();

    // The detached instance keeps its fields and behaves like a fresh one.
    assert_eq!(handle.borrow().summary, "kept fields");
    store.save(&handle).unwrap();

    let new_id = handle.borrow().id.unwrap();
    assert_ne!(new_id, old_id);
    assert!(store.find_by_id(new_id).unwrap().is_some());
}

#[test]
fn get_all_tracks_creations_minus_deletions() {
    let conn = open_db_in_memory().unwrap();
    seed_employee(&conn, 1, "Ada");
    let mut store = SqliteReviewStore::new(&conn);

    let a = store.create(2021, "a", 1).unwrap();
    store.create(2022, "b", 1).unwrap();
    store.create(2023, "c", 1).unwrap();
    assert_eq!(store.get_all().unwrap().len(), 3);

    store.delete(&a).unwrap();
    let remaining = store.get_all().unwrap();
    assert_eq!(remaining.len(), 2);

    let summaries: Vec<String> = remaining
        .iter()
        .map(|handle| handle.borrow().summary.clone())
        .collect();
    assert_eq!(summaries, vec!["b".to_string(), "c".to_string()]);
}

#[test]
fn update_matching_no_row_is_silent() {
    let conn = open_db_in_memory().unwrap();
    seed_employee(&conn, 1, "Ada");
    let mut store = SqliteReviewStore::new(&conn);

    let handle = store.create(2020, "orphaned", 1).unwrap();
    let id = handle.borrow().id.unwrap();
    conn.execute("DELETE FROM reviews WHERE id = ?1;", [id])
        .unwrap();

    // Row is gone behind the store's back; the UPDATE path stays silent.
    store.save(&handle).unwrap();
}

#[test]
fn unknown_employee_surfaces_constraint_violation() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteReviewStore::new(&conn);

    let err = store.create(2023, "no such employee", 999).unwrap_err();
    assert!(matches!(err, RepoError::Constraint(_)));
}

#[test]
fn operations_on_dropped_table_surface_storage_error() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteReviewStore::new(&conn);

    store.drop_table().unwrap();
    let err = store.find_by_id(1).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}

#[test]
fn service_delegates_to_repository() {
    let conn = open_db_in_memory().unwrap();
    seed_employee(&conn, 5, "Ada");
    let store = SqliteReviewStore::new(&conn);
    let mut service = ReviewService::new(store);

    let handle = service.create(2023, "from service", 5).unwrap();
    let id = handle.borrow().id.unwrap();

    let fetched = service.find_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.borrow().summary, "from service");
    assert_eq!(service.get_all().unwrap().len(), 1);

    service.delete(&handle).unwrap();
    assert!(service.find_by_id(id).unwrap().is_none());
}
