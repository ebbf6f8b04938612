//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `revtrack_core` wiring.
//! - Keep output deterministic for quick local sanity checks.

use revtrack_core::db::open_db_in_memory;
use revtrack_core::{ReviewRepository, SqliteReviewStore};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("revtrack_core version={}", revtrack_core::core_version());

    // One in-memory CRUD round trip against the migrated schema.
    let conn = open_db_in_memory()?;
    conn.execute("INSERT INTO employees (id, name) VALUES (5, 'Ada');", [])?;

    let mut store = SqliteReviewStore::new(&conn);
    let handle = store.create(2023, "Exceeds expectations", 5)?;
    println!("created {}", handle.borrow());

    let id = handle
        .borrow()
        .id
        .ok_or("created review is missing its id")?;
    match store.find_by_id(id)? {
        Some(found) => println!("fetched {}", found.borrow()),
        None => return Err("created review not found by id".into()),
    }

    println!("total reviews={}", store.get_all()?.len());
    Ok(())
}
