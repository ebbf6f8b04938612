//! Review store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `reviews` table.
//! - Own the identity map so each persisted row has at most one in-memory
//!   instance per store.
//!
//! # Invariants
//! - Re-fetching a cached id refreshes and returns the existing handle
//!   instead of constructing a duplicate.
//! - Deleting a review evicts its map entry and detaches the instance; the
//!   handle itself stays usable as a fresh unpersisted review.
//! - Updates are last-writer-wins; an UPDATE matching zero rows is silent.

use crate::db::DbError;
use crate::model::review::{Review, ReviewId};
use rusqlite::{params, Connection, Row};
use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

const REVIEW_SELECT_SQL: &str = "SELECT
    id,
    year,
    summary,
    employee_id
FROM reviews";

/// Shared mutable handle to a review.
///
/// The identity map hands out clones of one `Rc` per row id, so two
/// fetches of the same id observe the same instance (`Rc::ptr_eq`).
pub type ReviewHandle = Rc<RefCell<Review>>;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for review persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Storage transport failure (connection, I/O, missing table).
    Db(DbError),
    /// Constraint violation surfaced by SQLite (foreign key, NOT NULL).
    Constraint(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Constraint(message) => write!(f, "constraint violation: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Constraint(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(code, message)
                if code.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Self::Constraint(message.unwrap_or_else(|| code.to_string()))
            }
            other => Self::Db(DbError::Sqlite(other)),
        }
    }
}

/// Repository interface for review CRUD operations.
pub trait ReviewRepository {
    /// Creates the `reviews` table. Idempotent.
    fn create_table(&self) -> RepoResult<()>;
    /// Drops the `reviews` table. Idempotent.
    fn drop_table(&self) -> RepoResult<()>;
    /// Inserts an unpersisted review (assigning its id and registering it
    /// in the identity map) or updates the row of a persisted one.
    fn save(&mut self, review: &ReviewHandle) -> RepoResult<()>;
    /// Constructs a review, saves it, and returns its shared handle.
    fn create(&mut self, year: i32, summary: &str, employee_id: i64) -> RepoResult<ReviewHandle>;
    /// Fetches one review by id, reconciled through the identity map.
    fn find_by_id(&mut self, id: ReviewId) -> RepoResult<Option<ReviewHandle>>;
    /// Re-saves an already-persisted review. Alias for `save`.
    fn update(&mut self, review: &ReviewHandle) -> RepoResult<()>;
    /// Deletes a persisted review's row, evicts its map entry, and detaches
    /// the instance. No-op for an unpersisted review.
    fn delete(&mut self, review: &ReviewHandle) -> RepoResult<()>;
    /// Fetches every row in natural order, each reconciled through the
    /// identity map.
    fn get_all(&mut self) -> RepoResult<Vec<ReviewHandle>>;
}

/// SQLite-backed review store with a store-owned identity map.
pub struct SqliteReviewStore<'conn> {
    conn: &'conn Connection,
    identity_map: HashMap<ReviewId, ReviewHandle>,
}

impl<'conn> SqliteReviewStore<'conn> {
    /// Creates a store over the provided connection with an empty identity
    /// map. The map's lifetime is tied to this store instance.
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            identity_map: HashMap::new(),
        }
    }

    /// Returns how many instances the identity map currently holds.
    pub fn cached_count(&self) -> usize {
        self.identity_map.len()
    }

    /// Folds a fetched row into the identity map: a cached instance is
    /// refreshed in place and returned, an unknown id gets a new cached
    /// instance.
    fn reconcile(&mut self, row: ReviewRow) -> ReviewHandle {
        match self.identity_map.entry(row.id) {
            Entry::Occupied(entry) => {
                let handle = Rc::clone(entry.get());
                {
                    let mut cached = handle.borrow_mut();
                    cached.id = Some(row.id);
                    cached.year = row.year;
                    cached.summary = row.summary;
                    cached.employee_id = row.employee_id;
                }
                handle
            }
            Entry::Vacant(entry) => {
                let handle = Rc::new(RefCell::new(Review::with_id(
                    row.id,
                    row.year,
                    row.summary,
                    row.employee_id,
                )));
                entry.insert(Rc::clone(&handle));
                handle
            }
        }
    }

    fn insert(&mut self, review: &ReviewHandle) -> RepoResult<()> {
        let snapshot = review.borrow().clone();
        self.conn.execute(
            "INSERT INTO reviews (year, summary, employee_id)
             VALUES (?1, ?2, ?3);",
            params![snapshot.year, snapshot.summary, snapshot.employee_id],
        )?;

        let id = self.conn.last_insert_rowid();
        review.borrow_mut().id = Some(id);
        self.identity_map.insert(id, Rc::clone(review));
        Ok(())
    }

    fn update_row(&self, id: ReviewId, review: &ReviewHandle) -> RepoResult<()> {
        let snapshot = review.borrow().clone();
        // Last writer wins; zero affected rows is not an error.
        self.conn.execute(
            "UPDATE reviews
             SET
                year = ?1,
                summary = ?2,
                employee_id = ?3
             WHERE id = ?4;",
            params![snapshot.year, snapshot.summary, snapshot.employee_id, id],
        )?;
        Ok(())
    }
}

impl ReviewRepository for SqliteReviewStore<'_> {
    fn create_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY,
                year INTEGER,
                summary TEXT,
                employee_id INTEGER,
                FOREIGN KEY (employee_id) REFERENCES employees (id)
            );",
        )?;
        Ok(())
    }

    fn drop_table(&self) -> RepoResult<()> {
        self.conn.execute_batch("DROP TABLE IF EXISTS reviews;")?;
        Ok(())
    }

    fn save(&mut self, review: &ReviewHandle) -> RepoResult<()> {
        let persisted_id = review.borrow().id;
        match persisted_id {
            None => self.insert(review),
            Some(id) => self.update_row(id, review),
        }
    }

    fn create(&mut self, year: i32, summary: &str, employee_id: i64) -> RepoResult<ReviewHandle> {
        let handle = Rc::new(RefCell::new(Review::new(year, summary, employee_id)));
        self.save(&handle)?;
        Ok(handle)
    }

    fn find_by_id(&mut self, id: ReviewId) -> RepoResult<Option<ReviewHandle>> {
        let conn = self.conn;
        let mut stmt = conn.prepare(&format!("{REVIEW_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;

        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        let parsed = parse_review_row(row)?;
        Ok(Some(self.reconcile(parsed)))
    }

    fn update(&mut self, review: &ReviewHandle) -> RepoResult<()> {
        self.save(review)
    }

    fn delete(&mut self, review: &ReviewHandle) -> RepoResult<()> {
        let persisted_id = review.borrow().id;
        let Some(id) = persisted_id else {
            return Ok(());
        };

        self.conn
            .execute("DELETE FROM reviews WHERE id = ?1;", [id])?;
        self.identity_map.remove(&id);
        review.borrow_mut().detach();
        Ok(())
    }

    fn get_all(&mut self) -> RepoResult<Vec<ReviewHandle>> {
        let conn = self.conn;
        let mut stmt = conn.prepare(&format!("{REVIEW_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;

        let mut parsed = Vec::new();
        while let Some(row) = rows.next()? {
            parsed.push(parse_review_row(row)?);
        }

        Ok(parsed
            .into_iter()
            .map(|row| self.reconcile(row))
            .collect())
    }
}

/// Named-column read model for one `reviews` row.
struct ReviewRow {
    id: ReviewId,
    year: i32,
    summary: String,
    employee_id: i64,
}

fn parse_review_row(row: &Row<'_>) -> RepoResult<ReviewRow> {
    Ok(ReviewRow {
        id: row.get("id")?,
        year: row.get("year")?,
        summary: row.get("summary")?,
        employee_id: row.get("employee_id")?,
    })
}
