//! Review domain model.
//!
//! # Responsibility
//! - Define the performance-review record shared by persistence and callers.
//! - Provide lifecycle helpers for the persisted/detached distinction.
//!
//! # Invariants
//! - `id` is assigned by storage on first insert and never chosen by callers.
//! - Detaching clears `id` only; the remaining fields stay intact so the
//!   instance can be re-saved as a fresh row.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-assigned primary key of a persisted review row.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ReviewId = i64;

/// One employee performance review.
///
/// The referenced employee lives in an external table and is carried here
/// as an opaque numeric id; this crate never dereferences it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Primary key, `None` until the first successful insert.
    pub id: Option<ReviewId>,
    /// Calendar year the review covers.
    pub year: i32,
    /// Free-form review text.
    pub summary: String,
    /// Foreign reference to `employees.id`.
    pub employee_id: i64,
}

impl Review {
    /// Creates a not-yet-persisted review.
    pub fn new(year: i32, summary: impl Into<String>, employee_id: i64) -> Self {
        Self {
            id: None,
            year,
            summary: summary.into(),
            employee_id,
        }
    }

    /// Creates a review hydrated from an existing row.
    ///
    /// Used by the repository read path, where identity already exists in
    /// storage.
    pub fn with_id(id: ReviewId, year: i32, summary: impl Into<String>, employee_id: i64) -> Self {
        Self {
            id: Some(id),
            year,
            summary: summary.into(),
            employee_id,
        }
    }

    /// Returns whether this review maps to a row in storage.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Clears the primary key, turning this into a fresh unpersisted
    /// instance in place. Field values other than `id` are untouched.
    pub fn detach(&mut self) {
        self.id = None;
    }
}

impl Display for Review {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(
                f,
                "Review {id}: year {}, employee {}, {:?}",
                self.year, self.employee_id, self.summary
            ),
            None => write!(
                f,
                "Review (unsaved): year {}, employee {}, {:?}",
                self.year, self.employee_id, self.summary
            ),
        }
    }
}
