//! Review use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for core callers.
//! - Delegate persistence to a `ReviewRepository` implementation.

use crate::model::review::ReviewId;
use crate::repo::review_repo::{RepoResult, ReviewHandle, ReviewRepository};

/// Use-case service wrapper for review CRUD operations.
pub struct ReviewService<R: ReviewRepository> {
    repo: R,
}

impl<R: ReviewRepository> ReviewService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates and persists a review, returning its shared handle.
    pub fn create(&mut self, year: i32, summary: &str, employee_id: i64) -> RepoResult<ReviewHandle> {
        self.repo.create(year, summary, employee_id)
    }

    /// Inserts or updates a review through repository persistence.
    pub fn save(&mut self, review: &ReviewHandle) -> RepoResult<()> {
        self.repo.save(review)
    }

    /// Gets one review by id, or `None` when no row exists.
    pub fn find_by_id(&mut self, id: ReviewId) -> RepoResult<Option<ReviewHandle>> {
        self.repo.find_by_id(id)
    }

    /// Re-saves an already-persisted review.
    pub fn update(&mut self, review: &ReviewHandle) -> RepoResult<()> {
        self.repo.update(review)
    }

    /// Deletes a review and detaches the in-memory instance.
    pub fn delete(&mut self, review: &ReviewHandle) -> RepoResult<()> {
        self.repo.delete(review)
    }

    /// Lists every persisted review.
    pub fn get_all(&mut self) -> RepoResult<Vec<ReviewHandle>> {
        self.repo.get_all()
    }
}
