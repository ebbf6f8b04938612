//! Core persistence logic for employee performance reviews.
//! This crate is the single source of truth for the review CRUD contract.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::review::{Review, ReviewId};
pub use repo::review_repo::{
    RepoError, RepoResult, ReviewHandle, ReviewRepository, SqliteReviewStore,
};
pub use service::review_service::ReviewService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
