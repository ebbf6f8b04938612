//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the review store contract and its SQLite implementation.
//! - Isolate SQL details from service/business orchestration.
//!
//! # Invariants
//! - The identity map is owned by the store instance, never process-global.
//! - Absent rows are reported as `Ok(None)`, not as errors.

pub mod review_repo;
