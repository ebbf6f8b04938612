//! Domain model for the review store.
//!
//! # Responsibility
//! - Define the canonical review record persisted by the repository layer.
//!
//! # Invariants
//! - A `None` id always means "not persisted"; a `Some` id maps to exactly
//!   one row in the `reviews` table.

pub mod review;
