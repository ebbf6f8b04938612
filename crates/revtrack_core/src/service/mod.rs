//! Use-case service layer.
//!
//! # Responsibility
//! - Provide stable entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass the repository contract.
//! - The service layer remains storage-agnostic.

pub mod review_service;
