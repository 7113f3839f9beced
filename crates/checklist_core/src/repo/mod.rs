//! Item store contract and persistence backends.
//!
//! # Responsibility
//! - Define the single storage capability the lifecycle service consumes.
//! - Provide interchangeable SQLite and in-memory implementations.
//!
//! # Invariants
//! - Writes must enforce `NewItem::validate()` before persistence.
//! - Missing ids are reported as `MutationOutcome::NotFound`, not errors.

pub mod item_repo;
pub mod memory_repo;
