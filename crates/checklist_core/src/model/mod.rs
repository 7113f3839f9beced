//! Checklist domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep creation drafts separate from persisted items.
//!
//! # Invariants
//! - Every persisted item is identified by a store-assigned `ItemId`.
//! - Deletion is permanent; there is no tombstone state.

pub mod item;
