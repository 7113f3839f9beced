//! Core domain logic for the checklist tracker.
//! This crate is the single source of truth for item invariants.

pub mod db;
pub mod deadline;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use deadline::{remaining_time, Countdown, EXPIRED_LABEL};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::item::{
    normalize_deadline, parse_deadline, Item, ItemId, ItemState, ItemValidationError, NewItem,
};
pub use query::{
    annotate, subjects, view, ItemCard, ItemViewQuery, SubjectFilter, ALL_SUBJECTS,
};
pub use repo::item_repo::{ItemStore, MutationOutcome, RepoError, RepoResult, SqliteItemStore};
pub use repo::memory_repo::InMemoryItemStore;
pub use service::item_service::{ChecklistService, ChecklistView, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
