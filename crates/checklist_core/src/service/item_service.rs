//! Item lifecycle service.
//!
//! # Responsibility
//! - Create items, mark them done and delete them through an injected store.
//! - Run the refresh cycle: list-all, filter/sort, annotate.
//!
//! # Invariants
//! - Created items always start as `ItemState::NotDone`.
//! - Validation runs before the store is touched.
//! - Missing ids are a no-op outcome, never an error.
//! - Store failures are propagated, never reported as success.

use crate::model::item::{Item, ItemId, ItemState, ItemValidationError, NewItem};
use crate::query::{annotate, subjects, view, ItemCard, ItemViewQuery};
use crate::repo::item_repo::{ItemStore, MutationOutcome, RepoError};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for lifecycle use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Input rejected before reaching the store.
    Validation(ItemValidationError),
    /// Store could not be reached or returned unusable data.
    StoreUnavailable(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::StoreUnavailable(err) => write!(f, "item store unavailable: {err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent item state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::StoreUnavailable(err) => Some(err),
            Self::InconsistentState(_) => None,
        }
    }
}

impl From<ItemValidationError> for ServiceError {
    fn from(value: ItemValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::StoreUnavailable(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Render-ready snapshot produced by one refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistView {
    /// Filtered, optionally sorted, annotated items.
    pub cards: Vec<ItemCard>,
    /// Distinct subjects across all items, for filter choices.
    pub subjects: Vec<String>,
    /// Item count before filtering.
    pub total: usize,
}

/// Lifecycle facade over an injected item store.
pub struct ChecklistService<S: ItemStore> {
    store: S,
}

impl<S: ItemStore> ChecklistService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates an item in state `NotDone` and returns the stored record.
    ///
    /// # Errors
    /// - `Validation` when the title is blank; the store is not called.
    /// - `StoreUnavailable` when the insert or read-back fails.
    pub fn create(&self, draft: &NewItem) -> ServiceResult<Item> {
        if let Err(err) = draft.validate() {
            warn!("event=item_create module=service status=rejected reason={err}");
            return Err(err.into());
        }

        let id = self.store.insert(draft, ItemState::NotDone)?;
        let created = self
            .store
            .list_all()?
            .into_iter()
            .find(|item| item.id == id)
            .ok_or(ServiceError::InconsistentState(
                "created item not found in read-back",
            ))?;

        info!("event=item_create module=service status=ok item_id={id}");
        Ok(created)
    }

    /// Transitions an item to `Done`.
    ///
    /// Already-done items stay `Done` and report `Applied`.
    pub fn mark_done(&self, id: ItemId) -> ServiceResult<MutationOutcome> {
        let outcome = self.store.update_state(id, ItemState::Done)?;
        log_mutation("item_mark_done", id, outcome);
        Ok(outcome)
    }

    /// Deletes an item permanently.
    pub fn delete(&self, id: ItemId) -> ServiceResult<MutationOutcome> {
        let outcome = self.store.delete(id)?;
        log_mutation("item_delete", id, outcome);
        Ok(outcome)
    }

    /// Returns every stored item in store order.
    pub fn list_all(&self) -> ServiceResult<Vec<Item>> {
        Ok(self.store.list_all()?)
    }

    /// Reads the store afresh and builds the render-ready view at `now`.
    pub fn refresh(
        &self,
        query: &ItemViewQuery,
        now: DateTime<Utc>,
    ) -> ServiceResult<ChecklistView> {
        let items = self.store.list_all()?;
        let total = items.len();
        let subjects = subjects(&items);
        let cards = annotate(view(items, query), now);

        info!(
            "event=item_refresh module=service status=ok total={} visible={} sorted={}",
            total,
            cards.len(),
            query.sort_by_deadline
        );
        Ok(ChecklistView {
            cards,
            subjects,
            total,
        })
    }
}

fn log_mutation(event: &str, id: ItemId, outcome: MutationOutcome) {
    match outcome {
        MutationOutcome::Applied => {
            info!("event={event} module=service status=ok item_id={id}");
        }
        MutationOutcome::NotFound => {
            info!("event={event} module=service status=noop reason=not_found item_id={id}");
        }
    }
}
