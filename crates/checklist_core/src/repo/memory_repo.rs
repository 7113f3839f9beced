//! In-memory item store.
//!
//! # Responsibility
//! - Offer an ephemeral backend with the same contract as SQLite.
//!
//! # Invariants
//! - Items are kept in insertion order.
//! - Not thread-safe; intended for one session on one thread.

use crate::model::item::{Item, ItemId, ItemState, NewItem};
use crate::repo::item_repo::{ItemStore, MutationOutcome, RepoResult};
use std::cell::RefCell;
use uuid::Uuid;

/// Vector-backed item store.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    items: RefCell<Vec<Item>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl ItemStore for InMemoryItemStore {
    fn insert(&self, item: &NewItem, state: ItemState) -> RepoResult<ItemId> {
        item.validate()?;

        let id = Uuid::new_v4();
        self.items
            .borrow_mut()
            .push(Item::from_new(id, item, state));
        Ok(id)
    }

    fn list_all(&self) -> RepoResult<Vec<Item>> {
        Ok(self.items.borrow().clone())
    }

    fn update_state(&self, id: ItemId, state: ItemState) -> RepoResult<MutationOutcome> {
        let mut items = self.items.borrow_mut();
        match items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.state = state;
                Ok(MutationOutcome::Applied)
            }
            None => Ok(MutationOutcome::NotFound),
        }
    }

    fn delete(&self, id: ItemId) -> RepoResult<MutationOutcome> {
        let mut items = self.items.borrow_mut();
        let before = items.len();
        items.retain(|item| item.id != id);
        Ok(MutationOutcome::from_rows_affected(before - items.len()))
    }
}
