//! Storage-independent item view computation.
//!
//! # Responsibility
//! - Filter item snapshots by exact subject.
//! - Stable-sort snapshots by deadline.
//! - Annotate snapshots with countdown strings for rendering.
//!
//! # Invariants
//! - Filtering runs before sorting.
//! - Equal deadlines keep their input order.
//! - Functions are pure; inputs are transient snapshots, never store state.

use crate::deadline::Countdown;
use crate::model::item::Item;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

/// Sentinel the presentation layer uses to mean "no subject filter".
pub const ALL_SUBJECTS: &str = "All";

/// Subject filter selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubjectFilter {
    #[default]
    All,
    /// Case-sensitive exact match, no normalization.
    Exact(String),
}

impl SubjectFilter {
    /// Maps raw presentation input to a filter.
    ///
    /// `None`, empty text and the `"All"` sentinel select every subject.
    pub fn from_input(input: Option<&str>) -> Self {
        match input {
            None => Self::All,
            Some(value) if value.is_empty() || value == ALL_SUBJECTS => Self::All,
            Some(value) => Self::Exact(value.to_string()),
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        match self {
            Self::All => true,
            Self::Exact(subject) => item.subject == *subject,
        }
    }
}

/// View options supplied by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemViewQuery {
    pub subject: SubjectFilter,
    pub sort_by_deadline: bool,
}

/// Item paired with its countdown for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemCard {
    #[serde(flatten)]
    pub item: Item,
    pub countdown: String,
    pub expired: bool,
}

/// Applies subject filtering then optional stable deadline sorting.
pub fn view(items: Vec<Item>, query: &ItemViewQuery) -> Vec<Item> {
    let mut visible = items
        .into_iter()
        .filter(|item| query.subject.matches(item))
        .collect::<Vec<_>>();

    if query.sort_by_deadline {
        // `sort_by_key` is stable, so ties keep fetch order.
        visible.sort_by_key(|item| item.deadline);
    }

    visible
}

/// Returns distinct subjects in first-appearance order.
pub fn subjects(items: &[Item]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert(item.subject.as_str()))
        .map(|item| item.subject.clone())
        .collect()
}

/// Pairs every item with its countdown at `now`.
pub fn annotate(items: Vec<Item>, now: DateTime<Utc>) -> Vec<ItemCard> {
    items
        .into_iter()
        .map(|item| {
            let countdown = Countdown::between(item.deadline, now);
            ItemCard {
                item,
                countdown: countdown.to_string(),
                expired: countdown.is_expired(),
            }
        })
        .collect()
}
