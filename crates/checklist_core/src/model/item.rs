//! Item domain model.
//!
//! # Responsibility
//! - Define the checklist item record and its two-value completion state.
//! - Validate creation drafts before they reach any store.
//! - Normalize user-supplied deadlines to UTC.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused for another item.
//! - `title` is non-empty after trimming.
//! - `deadline` is always a well-formed UTC instant at millisecond precision.
//! - `state` only moves `NotDone -> Done`.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a checklist item.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ItemId = Uuid;

/// Sub-second digits kept on deadlines; matches SQLite epoch-millisecond storage.
const DEADLINE_SUBSEC_DIGITS: u16 = 3;

/// Naive deadline layouts accepted by `parse_deadline`, interpreted as UTC.
const NAIVE_DEADLINE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Completion state of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemState {
    /// Initial state for every created item.
    NotDone,
    /// Terminal state.
    Done,
}

impl ItemState {
    /// Human-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::NotDone => "Not Done",
            Self::Done => "Done",
        }
    }

    /// Stable code used by persistence layers.
    pub fn as_code(self) -> &'static str {
        match self {
            Self::NotDone => "not_done",
            Self::Done => "done",
        }
    }

    /// Parses a persistence code back into a state.
    pub fn from_code(value: &str) -> Option<Self> {
        match value {
            "not_done" => Some(Self::NotDone),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

impl Display for ItemState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Validation failures for item input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    /// Title is missing or whitespace only.
    EmptyTitle,
    /// Deadline text could not be parsed into an instant.
    InvalidDeadline(String),
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::InvalidDeadline(value) => write!(
                f,
                "invalid deadline `{value}`; expected `YYYY-MM-DD HH:MM[:SS]` or RFC 3339"
            ),
        }
    }
}

impl Error for ItemValidationError {}

/// Creation draft collected from the presentation layer.
///
/// Carries no id and no state: the store assigns the id and creation always
/// starts at `ItemState::NotDone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub title: String,
    pub description: String,
    pub subject: String,
    pub deadline: DateTime<Utc>,
}

impl NewItem {
    /// Creates a draft; the title is trimmed, other text is kept verbatim.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        subject: impl Into<String>,
        deadline: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into().trim().to_string(),
            description: description.into(),
            subject: subject.into(),
            deadline: normalize_deadline(deadline),
        }
    }

    /// Validates draft invariants before persistence.
    ///
    /// # Errors
    /// - Returns `EmptyTitle` when the title is empty after trimming.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.title.trim().is_empty() {
            return Err(ItemValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// Persisted checklist item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Store-assigned identity.
    pub id: ItemId,
    pub title: String,
    pub description: String,
    /// Free-text grouping tag, matched exactly by filters.
    pub subject: String,
    pub deadline: DateTime<Utc>,
    pub state: ItemState,
}

impl Item {
    /// Materializes a persisted item from a validated draft.
    pub fn from_new(id: ItemId, draft: &NewItem, state: ItemState) -> Self {
        Self {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            subject: draft.subject.clone(),
            deadline: normalize_deadline(draft.deadline),
            state,
        }
    }

    pub fn is_done(&self) -> bool {
        self.state == ItemState::Done
    }

    /// Returns whether the deadline has been reached at `now`.
    ///
    /// Reaching the deadline exactly counts as overdue.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.deadline <= now
    }

    /// Applies the one-directional completion transition.
    ///
    /// Returns `true` when the state actually changed.
    pub fn mark_done(&mut self) -> bool {
        if self.is_done() {
            return false;
        }
        self.state = ItemState::Done;
        true
    }
}

/// Truncates a deadline to the precision every store backend can hold.
pub fn normalize_deadline(deadline: DateTime<Utc>) -> DateTime<Utc> {
    deadline.trunc_subsecs(DEADLINE_SUBSEC_DIGITS)
}

/// Parses user deadline input into a UTC instant.
///
/// Naive date-time text is read as UTC; RFC 3339 text with an offset is
/// converted to UTC.
///
/// # Errors
/// - Returns `InvalidDeadline` when no accepted layout matches.
pub fn parse_deadline(input: &str) -> Result<DateTime<Utc>, ItemValidationError> {
    let trimmed = input.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(normalize_deadline(parsed.with_timezone(&Utc)));
    }

    NAIVE_DEADLINE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| normalize_deadline(naive.and_utc()))
        .ok_or_else(|| ItemValidationError::InvalidDeadline(trimmed.to_string()))
}
