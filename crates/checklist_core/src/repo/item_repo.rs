//! Item store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/list/update-state/delete over the canonical `items` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Ids are generated here, at insert time, and never reused.
//! - `list_all` returns rows in insertion order.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::item::{Item, ItemId, ItemState, ItemValidationError, NewItem};
use chrono::DateTime;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const ITEM_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    subject,
    deadline,
    state
FROM items";

pub type RepoResult<T> = Result<T, RepoError>;

/// Store error for item persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ItemValidationError),
    /// The backing store could not be reached or queried.
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted item data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ItemValidationError> for RepoError {
    fn from(value: ItemValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Effect of a mutation addressed by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The target row existed and the mutation ran.
    Applied,
    /// No row carries the id; nothing changed.
    NotFound,
}

impl MutationOutcome {
    pub fn from_rows_affected(changed: usize) -> Self {
        if changed == 0 {
            Self::NotFound
        } else {
            Self::Applied
        }
    }

    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// Storage capability consumed by the lifecycle service.
///
/// Implementations must provide read-after-write consistency: `list_all`
/// issued after a mutation reflects it.
pub trait ItemStore {
    /// Persists a new item and returns its freshly assigned id.
    fn insert(&self, item: &NewItem, state: ItemState) -> RepoResult<ItemId>;
    /// Returns every item in insertion order.
    fn list_all(&self) -> RepoResult<Vec<Item>>;
    fn update_state(&self, id: ItemId, state: ItemState) -> RepoResult<MutationOutcome>;
    /// Removes an item permanently.
    fn delete(&self, id: ItemId) -> RepoResult<MutationOutcome>;
}

impl<S: ItemStore + ?Sized> ItemStore for &S {
    fn insert(&self, item: &NewItem, state: ItemState) -> RepoResult<ItemId> {
        (**self).insert(item, state)
    }

    fn list_all(&self) -> RepoResult<Vec<Item>> {
        (**self).list_all()
    }

    fn update_state(&self, id: ItemId, state: ItemState) -> RepoResult<MutationOutcome> {
        (**self).update_state(id, state)
    }

    fn delete(&self, id: ItemId) -> RepoResult<MutationOutcome> {
        (**self).delete(id)
    }
}

/// SQLite-backed item store.
pub struct SqliteItemStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemStore<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    ///
    /// # Errors
    /// - Returns `InvalidData` when the `items` table is missing, i.e. the
    ///   connection was not migrated.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let has_table: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'items'
            );",
            [],
            |row| row.get(0),
        )?;
        if has_table != 1 {
            return Err(RepoError::InvalidData(
                "items table missing; open the connection through db::open_db".to_string(),
            ));
        }
        Ok(Self { conn })
    }
}

impl ItemStore for SqliteItemStore<'_> {
    fn insert(&self, item: &NewItem, state: ItemState) -> RepoResult<ItemId> {
        item.validate()?;

        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO items (
                id,
                title,
                description,
                subject,
                deadline,
                state
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                id.to_string(),
                item.title.as_str(),
                item.description.as_str(),
                item.subject.as_str(),
                item.deadline.timestamp_millis(),
                state.as_code(),
            ],
        )?;

        Ok(id)
    }

    fn list_all(&self) -> RepoResult<Vec<Item>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }

        Ok(items)
    }

    fn update_state(&self, id: ItemId, state: ItemState) -> RepoResult<MutationOutcome> {
        let changed = self.conn.execute(
            "UPDATE items
             SET
                state = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?2;",
            params![state.as_code(), id.to_string()],
        )?;

        Ok(MutationOutcome::from_rows_affected(changed))
    }

    fn delete(&self, id: ItemId) -> RepoResult<MutationOutcome> {
        let changed = self
            .conn
            .execute("DELETE FROM items WHERE id = ?1;", [id.to_string()])?;

        Ok(MutationOutcome::from_rows_affected(changed))
    }
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<Item> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in items.id"))
    })?;

    let deadline_ms: i64 = row.get("deadline")?;
    let deadline = DateTime::from_timestamp_millis(deadline_ms).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "deadline `{deadline_ms}` out of range in items.deadline"
        ))
    })?;

    let state_text: String = row.get("state")?;
    let state = ItemState::from_code(&state_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid state `{state_text}` in items.state"))
    })?;

    let title: String = row.get("title")?;
    if title.trim().is_empty() {
        return Err(RepoError::InvalidData(format!(
            "empty title for item `{id}` in items.title"
        )));
    }

    Ok(Item {
        id,
        title,
        description: row.get("description")?,
        subject: row.get("subject")?,
        deadline,
        state,
    })
}
