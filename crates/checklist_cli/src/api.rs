//! Use-case API consumed by the command handlers.
//!
//! # Responsibility
//! - Translate raw form input into lifecycle calls.
//! - Fold every outcome into a plain response envelope.
//!
//! # Invariants
//! - Functions never panic; failures become `ok = false` envelopes.
//! - A missing item is a successful no-op, not a failure.

use checklist_core::{
    parse_deadline, ChecklistService, ItemId, ItemStore, MutationOutcome, NewItem, ServiceError,
};
use serde::Serialize;
use uuid::Uuid;

/// Create-form fields as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemForm {
    pub title: String,
    pub description: String,
    pub subject: String,
    /// Raw deadline text, parsed to UTC on submit.
    pub deadline: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResponse {
    /// Whether the operation succeeded (including no-op outcomes).
    pub ok: bool,
    /// Whether the store changed.
    pub changed: bool,
    pub item_id: Option<String>,
    /// Human-readable message for display.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, item_id: ItemId) -> Self {
        Self {
            ok: true,
            changed: true,
            item_id: Some(item_id.to_string()),
            message: message.into(),
        }
    }

    fn noop(message: impl Into<String>, item_id: ItemId) -> Self {
        Self {
            ok: true,
            changed: false,
            item_id: Some(item_id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            changed: false,
            item_id: None,
            message: message.into(),
        }
    }
}

/// Submits the create form.
pub fn add_item<S: ItemStore>(service: &ChecklistService<S>, form: &ItemForm) -> ActionResponse {
    let deadline = match parse_deadline(&form.deadline) {
        Ok(deadline) => deadline,
        Err(err) => return ActionResponse::failure(format!("add failed: {err}")),
    };
    let draft = NewItem::new(
        form.title.as_str(),
        form.description.as_str(),
        form.subject.as_str(),
        deadline,
    );

    match service.create(&draft) {
        Ok(item) => ActionResponse::success("Item added successfully.", item.id),
        Err(err) => ActionResponse::failure(describe_failure("add", &err)),
    }
}

/// Marks the item identified by `raw_id` as done.
pub fn mark_done<S: ItemStore>(service: &ChecklistService<S>, raw_id: &str) -> ActionResponse {
    let id = match parse_item_id(raw_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match service.mark_done(id) {
        Ok(MutationOutcome::Applied) => ActionResponse::success("Item marked as done.", id),
        Ok(MutationOutcome::NotFound) => ActionResponse::noop(format!("No item with id {id}."), id),
        Err(err) => ActionResponse::failure(describe_failure("done", &err)),
    }
}

/// Deletes the item identified by `raw_id`.
pub fn delete_item<S: ItemStore>(service: &ChecklistService<S>, raw_id: &str) -> ActionResponse {
    let id = match parse_item_id(raw_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match service.delete(id) {
        Ok(MutationOutcome::Applied) => ActionResponse::success("Item deleted.", id),
        Ok(MutationOutcome::NotFound) => ActionResponse::noop(format!("No item with id {id}."), id),
        Err(err) => ActionResponse::failure(describe_failure("delete", &err)),
    }
}

fn parse_item_id(raw_id: &str) -> Result<ItemId, ActionResponse> {
    Uuid::parse_str(raw_id.trim())
        .map_err(|_| ActionResponse::failure(format!("`{}` is not a valid item id", raw_id.trim())))
}

fn describe_failure(action: &str, err: &ServiceError) -> String {
    match err {
        ServiceError::Validation(inner) => format!("{action} rejected: {inner}"),
        other => format!("{action} failed: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{add_item, delete_item, mark_done, ItemForm};
    use checklist_core::{ChecklistService, InMemoryItemStore, ItemState};

    fn form(title: &str, deadline: &str) -> ItemForm {
        ItemForm {
            title: title.to_string(),
            description: "chapter 3".to_string(),
            subject: "Math".to_string(),
            deadline: deadline.to_string(),
        }
    }

    #[test]
    fn add_item_returns_created_id() {
        let service = ChecklistService::new(InMemoryItemStore::new());
        let response = add_item(&service, &form("homework", "2031-01-01 10:00"));

        assert!(response.ok, "{}", response.message);
        assert!(response.changed);
        let items = service.list_all().unwrap();
        assert_eq!(response.item_id, Some(items[0].id.to_string()));
    }

    #[test]
    fn add_item_reports_blank_title_and_bad_deadline() {
        let service = ChecklistService::new(InMemoryItemStore::new());

        let blank = add_item(&service, &form("  ", "2031-01-01 10:00"));
        assert!(!blank.ok);
        assert!(blank.message.contains("title"));

        let bad_deadline = add_item(&service, &form("homework", "soon"));
        assert!(!bad_deadline.ok);
        assert!(bad_deadline.message.contains("deadline"));

        assert!(service.list_all().unwrap().is_empty());
    }

    #[test]
    fn mark_done_and_delete_handle_missing_and_malformed_ids() {
        let service = ChecklistService::new(InMemoryItemStore::new());
        let created = add_item(&service, &form("homework", "2031-01-01 10:00"));
        let id = created.item_id.unwrap();

        let done = mark_done(&service, &id);
        assert!(done.ok && done.changed);
        assert_eq!(service.list_all().unwrap()[0].state, ItemState::Done);

        let deleted = delete_item(&service, &id);
        assert!(deleted.ok && deleted.changed);

        let again = delete_item(&service, &id);
        assert!(again.ok);
        assert!(!again.changed);
        assert!(again.message.starts_with("No item"));

        let malformed = mark_done(&service, "42");
        assert!(!malformed.ok);
    }
}
