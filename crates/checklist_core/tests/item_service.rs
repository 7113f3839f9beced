use checklist_core::db::{open_db_in_memory, DbError};
use checklist_core::{
    ChecklistService, InMemoryItemStore, Item, ItemId, ItemState, ItemStore,
    ItemValidationError, ItemViewQuery, MutationOutcome, NewItem, RepoError, RepoResult,
    ServiceError, SqliteItemStore, SubjectFilter,
};
use chrono::{DateTime, Duration, Utc};
use std::cell::Cell;
use uuid::Uuid;

fn draft(title: &str, subject: &str, deadline: DateTime<Utc>) -> NewItem {
    NewItem::new(title, "", subject, deadline)
}

/// Store double that counts calls and can simulate an outage.
#[derive(Default)]
struct FlakyStore {
    inner: InMemoryItemStore,
    offline: Cell<bool>,
    inserts: Cell<usize>,
}

impl FlakyStore {
    fn check_online(&self) -> RepoResult<()> {
        if self.offline.get() {
            return Err(RepoError::Db(DbError::Sqlite(rusqlite::Error::InvalidQuery)));
        }
        Ok(())
    }
}

impl ItemStore for FlakyStore {
    fn insert(&self, item: &NewItem, state: ItemState) -> RepoResult<ItemId> {
        self.check_online()?;
        self.inserts.set(self.inserts.get() + 1);
        self.inner.insert(item, state)
    }

    fn list_all(&self) -> RepoResult<Vec<Item>> {
        self.check_online()?;
        self.inner.list_all()
    }

    fn update_state(&self, id: ItemId, state: ItemState) -> RepoResult<MutationOutcome> {
        self.check_online()?;
        self.inner.update_state(id, state)
    }

    fn delete(&self, id: ItemId) -> RepoResult<MutationOutcome> {
        self.check_online()?;
        self.inner.delete(id)
    }
}

#[test]
fn create_forces_not_done_and_returns_stored_item() {
    let conn = open_db_in_memory().unwrap();
    let service = ChecklistService::new(SqliteItemStore::try_new(&conn).unwrap());
    let deadline = Utc::now() + Duration::hours(1);

    let created = service.create(&draft("  lab report ", "Physics", deadline)).unwrap();
    assert_eq!(created.state, ItemState::NotDone);
    assert_eq!(created.title, "lab report");

    let now = Utc::now();
    let view = service.refresh(&ItemViewQuery::default(), now).unwrap();
    assert_eq!(view.cards.len(), 1);
    assert_eq!(view.cards[0].item.id, created.id);
    assert_ne!(view.cards[0].countdown, "Expired");
}

#[test]
fn create_read_back_matches_draft_deadline_on_sqlite() {
    let conn = open_db_in_memory().unwrap();
    let service = ChecklistService::new(SqliteItemStore::try_new(&conn).unwrap());
    let fine = Utc::now() + Duration::nanoseconds(3_600_000_123_456);

    let draft = draft("timed", "Physics", fine);
    let created = service.create(&draft).unwrap();
    assert_eq!(created.deadline, draft.deadline);
    assert!(created.deadline <= fine);
}

#[test]
fn blank_title_never_reaches_the_store() {
    let service = ChecklistService::new(FlakyStore::default());
    let err = service
        .create(&draft("", "Math", Utc::now()))
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Validation(ItemValidationError::EmptyTitle)
    ));
}

#[test]
fn blank_title_leaves_insert_counter_untouched() {
    let store = FlakyStore::default();
    let service = ChecklistService::new(&store);
    let _ = service.create(&draft(" ", "Math", Utc::now()));
    assert_eq!(store.inserts.get(), 0);
    assert!(store.inner.is_empty());
}

#[test]
fn mark_done_twice_stays_done_without_error() {
    let store = InMemoryItemStore::new();
    let service = ChecklistService::new(&store);
    let item = service
        .create(&draft("essay", "Art", Utc::now() + Duration::days(2)))
        .unwrap();

    assert_eq!(service.mark_done(item.id).unwrap(), MutationOutcome::Applied);
    assert_eq!(service.mark_done(item.id).unwrap(), MutationOutcome::Applied);
    assert_eq!(service.list_all().unwrap()[0].state, ItemState::Done);
}

#[test]
fn missing_ids_are_reported_as_no_effect() {
    let service = ChecklistService::new(InMemoryItemStore::new());
    let ghost = Uuid::new_v4();

    assert_eq!(service.mark_done(ghost).unwrap(), MutationOutcome::NotFound);
    assert_eq!(service.delete(ghost).unwrap(), MutationOutcome::NotFound);
}

#[test]
fn deleted_item_never_reappears() {
    let conn = open_db_in_memory().unwrap();
    let service = ChecklistService::new(SqliteItemStore::try_new(&conn).unwrap());
    let doomed = service
        .create(&draft("doomed", "Art", Utc::now() + Duration::hours(3)))
        .unwrap();
    service
        .create(&draft("survivor", "Art", Utc::now() + Duration::hours(3)))
        .unwrap();

    assert_eq!(service.delete(doomed.id).unwrap(), MutationOutcome::Applied);
    assert_eq!(service.mark_done(doomed.id).unwrap(), MutationOutcome::NotFound);

    let remaining = service.list_all().unwrap();
    assert_eq!(remaining.len(), 1);
    assert!(remaining.iter().all(|item| item.id != doomed.id));
}

#[test]
fn refresh_filters_subjects_and_reports_choices() {
    let service = ChecklistService::new(InMemoryItemStore::new());
    let later = Utc::now() + Duration::days(1);
    service.create(&draft("limits", "Math", later)).unwrap();
    service.create(&draft("palette", "Art", later)).unwrap();
    service.create(&draft("series", "Math", later)).unwrap();

    let query = ItemViewQuery {
        subject: SubjectFilter::from_input(Some("Math")),
        sort_by_deadline: false,
    };
    let view = service.refresh(&query, Utc::now()).unwrap();

    assert_eq!(view.total, 3);
    assert_eq!(view.subjects, vec!["Math", "Art"]);
    assert_eq!(view.cards.len(), 2);
    assert!(view.cards.iter().all(|card| card.item.subject == "Math"));
}

#[test]
fn refresh_after_mutation_reflects_new_state() {
    let service = ChecklistService::new(InMemoryItemStore::new());
    let item = service
        .create(&draft("quiz", "Math", Utc::now() - Duration::minutes(1)))
        .unwrap();

    service.mark_done(item.id).unwrap();
    let view = service.refresh(&ItemViewQuery::default(), Utc::now()).unwrap();
    assert_eq!(view.cards[0].item.state, ItemState::Done);
    assert_eq!(view.cards[0].countdown, "Expired");
}

#[test]
fn store_outage_is_propagated_not_swallowed() {
    let store = FlakyStore::default();
    let service = ChecklistService::new(&store);
    let item = service
        .create(&draft("report", "Physics", Utc::now() + Duration::hours(1)))
        .unwrap();

    store.offline.set(true);
    assert!(matches!(
        service.delete(item.id),
        Err(ServiceError::StoreUnavailable(_))
    ));
    assert!(matches!(
        service.mark_done(item.id),
        Err(ServiceError::StoreUnavailable(_))
    ));
    assert!(matches!(
        service.refresh(&ItemViewQuery::default(), Utc::now()),
        Err(ServiceError::StoreUnavailable(_))
    ));

    store.offline.set(false);
    assert_eq!(service.list_all().unwrap().len(), 1);
}

#[test]
fn view_serializes_cards_with_countdown() {
    let service = ChecklistService::new(InMemoryItemStore::new());
    let now = Utc::now();
    service
        .create(&draft("poster", "Art", now + Duration::days(1)))
        .unwrap();

    let view = service.refresh(&ItemViewQuery::default(), now).unwrap();
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["cards"][0]["title"], "poster");
    assert_eq!(json["cards"][0]["state"], "not_done");
    assert_eq!(json["cards"][0]["countdown"], "1d 0h 0m");
    assert_eq!(json["total"], 1);
}
