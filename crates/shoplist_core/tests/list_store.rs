use shoplist_core::db::open_db;
use shoplist_core::{
    AddOutcome, Item, ItemId, KeyValueStore, KvListRepository, ListStore, LoadOutcome,
    MemoryKeyValueStore, Notice, NoticeLog, RemoveOutcome, RepoError, RepoResult,
    SqliteKeyValueStore, LIST_STORAGE_KEY,
};
use std::cell::Cell;

/// Memory store with switchable read/write failures.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryKeyValueStore,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl KeyValueStore for FlakyStore {
    fn get_item(&self, key: &str) -> RepoResult<Option<String>> {
        if self.fail_reads.get() {
            return Err(RepoError::InvalidData("simulated read failure".to_string()));
        }
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> RepoResult<()> {
        if self.fail_writes.get() {
            return Err(RepoError::InvalidData("simulated write failure".to_string()));
        }
        self.inner.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> RepoResult<()> {
        self.inner.remove_item(key)
    }
}

type FlakyListStore = ListStore<KvListRepository<FlakyStore>, NoticeLog>;

fn flaky_store() -> FlakyListStore {
    ListStore::new(KvListRepository::new(FlakyStore::default()), NoticeLog::new())
}

fn persisted(store: &FlakyListStore) -> Option<Vec<Item>> {
    store
        .repo()
        .store()
        .inner
        .get_item(LIST_STORAGE_KEY)
        .unwrap()
        .map(|raw| serde_json::from_str(&raw).unwrap())
}

#[test]
fn load_without_stored_entry_yields_empty_list() {
    let mut store = flaky_store();

    assert_eq!(store.load(), LoadOutcome::Missing);
    assert!(store.items().is_empty());
    assert!(store.notifier().is_empty());
}

#[test]
fn add_appends_and_persists_full_list() {
    let mut store = flaky_store();
    store.load();

    let first = store.add("milk", "2");
    let second = store.add("bread", "1");
    assert!(matches!(first, AddOutcome::Saved(_)));
    assert!(matches!(second, AddOutcome::Saved(_)));
    assert_eq!(store.items().len(), 2);

    let stored = persisted(&store).expect("list should be persisted");
    assert_eq!(stored, store.items());
    assert_eq!(stored[0].name, "milk");
    assert_eq!(stored[1].name, "bread");
    assert!(store.notifier().is_empty());
}

#[test]
fn add_with_empty_field_is_rejected_with_notice() {
    let mut store = flaky_store();
    store.add("milk", "2");

    assert_eq!(store.add("", "3"), AddOutcome::Rejected);
    assert_eq!(store.add("butter", ""), AddOutcome::Rejected);

    assert_eq!(store.items().len(), 1);
    assert_eq!(persisted(&store).unwrap().len(), 1);
    assert_eq!(
        store.notifier_mut().drain(),
        vec![Notice::MissingField, Notice::MissingField]
    );
}

#[test]
fn remove_marked_keeps_exactly_unmarked_items() {
    let mut store = flaky_store();
    let ids = ["apples", "pears", "plums", "grapes"]
        .iter()
        .map(|name| store.add(*name, "1").item_id().cloned().unwrap())
        .collect::<Vec<ItemId>>();

    store.toggle_mark(&ids[0]);
    store.toggle_mark(&ids[2]);
    store.toggle_mark(&ids[3]);
    store.toggle_mark(&ids[3]);
    assert_eq!(store.marked_count(), 2);

    let outcome = store.remove_marked();
    assert_eq!(
        outcome,
        RemoveOutcome {
            removed: 2,
            persisted: true
        }
    );

    let names = store
        .items()
        .iter()
        .map(|item| item.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["pears", "grapes"]);
    assert!(store.selection().is_empty());
    assert_eq!(persisted(&store).unwrap(), store.items());
}

#[test]
fn remove_with_nothing_marked_still_persists_unchanged_list() {
    let mut store = flaky_store();
    store.add("rice", "1");

    let outcome = store.remove_marked();
    assert_eq!(outcome.removed, 0);
    assert!(outcome.persisted);
    assert_eq!(store.items().len(), 1);
}

#[test]
fn toggle_mark_is_not_persisted() {
    let mut store = flaky_store();
    let id = store.add("salt", "1").item_id().cloned().unwrap();
    let before = store.repo().store().inner.get_item(LIST_STORAGE_KEY).unwrap();

    assert!(store.toggle_mark(&id));
    assert!(store.is_marked(&id));

    let after = store.repo().store().inner.get_item(LIST_STORAGE_KEY).unwrap();
    assert_eq!(before, after);
}

#[test]
fn save_failure_on_add_keeps_memory_and_notifies() {
    let mut store = flaky_store();
    store.add("milk", "2");
    store.repo().store().fail_writes.set(true);

    let outcome = store.add("cheese", "1");
    assert!(matches!(outcome, AddOutcome::Unsaved(_)));
    assert_eq!(store.items().len(), 2);
    assert_eq!(persisted(&store).unwrap().len(), 1);
    assert_eq!(store.notifier_mut().drain(), vec![Notice::AddSaveFailed]);
}

#[test]
fn save_failure_on_remove_keeps_memory_and_notifies() {
    let mut store = flaky_store();
    let id = store.add("milk", "2").item_id().cloned().unwrap();
    store.toggle_mark(&id);
    store.repo().store().fail_writes.set(true);

    let outcome = store.remove_marked();
    assert_eq!(
        outcome,
        RemoveOutcome {
            removed: 1,
            persisted: false
        }
    );
    assert!(store.items().is_empty());
    assert!(store.selection().is_empty());
    assert_eq!(persisted(&store).unwrap().len(), 1);
    assert_eq!(store.notifier_mut().drain(), vec![Notice::RemoveSaveFailed]);
}

#[test]
fn read_failure_on_load_notifies_and_leaves_list_empty() {
    let mut store = flaky_store();
    store.add("milk", "2");
    store.repo().store().fail_reads.set(true);

    assert_eq!(store.load(), LoadOutcome::Failed);
    assert!(store.items().is_empty());
    assert_eq!(store.notifier_mut().drain(), vec![Notice::LoadFailed]);
}

#[test]
fn corrupt_payload_on_load_notifies() {
    let mut store = flaky_store();
    store
        .repo()
        .store()
        .set_item(LIST_STORAGE_KEY, "[{\"name\": 1}]")
        .unwrap();

    assert_eq!(store.load(), LoadOutcome::Failed);
    assert!(store.items().is_empty());
    assert_eq!(store.notifier_mut().drain(), vec![Notice::LoadFailed]);
}

#[test]
fn reload_from_sqlite_file_returns_added_item() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shoplist.db");

    let added = {
        let repo = KvListRepository::new(SqliteKeyValueStore::new(open_db(&path).unwrap()));
        let mut store = ListStore::new(repo, NoticeLog::new());
        assert_eq!(store.load(), LoadOutcome::Missing);
        let id = store.add("coffee", "500 g").item_id().cloned().unwrap();
        store
            .items()
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .unwrap()
    };

    let repo = KvListRepository::new(SqliteKeyValueStore::new(open_db(&path).unwrap()));
    let mut reopened = ListStore::new(repo, NoticeLog::new());
    assert_eq!(reopened.load(), LoadOutcome::Loaded(1));
    assert_eq!(reopened.items(), &[added]);
    assert!(reopened.notifier().is_empty());
}

#[test]
fn load_clears_selection_marks() {
    let mut store = ListStore::new(
        KvListRepository::new(MemoryKeyValueStore::new()),
        NoticeLog::new(),
    );
    let id = store.add("jam", "1").item_id().cloned().unwrap();
    store.toggle_mark(&id);

    assert_eq!(store.load(), LoadOutcome::Loaded(1));
    assert_eq!(store.marked_count(), 0);
}

#[test]
fn add_after_loading_max_numeric_id_picks_free_id() {
    let store = MemoryKeyValueStore::new();
    store
        .set_item(
            LIST_STORAGE_KEY,
            r#"[{"name": "a", "quantity": "1", "id": "9223372036854775807"}]"#,
        )
        .unwrap();
    let mut store =
        ListStore::new(KvListRepository::new(store), NoticeLog::new()).with_clock(|| 1_000);

    assert_eq!(store.load(), LoadOutcome::Loaded(1));
    let outcome = store.add("b", "1");

    assert_eq!(outcome, AddOutcome::Saved(ItemId::from_epoch_ms(1_000)));
    assert_eq!(store.items().len(), 2);
    assert!(store.notifier().is_empty());
}
