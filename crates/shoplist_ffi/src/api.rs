//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the list screen operations to Dart via FRB.
//! - Translate core notices into plain code/message pairs.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - All list calls are serialized through one process-wide store.
//! - Every list call returns the full current list and only the notices
//!   raised by that call.

use log::error;
use shoplist_core::db::open_db;
use shoplist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ItemId, KvListRepository, ListStore, Notice, NoticeLog, SqliteKeyValueStore,
};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError};

const LIST_DB_FILE_NAME: &str = "shoplist.sqlite3";
const LIST_DB_PATH_ENV: &str = "SHOPLIST_DB_PATH";

type FfiListStore = ListStore<KvListRepository<SqliteKeyValueStore>, NoticeLog>;

static LIST_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static LIST_STORE: Mutex<Option<FfiListStore>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One row of the rendered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItemView {
    pub id: String,
    pub name: String,
    pub quantity: String,
    /// Removal switch state.
    pub marked: bool,
}

/// One alert the UI must show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeView {
    /// Stable code (`load_failed|missing_field|add_save_failed|remove_save_failed`).
    pub code: String,
    pub message: String,
}

/// Response envelope shared by all list calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListResponse {
    /// `false` when the call raised at least one notice.
    pub ok: bool,
    /// Items in insertion order.
    pub items: Vec<ListItemView>,
    /// Notices raised by this call, in raise order.
    pub notices: Vec<NoticeView>,
    /// Whether the remove action should be offered.
    pub can_remove: bool,
}

/// Reads the persisted list into the process-wide store.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Clears all removal marks.
/// - Raises at most one `load_failed`, also on the very first call.
#[flutter_rust_bridge::frb(sync)]
pub fn list_load() -> ListResponse {
    with_list_store(Notice::LoadFailed, reload)
}

/// Adds one item from the two text inputs.
///
/// Text is passed through unchanged; only literally empty fields are
/// rejected.
#[flutter_rust_bridge::frb(sync)]
pub fn list_add(name: String, quantity: String) -> ListResponse {
    with_list_store(Notice::AddSaveFailed, |store| {
        store.add(name, quantity);
    })
}

/// Flips the removal switch of one item. Never touches storage.
///
/// When the store cannot be opened this reports `load_failed`: there is no
/// list to toggle in.
#[flutter_rust_bridge::frb(sync)]
pub fn list_toggle_mark(id: String) -> ListResponse {
    with_list_store(Notice::LoadFailed, |store| {
        store.toggle_mark(&ItemId::new(id));
    })
}

/// Removes all marked items and persists the remaining list.
#[flutter_rust_bridge::frb(sync)]
pub fn list_remove_marked() -> ListResponse {
    with_list_store(Notice::RemoveSaveFailed, |store| {
        store.remove_marked();
    })
}

/// Returns current in-memory state without touching storage.
///
/// When the store cannot be opened this reports `load_failed`.
#[flutter_rust_bridge::frb(sync)]
pub fn list_snapshot() -> ListResponse {
    with_list_store(Notice::LoadFailed, |_| {})
}

fn reload(store: &mut FfiListStore) {
    // A fresh store already ran its bootstrap load; this reload replaces it.
    store.notifier_mut().drain();
    store.load();
}

fn with_list_store(open_failure: Notice, f: impl FnOnce(&mut FfiListStore)) -> ListResponse {
    with_store_at(&LIST_STORE, &resolve_list_db_path(), open_failure, f)
}

/// Runs one list operation against `slot`, opening it from `db_path` on
/// first use.
///
/// `open_failure` is the notice reported when the store cannot be opened.
fn with_store_at(
    slot: &Mutex<Option<FfiListStore>>,
    db_path: &Path,
    open_failure: Notice,
    f: impl FnOnce(&mut FfiListStore),
) -> ListResponse {
    let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);

    let store = match guard.take() {
        Some(store) => store,
        None => match open_list_store(db_path) {
            Ok(store) => store,
            Err(err) => {
                error!("event=ffi_store_open module=ffi status=error error={err}");
                return ListResponse {
                    ok: false,
                    items: Vec::new(),
                    notices: vec![to_notice_view(open_failure)],
                    can_remove: false,
                };
            }
        },
    };
    let store = guard.insert(store);

    f(store);
    to_response(store)
}

/// Opens the SQLite-backed store and loads the persisted list, so the first
/// mutation never overwrites stored items with an empty list.
fn open_list_store(db_path: &Path) -> Result<FfiListStore, shoplist_core::db::DbError> {
    let conn = open_db(db_path)?;
    let repo = KvListRepository::new(SqliteKeyValueStore::new(conn));
    let mut store = ListStore::new(repo, NoticeLog::new());
    store.load();
    Ok(store)
}

fn resolve_list_db_path() -> PathBuf {
    LIST_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(LIST_DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(LIST_DB_FILE_NAME)
        })
        .clone()
}

fn to_response(store: &mut FfiListStore) -> ListResponse {
    let notices = store
        .notifier_mut()
        .drain()
        .into_iter()
        .map(to_notice_view)
        .collect::<Vec<_>>();
    let items = store
        .items()
        .iter()
        .map(|item| ListItemView {
            id: item.id.to_string(),
            name: item.name.clone(),
            quantity: item.quantity.clone(),
            marked: store.is_marked(&item.id),
        })
        .collect();

    ListResponse {
        ok: notices.is_empty(),
        items,
        notices,
        can_remove: store.can_remove(),
    }
}

fn to_notice_view(notice: Notice) -> NoticeView {
    NoticeView {
        code: notice.code().to_string(),
        message: notice.message().to_string(),
    }
}
