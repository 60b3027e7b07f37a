//! Core domain logic for the shopping list app.
//! This crate owns list state, local persistence and user-facing notices.

pub mod db;
pub mod logging;
pub mod model;
pub mod notice;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::item::{now_epoch_ms, Item, ItemId, ItemValidationError};
pub use model::selection::{ItemDraft, SelectionSet};
pub use notice::{Notice, NoticeLog, Notifier};
pub use repo::kv_repo::{
    KeyValueStore, MemoryKeyValueStore, RepoError, RepoResult, SqliteKeyValueStore,
};
pub use repo::list_repo::{KvListRepository, ListRepository, LIST_STORAGE_KEY};
pub use service::list_service::{AddOutcome, ListStore, LoadOutcome, RemoveOutcome};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
