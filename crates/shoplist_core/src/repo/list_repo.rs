//! List repository over a single key/value entry.
//!
//! # Responsibility
//! - Serialize the whole item list into one JSON entry and back.
//! - Reject invalid persisted items instead of masking them.
//!
//! # Invariants
//! - Writes always replace the full list; there is no partial update.
//! - Item order in storage equals in-memory insertion order.

use crate::model::item::Item;
use crate::repo::kv_repo::{KeyValueStore, RepoResult};

/// Storage key holding the serialized shopping list.
pub const LIST_STORAGE_KEY: &str = "shopping_list";

/// Repository interface for the persisted item list.
pub trait ListRepository {
    /// Returns `None` when no list has been stored yet.
    fn load_items(&self) -> RepoResult<Option<Vec<Item>>>;
    fn save_items(&self, items: &[Item]) -> RepoResult<()>;
}

/// `ListRepository` storing the list as JSON under one key.
pub struct KvListRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KvListRepository<S> {
    /// Uses the default `LIST_STORAGE_KEY`.
    pub fn new(store: S) -> Self {
        Self::with_key(store, LIST_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }
}

impl<S: KeyValueStore> ListRepository for KvListRepository<S> {
    fn load_items(&self) -> RepoResult<Option<Vec<Item>>> {
        let Some(raw) = self.store.get_item(&self.key)? else {
            return Ok(None);
        };

        let items: Vec<Item> = serde_json::from_str(&raw)?;
        for item in &items {
            item.validate()?;
        }
        Ok(Some(items))
    }

    fn save_items(&self, items: &[Item]) -> RepoResult<()> {
        let payload = serde_json::to_string(items)?;
        self.store.set_item(&self.key, &payload)
    }
}
