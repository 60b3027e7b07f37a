//! Key-value storage contract and implementations.
//!
//! # Responsibility
//! - Provide a string key/value store shaped like mobile local storage.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `set_item` replaces the whole value of a key (last write wins).
//! - A missing key reads as `None`, never as an error.

use crate::db::DbError;
use crate::model::item::ItemValidationError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for storage reads/writes and payload decoding.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Serialization(serde_json::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "invalid list payload: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted list data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::InvalidData(_) => None,
        }
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

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

impl From<ItemValidationError> for RepoError {
    fn from(value: ItemValidationError) -> Self {
        Self::InvalidData(value.to_string())
    }
}

/// String key/value persistence contract.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> RepoResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> RepoResult<()>;
    fn remove_item(&self, key: &str) -> RepoResult<()>;
}

/// SQLite-backed key/value store over the `kv_entries` table.
///
/// The connection must come from `db::open_db*` so migrations are applied.
pub struct SqliteKeyValueStore {
    conn: Connection,
}

impl SqliteKeyValueStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get_item(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> RepoResult<()> {
        self.conn.execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}

/// In-process key/value store for previews and tests.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> RepoResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> RepoResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
