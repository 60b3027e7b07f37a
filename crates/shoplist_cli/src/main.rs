//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `shoplist_core` linkage.
//! - Optionally print the list stored in a given database file.

use shoplist_core::db::open_db;
use shoplist_core::{KvListRepository, ListStore, LoadOutcome, NoticeLog, SqliteKeyValueStore};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("shoplist_core ping={}", shoplist_core::ping());
    println!("shoplist_core version={}", shoplist_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open `{db_path}`: {err}");
            return ExitCode::FAILURE;
        }
    };

    let repo = KvListRepository::new(SqliteKeyValueStore::new(conn));
    let mut store = ListStore::new(repo, NoticeLog::new());
    if store.load() == LoadOutcome::Failed {
        for notice in store.notifier_mut().drain() {
            eprintln!("{notice}");
        }
        return ExitCode::FAILURE;
    }

    println!("item_count={}", store.items().len());
    for item in store.items() {
        println!("{}\t{}\t{}", item.id, item.name, item.quantity);
    }
    ExitCode::SUCCESS
}
