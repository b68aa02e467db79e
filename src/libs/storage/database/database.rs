use crate::libs::storage::database::storage_sqlite::{SqliteStore, SqliteTransaction};
use crate::libs::storage::database::storage_traits::{StoreError, Transactional};
use std::path::{Path, PathBuf};
use tracing::info;

pub const DATABASE_NAME: &str = "UserDB";
pub const SCHEMA_VERSION: i64 = 1;

/// Where the app keeps its database inside a platform data directory.
pub fn database_path_in(dir: impl AsRef<Path>) -> PathBuf {
    dir.as_ref().join(DATABASE_NAME)
}

pub fn open_database(path: &str) -> Result<SqliteStore, StoreError> {
    let store = SqliteStore::new(path)?;
    db_migration(&store)?;
    info!(path, "Database opened");
    Ok(store)
}

pub fn open_in_memory() -> Result<SqliteStore, StoreError> {
    let store = SqliteStore::in_memory()?;
    db_migration(&store)?;
    Ok(store)
}

// There is only ever version 1; a newer file is refused rather than guessed at.
pub fn db_migration(store: &SqliteStore) -> Result<(), StoreError> {
    let mut connection = store.new_connection()?;
    let sqlite_transaction = SqliteTransaction::new(&mut connection)?;

    let found: i64 = sqlite_transaction
        .inner()
        .query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if found > SCHEMA_VERSION {
        sqlite_transaction.rollback()?;
        return Err(StoreError::UnsupportedSchema {
            expected: SCHEMA_VERSION,
            found,
        });
    }

    sqlite_transaction.inner().execute_batch(
        "CREATE TABLE IF NOT EXISTS user (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_name TEXT,
            profile_picture_uri TEXT
        );

        CREATE TABLE IF NOT EXISTS messages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            author TEXT NOT NULL,
            body TEXT NOT NULL
        );",
    )?;

    sqlite_transaction
        .inner()
        .pragma_update(None, "user_version", SCHEMA_VERSION)?;

    sqlite_transaction.commit()
}
