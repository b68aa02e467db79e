use crate::libs::core::models::{ConversationMessage, RowId};
use crate::libs::storage::database::storage_traits::{
    MessageStore, StoreError, Transactional, UserStore,
};
use crate::libs::storage::records::{MessageRecord, UserRecord};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension, Transaction};
use std::time::Duration;

const CONNECTION_TIMEOUT: Duration = Duration::from_secs(2);

pub struct SqliteTransaction<'conn> {
    tx: Transaction<'conn>,
}

impl<'conn> SqliteTransaction<'conn> {
    pub fn new(conn: &'conn mut PooledConnection<SqliteConnectionManager>) -> Result<Self, StoreError> {
        let trans = conn.transaction()?;
        Ok(Self { tx: trans })
    }

    pub fn inner(&self) -> &Transaction {
        &self.tx
    }
}

impl<'conn> Transactional for SqliteTransaction<'conn> {
    fn commit(self) -> Result<(), StoreError> {
        Ok(self.tx.commit()?)
    }

    fn rollback(self) -> Result<(), StoreError> {
        Ok(self.tx.rollback()?)
    }
}

// A single pooled connection: the store is only ever touched from one worker,
// and an in-memory database lives exactly as long as its connection.
#[derive(Debug)]
pub struct SqliteStore {
    conn_pool: Pool<SqliteConnectionManager>,
}

impl SqliteStore {
    pub fn new(db_path: &str) -> Result<Self, StoreError> {
        Self::with_manager(SqliteConnectionManager::file(db_path))
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        Self::with_manager(SqliteConnectionManager::memory())
    }

    fn with_manager(manager: SqliteConnectionManager) -> Result<Self, StoreError> {
        let pool = Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connection_timeout(CONNECTION_TIMEOUT)
            .build(manager)?;
        Ok(Self { conn_pool: pool })
    }

    pub fn new_connection(&self) -> Result<PooledConnection<SqliteConnectionManager>, StoreError> {
        Ok(self.conn_pool.get()?)
    }
}

impl<'conn> UserStore for SqliteTransaction<'conn> {
    fn count_users(&mut self) -> Result<u64, StoreError> {
        let count: i64 = self
            .tx
            .query_row("SELECT COUNT(*) FROM user", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn create_user(
        &mut self,
        name: Option<&str>,
        profile_picture_path: Option<&str>,
    ) -> Result<UserRecord, StoreError> {
        self.tx.execute(
            "INSERT INTO user (user_name, profile_picture_uri) VALUES (?1, ?2)",
            params![name, profile_picture_path],
        )?;
        Ok(UserRecord::from_db(
            RowId(self.tx.last_insert_rowid()),
            name.map(str::to_string),
            profile_picture_path.map(str::to_string),
        ))
    }

    fn load_current_user(&mut self) -> Result<Option<UserRecord>, StoreError> {
        let user = self
            .tx
            .query_row(
                "SELECT id, user_name, profile_picture_uri
                 FROM user
                 ORDER BY id ASC
                 LIMIT 1",
                [],
                |row| {
                    Ok(UserRecord::from_db(
                        row.get::<_, RowId>(0)?,
                        row.get(1)?,
                        row.get(2)?,
                    ))
                },
            )
            .optional()?;
        Ok(user)
    }

    fn update_user(&mut self, record: &UserRecord) -> Result<(), StoreError> {
        self.tx.execute(
            "UPDATE user SET user_name = ?1, profile_picture_uri = ?2 WHERE id = ?3",
            params![record.name, record.profile_picture_path, record.user_id],
        )?;
        Ok(())
    }
}

impl<'conn> MessageStore for SqliteTransaction<'conn> {
    fn count_messages(&mut self) -> Result<u64, StoreError> {
        let count: i64 = self
            .tx
            .query_row("SELECT COUNT(*) FROM messages", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn store_message(&mut self, author: &str, body: &str) -> Result<MessageRecord, StoreError> {
        self.tx.execute(
            "INSERT INTO messages (author, body) VALUES (?1, ?2)",
            params![author, body],
        )?;
        Ok(MessageRecord::from_db(
            RowId(self.tx.last_insert_rowid()),
            author.to_string(),
            body.to_string(),
        ))
    }

    fn store_messages(&mut self, messages: &[ConversationMessage]) -> Result<(), StoreError> {
        let mut stmt = self
            .tx
            .prepare_cached("INSERT INTO messages (author, body) VALUES (?1, ?2)")?;
        for message in messages {
            stmt.execute(params![message.author, message.body])?;
        }
        Ok(())
    }

    fn load_messages(&mut self) -> Result<Vec<MessageRecord>, StoreError> {
        let mut stmt = self
            .tx
            .prepare_cached("SELECT id, author, body FROM messages ORDER BY id ASC")?;

        let rows = stmt.query_map([], |row| {
            Ok(MessageRecord::from_db(row.get(0)?, row.get(1)?, row.get(2)?))
        })?;

        let mut messages = Vec::new();
        for message in rows {
            messages.push(message?);
        }
        Ok(messages)
    }
}
