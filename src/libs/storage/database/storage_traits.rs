use crate::libs::core::models::ConversationMessage;
use crate::libs::storage::records::{MessageRecord, UserRecord};
use thiserror::Error;

pub trait Transactional {
    fn commit(self) -> Result<(), StoreError>;
    fn rollback(self) -> Result<(), StoreError>;
}

pub trait UserStore {
    fn count_users(&mut self) -> Result<u64, StoreError>;
    fn create_user(
        &mut self,
        name: Option<&str>,
        profile_picture_path: Option<&str>,
    ) -> Result<UserRecord, StoreError>;
    /// The first user row by identity, the app's "current user".
    fn load_current_user(&mut self) -> Result<Option<UserRecord>, StoreError>;
    fn update_user(&mut self, record: &UserRecord) -> Result<(), StoreError>;
}

pub trait MessageStore {
    fn count_messages(&mut self) -> Result<u64, StoreError>;
    fn store_message(&mut self, author: &str, body: &str) -> Result<MessageRecord, StoreError>;
    fn store_messages(&mut self, messages: &[ConversationMessage]) -> Result<(), StoreError>;
    /// All messages in ascending identity order.
    fn load_messages(&mut self) -> Result<Vec<MessageRecord>, StoreError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Sqlite Error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported schema version {found}, this build knows version {expected}")]
    UnsupportedSchema { expected: i64, found: i64 },
}
