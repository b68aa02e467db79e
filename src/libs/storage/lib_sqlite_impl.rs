use crate::libs::core::models::{ConversationMessage, ProfileState};
use crate::libs::storage::database::storage_sqlite::{SqliteStore, SqliteTransaction};
use crate::libs::storage::database::storage_traits::{
    MessageStore, StoreError, Transactional, UserStore,
};
use tracing::info;

/// Seeds an empty store from `sample`. The emptiness checks and the inserts
/// share one transaction, so running it again never duplicates anything.
pub fn ensure_seeded(
    store: &SqliteStore,
    sample: &[ConversationMessage],
) -> Result<(), StoreError> {
    let mut connection = store.new_connection()?;
    let mut sqlite_transaction = SqliteTransaction::new(&mut connection)?;

    if sqlite_transaction.count_messages()? == 0 {
        sqlite_transaction.store_messages(sample)?;
        info!(count = sample.len(), "Seeded sample conversation");
    }

    if sqlite_transaction.count_users()? == 0 {
        if let Some(first) = sample.first() {
            sqlite_transaction.create_user(Some(&first.author), None)?;
            info!(name = %first.author, "Seeded current user");
        }
    }

    sqlite_transaction.commit()
}

pub fn load_conversation(store: &SqliteStore) -> Result<Vec<ConversationMessage>, StoreError> {
    let mut connection = store.new_connection()?;
    let mut sqlite_transaction = SqliteTransaction::new(&mut connection)?;

    let messages = sqlite_transaction.load_messages()?;

    sqlite_transaction.commit()?;
    Ok(messages.into_iter().map(ConversationMessage::from).collect())
}

pub fn append_message(
    store: &SqliteStore,
    author: &str,
    body: &str,
) -> Result<Vec<ConversationMessage>, StoreError> {
    let mut connection = store.new_connection()?;
    let mut sqlite_transaction = SqliteTransaction::new(&mut connection)?;

    sqlite_transaction.store_message(author, body)?;
    let messages = sqlite_transaction.load_messages()?;

    sqlite_transaction.commit()?;
    Ok(messages.into_iter().map(ConversationMessage::from).collect())
}

pub fn load_profile(store: &SqliteStore) -> Result<ProfileState, StoreError> {
    let mut connection = store.new_connection()?;
    let mut sqlite_transaction = SqliteTransaction::new(&mut connection)?;

    let user = sqlite_transaction.load_current_user()?;

    sqlite_transaction.commit()?;
    Ok(user.into())
}

/// Renames the current user in place, keeping the picture. An empty user
/// table gets a fresh row carrying just the name.
pub fn update_profile_name(store: &SqliteStore, new_name: &str) -> Result<ProfileState, StoreError> {
    let mut connection = store.new_connection()?;
    let mut sqlite_transaction = SqliteTransaction::new(&mut connection)?;

    let user = match sqlite_transaction.load_current_user()? {
        Some(mut user) => {
            user.name = Some(new_name.to_string());
            sqlite_transaction.update_user(&user)?;
            user
        }
        None => sqlite_transaction.create_user(Some(new_name), None)?,
    };

    sqlite_transaction.commit()?;
    Ok(Some(user).into())
}

/// Replaces the current user's picture, keeping the name. Without a user
/// there is nothing to attach the picture to.
pub fn update_profile_picture(
    store: &SqliteStore,
    local_path: &str,
) -> Result<ProfileState, StoreError> {
    let mut connection = store.new_connection()?;
    let mut sqlite_transaction = SqliteTransaction::new(&mut connection)?;

    let user = match sqlite_transaction.load_current_user()? {
        Some(mut user) => {
            user.profile_picture_path = Some(local_path.to_string());
            sqlite_transaction.update_user(&user)?;
            Some(user)
        }
        None => None,
    };

    sqlite_transaction.commit()?;
    Ok(user.into())
}
