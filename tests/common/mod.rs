#![allow(dead_code)]

use mobile_chat_lib::libs::bridge::{spawn_bridge, BridgeHandle};
use mobile_chat_lib::libs::core::models::{ChatState, ConversationMessage};
use mobile_chat_lib::libs::core::sample::conversation_sample;
use mobile_chat_lib::libs::storage::database::database::{database_path_in, open_database};
use mobile_chat_lib::libs::storage::database::storage_sqlite::SqliteStore;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::watch;

// Each test gets its own database file; the directory is removed on drop.
pub struct TestDb {
    pub dir: TempDir,
    pub path: String,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create test directory");
        let path = database_path_in(dir.path()).to_string_lossy().into_owned();
        Self { dir, path }
    }

    pub fn open(&self) -> SqliteStore {
        open_database(&self.path).expect("Failed to open test database")
    }
}

pub fn sample() -> Vec<ConversationMessage> {
    conversation_sample().to_vec()
}

pub fn bridge_for(db: &TestDb) -> BridgeHandle {
    spawn_bridge(db.open(), sample()).expect("Failed to start store worker")
}

/// Waits until the published state satisfies `predicate`.
pub async fn wait_for_state<F>(updates: &mut watch::Receiver<ChatState>, predicate: F) -> ChatState
where
    F: Fn(&ChatState) -> bool,
{
    tokio::time::timeout(Duration::from_secs(5), updates.wait_for(|state| predicate(state)))
        .await
        .expect("Timed out waiting for store state")
        .expect("Store worker stopped")
        .clone()
}
