use crate::libs::bridge::{spawn_bridge, BridgeHandle, BridgeOp};
use crate::libs::completion::CompletionClient;
use crate::libs::config::ChatConfig;
use crate::libs::core::models::ChatState;
use crate::libs::core::sample::conversation_sample;
use crate::libs::logging::init_logging;
use crate::libs::notice::{notify_backgrounded, NoticeSink};
use crate::libs::profile_image::save_profile_picture;
use crate::libs::storage::database::database::{open_database, open_in_memory};
use crate::libs::storage::database::storage_sqlite::SqliteStore;
use crate::libs::uniffi::models::{into_messages, ChatSnapshot, Message, Profile};
use crate::DatabaseError;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::info;

/// One open chat store plus the completion client, owned by the host's
/// presentation layer and passed down to the screens that need it.
#[derive(uniffi::Object)]
pub struct ChatSession {
    bridge: BridgeHandle,
    completion: CompletionClient,
    updates: Mutex<watch::Receiver<ChatState>>,
}

impl ChatSession {
    /// Wraps an already migrated store. Seeding, when enabled, is queued
    /// ahead of anything the caller sends.
    pub fn with_store(store: SqliteStore, config: ChatConfig) -> Result<Self, DatabaseError> {
        let bridge = spawn_bridge(store, conversation_sample().to_vec())?;

        if config.seed_sample_data {
            bridge.post(BridgeOp::EnsureSeeded)?;
        } else {
            bridge.post(BridgeOp::LoadConversation)?;
            bridge.post(BridgeOp::LoadProfile)?;
        }

        let updates = Mutex::new(bridge.subscribe());
        Ok(Self {
            bridge,
            completion: CompletionClient::new(config.completion.with_env_api_key()),
            updates,
        })
    }
}

#[uniffi::export(async_runtime = "tokio")]
impl ChatSession {
    #[uniffi::constructor]
    pub fn open(config: ChatConfig) -> Result<Arc<Self>, DatabaseError> {
        init_logging(config.log_filter.as_deref());

        let store = if config.database_path.is_empty() {
            open_in_memory()
        } else {
            open_database(&config.database_path)
        }
        .map_err(|e| DatabaseError::InitializationError(e.to_string()))?;

        info!(seed = config.seed_sample_data, "Chat session opened");
        Ok(Arc::new(Self::with_store(store, config)?))
    }

    pub async fn ensure_seeded(&self) -> Result<(), DatabaseError> {
        Ok(self.bridge.ensure_seeded().await?)
    }

    pub async fn load_conversation(&self) -> Result<Vec<Message>, DatabaseError> {
        Ok(into_messages(self.bridge.load_conversation().await?))
    }

    pub async fn append_message(&self, author: String, body: String) -> Result<Vec<Message>, DatabaseError> {
        Ok(into_messages(
            self.bridge.append_message(&author, &body).await?,
        ))
    }

    /// Sends `body` as the current user. Without a named user nothing is
    /// stored.
    pub async fn send_message(&self, body: String) -> Result<Vec<Message>, DatabaseError> {
        let profile = self.bridge.load_profile().await?;
        let author = profile.name().unwrap_or_default().to_string();
        self.append_message(author, body).await
    }

    pub async fn load_profile(&self) -> Result<Profile, DatabaseError> {
        Ok(self.bridge.load_profile().await?.into())
    }

    pub async fn update_profile_name(&self, new_name: String) -> Result<Profile, DatabaseError> {
        Ok(self.bridge.update_profile_name(&new_name).await?.into())
    }

    pub async fn update_profile_picture(&self, local_path: String) -> Result<Profile, DatabaseError> {
        Ok(self.bridge.update_profile_picture(&local_path).await?.into())
    }

    /// Copies a picked image into `files_dir` and makes it the profile picture.
    pub async fn import_profile_picture(
        &self,
        source_path: String,
        files_dir: String,
    ) -> Result<Profile, DatabaseError> {
        let saved = tokio::task::spawn_blocking(move || {
            save_profile_picture(&PathBuf::from(source_path), &PathBuf::from(files_dir))
        })
        .await
        .map_err(|e| DatabaseError::StorageError(e.to_string()))??;

        self.update_profile_picture(saved.to_string_lossy().into_owned())
            .await
    }

    pub fn post_message(&self, author: String, body: String) -> Result<(), DatabaseError> {
        Ok(self.bridge.post(BridgeOp::AppendMessage { author, body })?)
    }

    pub fn post_profile_name(&self, new_name: String) -> Result<(), DatabaseError> {
        Ok(self.bridge.post(BridgeOp::UpdateProfileName(new_name))?)
    }

    pub fn post_profile_picture(&self, local_path: String) -> Result<(), DatabaseError> {
        Ok(self.bridge.post(BridgeOp::UpdateProfilePicture(local_path))?)
    }

    pub fn post_refresh(&self) -> Result<(), DatabaseError> {
        self.bridge.post(BridgeOp::LoadConversation)?;
        Ok(self.bridge.post(BridgeOp::LoadProfile)?)
    }

    pub fn current_state(&self) -> ChatSnapshot {
        self.bridge.snapshot().into()
    }

    /// Waits for the next published state. Hosts call this in a loop to
    /// drive their UI.
    pub async fn next_state(&self) -> Result<ChatSnapshot, DatabaseError> {
        let mut updates = self.updates.lock().await;
        updates.changed().await.map_err(|_| {
            DatabaseError::WorkerUnavailable("Store worker has shut down".to_string())
        })?;
        let state = updates.borrow_and_update().clone();
        Ok(state.into())
    }

    /// Never fails: errors come back as text starting with `Error:`.
    pub async fn request_completion(&self, prompt: Option<String>) -> String {
        match prompt {
            Some(prompt) => self.completion.complete(&prompt).await,
            None => self.completion.get_message().await,
        }
    }

    pub fn app_backgrounded(&self, sink: Box<dyn NoticeSink>) {
        notify_backgrounded(sink.as_ref());
    }
}
