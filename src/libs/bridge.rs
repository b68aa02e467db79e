use crate::libs::core::models::{ChatState, ConversationMessage, ProfileState};
use crate::libs::storage::database::storage_sqlite::SqliteStore;
use crate::libs::storage::database::storage_traits::StoreError;
use crate::libs::storage::lib_sqlite_impl;
use std::thread;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error};

const REQUEST_QUEUE_DEPTH: usize = 64;
const WORKER_THREAD_NAME: &str = "chat-store";

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Store worker has shut down")]
    Closed,
    #[error("Store worker queue is full")]
    Busy,
    #[error("Failed to start store worker: {0}")]
    Spawn(std::io::Error),
}

/// An operation posted without waiting for its result. The outcome only
/// shows up in the published [`ChatState`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BridgeOp {
    EnsureSeeded,
    LoadConversation,
    AppendMessage { author: String, body: String },
    LoadProfile,
    UpdateProfileName(String),
    UpdateProfilePicture(String),
}

type Reply<T> = Option<oneshot::Sender<Result<T, StoreError>>>;

enum BridgeRequest {
    EnsureSeeded { reply: Reply<()> },
    LoadConversation { reply: Reply<Vec<ConversationMessage>> },
    AppendMessage { author: String, body: String, reply: Reply<Vec<ConversationMessage>> },
    LoadProfile { reply: Reply<ProfileState> },
    UpdateProfileName { name: String, reply: Reply<ProfileState> },
    UpdateProfilePicture { path: String, reply: Reply<ProfileState> },
}

impl std::fmt::Debug for BridgeRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BridgeRequest::EnsureSeeded { .. } => "EnsureSeeded",
            BridgeRequest::LoadConversation { .. } => "LoadConversation",
            BridgeRequest::AppendMessage { .. } => "AppendMessage",
            BridgeRequest::LoadProfile { .. } => "LoadProfile",
            BridgeRequest::UpdateProfileName { .. } => "UpdateProfileName",
            BridgeRequest::UpdateProfilePicture { .. } => "UpdateProfilePicture",
        };
        f.write_str(name)
    }
}

impl From<BridgeOp> for BridgeRequest {
    fn from(op: BridgeOp) -> Self {
        match op {
            BridgeOp::EnsureSeeded => BridgeRequest::EnsureSeeded { reply: None },
            BridgeOp::LoadConversation => BridgeRequest::LoadConversation { reply: None },
            BridgeOp::AppendMessage { author, body } => BridgeRequest::AppendMessage {
                author,
                body,
                reply: None,
            },
            BridgeOp::LoadProfile => BridgeRequest::LoadProfile { reply: None },
            BridgeOp::UpdateProfileName(name) => {
                BridgeRequest::UpdateProfileName { name, reply: None }
            }
            BridgeOp::UpdateProfilePicture(path) => {
                BridgeRequest::UpdateProfilePicture { path, reply: None }
            }
        }
    }
}

/// A message is only stored with a named author and a non-blank body.
pub fn is_sendable(author: &str, body: &str) -> bool {
    !author.is_empty() && !body.trim().is_empty()
}

/// Starts the worker that owns `store`. It runs until every handle is dropped.
pub fn spawn_bridge(
    store: SqliteStore,
    sample: Vec<ConversationMessage>,
) -> Result<BridgeHandle, BridgeError> {
    let (requests, receiver) = mpsc::channel(REQUEST_QUEUE_DEPTH);
    let (state_sender, state) = watch::channel(ChatState::default());

    let worker = SyncWorker {
        store,
        sample,
        state: state_sender,
    };

    thread::Builder::new()
        .name(WORKER_THREAD_NAME.to_string())
        .spawn(move || worker.run(receiver))
        .map_err(BridgeError::Spawn)?;

    Ok(BridgeHandle { requests, state })
}

#[derive(Clone, Debug)]
pub struct BridgeHandle {
    requests: mpsc::Sender<BridgeRequest>,
    state: watch::Receiver<ChatState>,
}

impl BridgeHandle {
    pub async fn ensure_seeded(&self) -> Result<(), BridgeError> {
        let (reply, response) = oneshot::channel();
        self.dispatch(BridgeRequest::EnsureSeeded { reply: Some(reply) })
            .await?;
        await_reply(response).await
    }

    pub async fn load_conversation(&self) -> Result<Vec<ConversationMessage>, BridgeError> {
        let (reply, response) = oneshot::channel();
        self.dispatch(BridgeRequest::LoadConversation { reply: Some(reply) })
            .await?;
        await_reply(response).await
    }

    /// Stores one message and returns the whole conversation. Blank input
    /// stores nothing and just returns the conversation as it is.
    pub async fn append_message(
        &self,
        author: &str,
        body: &str,
    ) -> Result<Vec<ConversationMessage>, BridgeError> {
        let (reply, response) = oneshot::channel();
        self.dispatch(BridgeRequest::AppendMessage {
            author: author.to_string(),
            body: body.to_string(),
            reply: Some(reply),
        })
        .await?;
        await_reply(response).await
    }

    pub async fn load_profile(&self) -> Result<ProfileState, BridgeError> {
        let (reply, response) = oneshot::channel();
        self.dispatch(BridgeRequest::LoadProfile { reply: Some(reply) })
            .await?;
        await_reply(response).await
    }

    pub async fn update_profile_name(&self, new_name: &str) -> Result<ProfileState, BridgeError> {
        let (reply, response) = oneshot::channel();
        self.dispatch(BridgeRequest::UpdateProfileName {
            name: new_name.to_string(),
            reply: Some(reply),
        })
        .await?;
        await_reply(response).await
    }

    pub async fn update_profile_picture(
        &self,
        local_path: &str,
    ) -> Result<ProfileState, BridgeError> {
        let (reply, response) = oneshot::channel();
        self.dispatch(BridgeRequest::UpdateProfilePicture {
            path: local_path.to_string(),
            reply: Some(reply),
        })
        .await?;
        await_reply(response).await
    }

    /// Fire-and-forget: queue `op` without waiting. Never blocks; a full
    /// queue is reported instead.
    pub fn post(&self, op: BridgeOp) -> Result<(), BridgeError> {
        self.requests
            .try_send(op.into())
            .map_err(|err| match err {
                mpsc::error::TrySendError::Full(_) => BridgeError::Busy,
                mpsc::error::TrySendError::Closed(_) => BridgeError::Closed,
            })
    }

    pub fn subscribe(&self) -> watch::Receiver<ChatState> {
        self.state.clone()
    }

    pub fn snapshot(&self) -> ChatState {
        self.state.borrow().clone()
    }

    async fn dispatch(&self, request: BridgeRequest) -> Result<(), BridgeError> {
        self.requests
            .send(request)
            .await
            .map_err(|_| BridgeError::Closed)
    }
}

async fn await_reply<T>(response: oneshot::Receiver<Result<T, StoreError>>) -> Result<T, BridgeError> {
    Ok(response.await.map_err(|_| BridgeError::Closed)??)
}

struct SyncWorker {
    store: SqliteStore,
    sample: Vec<ConversationMessage>,
    state: watch::Sender<ChatState>,
}

impl SyncWorker {
    fn run(self, mut requests: mpsc::Receiver<BridgeRequest>) {
        while let Some(request) = requests.blocking_recv() {
            debug!(?request, "Store request");
            self.handle(request);
        }
        debug!("Store worker stopped");
    }

    fn handle(&self, request: BridgeRequest) {
        match request {
            BridgeRequest::EnsureSeeded { reply } => {
                let result = self.seed();
                self.publish(&result, |(conversation, profile), state| {
                    state.conversation = conversation.clone();
                    state.profile = profile.clone();
                });
                respond(reply, result.map(|_| ()));
            }
            BridgeRequest::LoadConversation { reply } => {
                let result = lib_sqlite_impl::load_conversation(&self.store);
                self.publish(&result, |conversation, state| {
                    state.conversation = conversation.clone();
                });
                respond(reply, result);
            }
            BridgeRequest::AppendMessage {
                author,
                body,
                reply,
            } => {
                let result = if is_sendable(&author, &body) {
                    lib_sqlite_impl::append_message(&self.store, &author, &body)
                } else {
                    debug!(%author, "Ignoring blank message");
                    lib_sqlite_impl::load_conversation(&self.store)
                };
                self.publish(&result, |conversation, state| {
                    state.conversation = conversation.clone();
                });
                respond(reply, result);
            }
            BridgeRequest::LoadProfile { reply } => {
                let result = lib_sqlite_impl::load_profile(&self.store);
                self.publish_profile(&result);
                respond(reply, result);
            }
            BridgeRequest::UpdateProfileName { name, reply } => {
                let result = lib_sqlite_impl::update_profile_name(&self.store, &name);
                self.publish_profile(&result);
                respond(reply, result);
            }
            BridgeRequest::UpdateProfilePicture { path, reply } => {
                let result = lib_sqlite_impl::update_profile_picture(&self.store, &path);
                self.publish_profile(&result);
                respond(reply, result);
            }
        }
    }

    fn seed(&self) -> Result<(Vec<ConversationMessage>, ProfileState), StoreError> {
        lib_sqlite_impl::ensure_seeded(&self.store, &self.sample)?;
        Ok((
            lib_sqlite_impl::load_conversation(&self.store)?,
            lib_sqlite_impl::load_profile(&self.store)?,
        ))
    }

    fn publish_profile(&self, result: &Result<ProfileState, StoreError>) {
        self.publish(result, |profile, state| state.profile = profile.clone());
    }

    // Failures become `last_error`; the next success clears it.
    fn publish<T>(&self, result: &Result<T, StoreError>, apply: impl FnOnce(&T, &mut ChatState)) {
        self.state.send_modify(|state| match result {
            Ok(value) => {
                apply(value, state);
                state.last_error = None;
            }
            Err(err) => {
                error!(%err, "Store operation failed");
                state.last_error = Some(err.to_string());
            }
        });
    }
}

fn respond<T>(reply: Reply<T>, result: Result<T, StoreError>) {
    if let Some(reply) = reply {
        if reply.send(result).is_err() {
            debug!("Caller stopped waiting for the store reply");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_bodies_and_missing_authors_are_not_sendable() {
        assert!(is_sendable("alice", "hi"));
        assert!(!is_sendable("alice", "   "));
        assert!(!is_sendable("alice", "\n\t"));
        assert!(!is_sendable("", "hi"));
    }
}
