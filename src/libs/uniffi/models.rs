// Rust models for the types that will be used by front-end

use crate::libs::core::models::{ChatState, ConversationMessage, ProfileState};

#[derive(Clone, Debug, PartialEq, Eq, uniffi::Record)]
pub struct Message {
    pub author: String,
    pub body: String,
}

#[derive(Clone, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum Profile {
    NoUser,
    Current {
        name: Option<String>,
        profile_picture_path: Option<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, uniffi::Record)]
pub struct ChatSnapshot {
    pub conversation: Vec<Message>,
    pub profile: Profile,
    pub last_error: Option<String>,
}

impl From<ConversationMessage> for Message {
    fn from(message: ConversationMessage) -> Self {
        Message {
            author: message.author,
            body: message.body,
        }
    }
}

impl From<ProfileState> for Profile {
    fn from(state: ProfileState) -> Self {
        match state {
            ProfileState::NoUser => Profile::NoUser,
            ProfileState::Current(profile) => Profile::Current {
                name: profile.name,
                profile_picture_path: profile.profile_picture_path,
            },
        }
    }
}

impl From<ChatState> for ChatSnapshot {
    fn from(state: ChatState) -> Self {
        ChatSnapshot {
            conversation: state.conversation.into_iter().map(Message::from).collect(),
            profile: state.profile.into(),
            last_error: state.last_error,
        }
    }
}

pub fn into_messages(conversation: Vec<ConversationMessage>) -> Vec<Message> {
    conversation.into_iter().map(Message::from).collect()
}
