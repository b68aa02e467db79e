use crate::libs::core::models::{ConversationMessage, Profile, ProfileState, RowId};

#[derive(Clone, Debug, PartialEq)]
pub struct UserRecord {
    pub user_id: RowId,
    pub name: Option<String>,
    pub profile_picture_path: Option<String>,
}

impl UserRecord {
    pub fn from_db(
        user_id: RowId,
        name: Option<String>,
        profile_picture_path: Option<String>,
    ) -> Self {
        Self {
            user_id,
            name,
            profile_picture_path,
        }
    }
}

impl From<UserRecord> for Profile {
    fn from(record: UserRecord) -> Self {
        Profile {
            name: record.name,
            profile_picture_path: record.profile_picture_path,
        }
    }
}

impl From<Option<UserRecord>> for ProfileState {
    fn from(record: Option<UserRecord>) -> Self {
        match record {
            Some(user) => ProfileState::Current(user.into()),
            None => ProfileState::NoUser,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MessageRecord {
    pub message_id: RowId,
    pub author: String,
    pub body: String,
}

impl MessageRecord {
    pub fn from_db(message_id: RowId, author: String, body: String) -> Self {
        Self {
            message_id,
            author,
            body,
        }
    }
}

impl From<MessageRecord> for ConversationMessage {
    fn from(record: MessageRecord) -> Self {
        ConversationMessage {
            author: record.author,
            body: record.body,
        }
    }
}
