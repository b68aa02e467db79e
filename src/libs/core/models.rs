use rusqlite::types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::ToSql;

/// Auto-assigned row identity of a stored record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(pub i64);

impl From<i64> for RowId {
    fn from(id: i64) -> RowId {
        RowId(id)
    }
}

impl ToSql for RowId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0))
    }
}

impl FromSql for RowId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_i64().map(RowId)
    }
}

/// What the conversation list renders for a single message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversationMessage {
    pub author: String,
    pub body: String,
}

impl ConversationMessage {
    pub fn new(author: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            body: body.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Profile {
    pub name: Option<String>,
    pub profile_picture_path: Option<String>,
}

/// The current user as seen by the settings screen. `NoUser` is a normal
/// answer for an empty user table, not an error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ProfileState {
    #[default]
    NoUser,
    Current(Profile),
}

impl ProfileState {
    pub fn name(&self) -> Option<&str> {
        match self {
            ProfileState::Current(profile) => profile.name.as_deref(),
            ProfileState::NoUser => None,
        }
    }

    pub fn profile_picture_path(&self) -> Option<&str> {
        match self {
            ProfileState::Current(profile) => profile.profile_picture_path.as_deref(),
            ProfileState::NoUser => None,
        }
    }
}

/// Snapshot published by the store worker after every operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatState {
    pub conversation: Vec<ConversationMessage>,
    pub profile: ProfileState,
    pub last_error: Option<String>,
}
