use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationErrors};

use super::patch::{double_option, finish, reject_null};

pub const TASK_LIST_COLUMNS: &str = "id, name, emoji, owner_id, created_at";

/// Emoji given to a list when the client does not pick one.
pub const DEFAULT_LIST_EMOJI: &str = "📋";

/// Name of the list every newly registered user starts with.
pub const DEFAULT_LIST_NAME: &str = "My Tasks";

/// Emoji of the list every newly registered user starts with.
pub const DEFAULT_LIST_WELCOME_EMOJI: &str = "✅";

/// A named, emoji-tagged collection of tasks owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TaskList {
    pub id: i64,
    pub name: String,
    pub emoji: String,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Query string of `GET /lists`.
#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    pub owner_id: i64,
}

/// Payload for creating a list.
#[derive(Debug, Deserialize)]
pub struct TaskListCreate {
    pub name: String,
    /// Falls back to [`DEFAULT_LIST_EMOJI`] when omitted or `null`.
    #[serde(default)]
    pub emoji: Option<String>,
    pub owner_id: i64,
}

impl TaskListCreate {
    pub fn emoji_or_default(&self) -> &str {
        self.emoji.as_deref().unwrap_or(DEFAULT_LIST_EMOJI)
    }
}

/// Partial update of a list. Omitted fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct TaskListUpdate {
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub emoji: Option<Option<String>>,
}

impl Validate for TaskListUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        reject_null(&mut errors, "name", &self.name);
        reject_null(&mut errors, "emoji", &self.emoji);
        finish(errors)
    }
}

impl TaskListUpdate {
    /// Copies every supplied field onto `list`.
    ///
    /// Expects a payload that passed [`Validate::validate`]; stray `null`s are ignored.
    pub fn apply_to(self, list: &mut TaskList) {
        if let Some(Some(name)) = self.name {
            list.name = name;
        }
        if let Some(Some(emoji)) = self.emoji {
            list.emoji = emoji;
        }
    }
}
