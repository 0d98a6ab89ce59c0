use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationErrors};

use super::patch::{double_option, finish, reject_null};
use super::timestamp;

pub const TASK_COLUMNS: &str = "id, title, priority, completed, due_date, list_id, created_at";

/// Represents the priority of a task.
/// Stored as its variant name in the `tasks.priority` TEXT column.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub priority: Priority,
    pub completed: bool,
    pub due_date: Option<DateTime<Utc>>,
    /// The list this task belongs to.
    pub list_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Query string of `GET /tasks`.
#[derive(Debug, Deserialize)]
pub struct TaskQuery {
    pub list_id: i64,
}

/// Payload for creating a task.
#[derive(Debug, Deserialize)]
pub struct TaskCreate {
    pub title: String,
    /// Defaults to [`Priority::Medium`] when omitted or `null`.
    #[serde(default)]
    pub priority: Option<Priority>,
    /// RFC 3339, or a naive date-time read as UTC.
    #[serde(default, deserialize_with = "timestamp::optional")]
    pub due_date: Option<DateTime<Utc>>,
    pub list_id: i64,
}

/// Partial update of a task. Omitted fields are left untouched; `due_date: null`
/// clears the due date.
#[derive(Debug, Default, Deserialize)]
pub struct TaskUpdate {
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub priority: Option<Option<Priority>>,
    #[serde(default, deserialize_with = "double_option")]
    pub completed: Option<Option<bool>>,
    #[serde(default, deserialize_with = "timestamp::double_optional")]
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl Validate for TaskUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        reject_null(&mut errors, "title", &self.title);
        reject_null(&mut errors, "priority", &self.priority);
        reject_null(&mut errors, "completed", &self.completed);
        finish(errors)
    }
}

impl TaskUpdate {
    /// Copies every supplied field onto `task`.
    pub fn apply_to(self, task: &mut Task) {
        if let Some(Some(title)) = self.title {
            task.title = title;
        }
        if let Some(Some(priority)) = self.priority {
            task.priority = priority;
        }
        if let Some(Some(completed)) = self.completed {
            task.completed = completed;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
    }
}
