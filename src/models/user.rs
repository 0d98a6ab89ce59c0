use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Columns selected for a [`User`]; the password hash is deliberately absent.
pub const USER_COLUMNS: &str = "id, name, email, avatar_url, created_at";

/// A user as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A full `users` row, including the stored password hash.
///
/// Only the login path reads this; everything that leaves the server goes through
/// [`User`]. Users created through `POST /users` store an empty hash.
#[derive(Debug, FromRow)]
pub struct UserRecord {
    #[sqlx(flatten)]
    pub user: User,
    pub hashed_password: String,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        record.user
    }
}

/// Payload for creating a user directly, without credentials.
///
/// Strings are stored as given; only the JSON shape is checked.
#[derive(Debug, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}
