pub mod password;

use serde::Deserialize;

pub use password::{
    check_credentials, check_credentials_blocking, hash_password, hash_password_blocking,
    verify_password,
};

/// Message returned for every failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Represents the payload for a new user registration request.
///
/// Only the shape is checked: any string is accepted for every field, the email
/// included.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Email address for the new account; also the login key.
    pub email: String,
    /// Password for the new account.
    pub password: String,
}
