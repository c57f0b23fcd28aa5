//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use tracker_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    /// `None` for Google-provisioned accounts.
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Whether this account was provisioned through Google sign-in.
    pub fn is_google_account(&self) -> bool {
        self.google_id.is_some()
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub google_account: bool,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            google_account: user.is_google_account(),
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// DTO for inserting a new user.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
}

/// DTO for updating a user's profile. All fields are optional; `None`
/// leaves the column untouched.
#[derive(Debug, Default)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    /// Already-hashed replacement password, never plaintext.
    pub password_hash: Option<String>,
}
