//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::password::Password;

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub is_active: bool,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub date_joined: DateTime<Utc>,
}

impl User {
    /// Stored credential as a value object
    pub fn password(&self) -> Password {
        Password::from_hash(self.password_hash.clone())
    }

    /// Check if the user can log in with a password
    pub fn has_usable_password(&self) -> bool {
        self.password().is_usable()
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.username)
    }
}

/// Fields of a user to create, keyed by username
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub full_name: String,
    pub is_active: bool,
    pub password: Password,
}

impl NewUser {
    /// Active account that can never authenticate
    pub fn service_account(username: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            full_name: full_name.into(),
            is_active: true,
            password: Password::unusable(),
        }
    }
}
