//! Password value object.
//!
//! System accounts never log in, so the only credential the bootstrap
//! needs to mint is an unusable one. The random suffix keeps two
//! unusable credentials from comparing equal.

use uuid::Uuid;

use crate::constants::UNUSABLE_PASSWORD_PREFIX;

/// Stored credential of a user.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .field("usable", &self.is_usable())
            .finish()
    }
}

impl Password {
    /// Create a credential that no password will ever match.
    pub fn unusable() -> Self {
        Self {
            hash: format!("{}{}", UNUSABLE_PASSWORD_PREFIX, Uuid::new_v4().simple()),
        }
    }

    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Whether this credential can ever authenticate.
    pub fn is_usable(&self) -> bool {
        !self.hash.is_empty() && !self.hash.starts_with(UNUSABLE_PASSWORD_PREFIX)
    }

    /// Get the stored hash string.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the stored hash string.
    pub fn into_inner(self) -> String {
        self.hash
    }
}
