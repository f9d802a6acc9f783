//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Email, PasswordHash, UserId};

/// A registered account. `verified` starts false and transitions to true
/// exactly once, via the verify-by-token operation; it never reverts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub password_hash: PasswordHash,
    pub verified: bool,
    /// Session token recorded at signup, denormalized onto the record the
    /// way the original store kept it. Never read back by this service.
    pub token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new unverified user
    pub fn new(email: Email, name: String, password_hash: PasswordHash) -> Self {
        Self {
            id: UserId::new(),
            email,
            name,
            password_hash,
            verified: false,
            token: None,
            created_at: Utc::now(),
            last_login: None,
        }
    }

    /// Mark the account's email as verified
    pub fn verify_email(&mut self) {
        self.verified = true;
    }

    /// Update the last login time
    pub fn update_last_login(&mut self) {
        self.last_login = Some(Utc::now());
    }
}
