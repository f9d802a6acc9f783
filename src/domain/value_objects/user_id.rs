//! User ID value object.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Opaque, store-assigned user identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Create a new user ID from a fresh UUID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create a user ID from a string with validation
    pub fn from_string(id: String) -> Result<Self, String> {
        if id.is_empty() {
            return Err("User ID cannot be empty".to_string());
        }
        if !id
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            return Err("User ID contains invalid characters".to_string());
        }
        Ok(Self(id))
    }

    /// Get the ID as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the ID as a UUID (if valid)
    pub fn as_uuid(&self) -> Option<Uuid> {
        Uuid::from_str(&self.0).ok()
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
