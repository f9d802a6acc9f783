//! Password hash value object.

use serde::{Deserialize, Serialize};

/// A one-way password hash in PHC string format. Only Argon2 hashes are
/// accepted; the raw password never appears in the domain model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Create from an encoded hash string with format validation
    pub fn new(hash: String) -> Result<Self, String> {
        if hash.is_empty() {
            return Err("Password hash cannot be empty".to_string());
        }
        if !hash.starts_with("$argon2") {
            return Err("Unsupported password hash algorithm".to_string());
        }
        Ok(Self(hash))
    }

    /// Get the encoded hash string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
