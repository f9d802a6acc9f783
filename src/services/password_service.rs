//! Secure password hashing service.
//!
//! Argon2id with a per-record random salt, encoded as PHC strings.

use argon2::password_hash::{rand_core::OsRng, PasswordHash as PhcHash, PasswordHasher,
    PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use thiserror::Error;

use crate::domain::value_objects::PasswordHash;

/// Password service errors
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Cryptographic error: {0}")]
    Crypto(String),
}

/// Configuration for password hashing parameters
#[derive(Debug, Clone)]
pub struct PasswordHashConfig {
    /// Memory cost parameter (in KiB)
    pub memory_cost: u32,
    /// Time cost parameter (iterations)
    pub time_cost: u32,
    /// Parallelism parameter (threads)
    pub parallelism: u32,
    /// Output length (in bytes)
    pub output_length: usize,
}

impl Default for PasswordHashConfig {
    fn default() -> Self {
        Self {
            // OWASP recommended parameters for 2024
            memory_cost: 65536, // 64 MiB
            time_cost: 3,
            parallelism: 4,
            output_length: 32,
        }
    }
}

/// Secure password hashing service
pub struct PasswordService {
    argon2: Argon2<'static>,
}

impl PasswordService {
    /// Create a new password service with default configuration
    pub fn new() -> Self {
        Self::with_config(PasswordHashConfig::default())
    }

    /// Create a new password service with custom configuration
    pub fn with_config(config: PasswordHashConfig) -> Self {
        let params = Params::new(
            config.memory_cost,
            config.time_cost,
            config.parallelism,
            Some(config.output_length),
        )
        .expect("Invalid Argon2 parameters");

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        Self { argon2 }
    }

    /// Hash a password with a randomly generated salt
    pub fn hash_password(&self, password: &str) -> Result<PasswordHash, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::Validation(
                "Password cannot be empty".to_string(),
            ));
        }

        if password.len() < 8 {
            return Err(PasswordError::Validation(
                "Password must be at least 8 characters long".to_string(),
            ));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::Crypto(format!("Password hashing failed: {e}")))?;

        PasswordHash::new(hash.to_string()).map_err(PasswordError::Validation)
    }

    /// Verify a password against a stored hash in constant time
    pub fn verify_password(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordError> {
        if password.is_empty() {
            return Ok(false);
        }

        let parsed = PhcHash::new(hash.as_str())
            .map_err(|e| PasswordError::Crypto(format!("Invalid stored hash: {e}")))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

impl Default for PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_service() -> PasswordService {
        PasswordService::with_config(PasswordHashConfig {
            memory_cost: 8192,
            time_cost: 1,
            parallelism: 1,
            output_length: 32,
        })
    }

    #[test]
    fn test_password_hashing() {
        let service = fast_service();
        let hash = service.hash_password("secure_password_123!").unwrap();
        assert!(hash.as_str().starts_with("$argon2id$"));
    }

    #[test]
    fn test_password_validation() {
        let service = fast_service();

        // Empty password should fail
        assert!(service.hash_password("").is_err());

        // Short password should fail
        assert!(service.hash_password("short").is_err());

        // Valid password should work
        assert!(service.hash_password("valid_password_123").is_ok());
    }

    #[test]
    fn test_verify_roundtrip() {
        let service = fast_service();
        let hash = service.hash_password("secure_password_123!").unwrap();

        assert!(service.verify_password("secure_password_123!", &hash).unwrap());
        assert!(!service.verify_password("wrong_password", &hash).unwrap());
        assert!(!service.verify_password("", &hash).unwrap());
    }

    #[test]
    fn test_salts_are_per_record() {
        let service = fast_service();
        let a = service.hash_password("same_password_123").unwrap();
        let b = service.hash_password("same_password_123").unwrap();
        assert_ne!(a.as_str(), b.as_str());
    }
}
