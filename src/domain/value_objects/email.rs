//! Email value object with validation.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Email address, validated on construction. Stored case-sensitive: the
/// store keys accounts by the exact string the user signed up with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Create a new email with validation
    pub fn new(email: String) -> Result<Self, String> {
        Self::validate(&email)?;
        Ok(Self(email))
    }

    /// Get the email as a string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate email format using regex
    fn validate(email: &str) -> Result<(), String> {
        if email.is_empty() {
            return Err("Email cannot be empty".to_string());
        }

        if email.len() > 254 {
            return Err("Email is too long (maximum 254 characters)".to_string());
        }

        // RFC 5322 compliant email regex (simplified)
        let email_regex = Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$")
            .map_err(|_| "Invalid regex pattern".to_string())?;

        if !email_regex.is_match(email) {
            return Err("Invalid email format".to_string());
        }

        Ok(())
    }
}

impl FromStr for Email {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email_creation() {
        let email = Email::new("test@example.com".to_string());
        assert!(email.is_ok());
        assert_eq!(email.unwrap().as_str(), "test@example.com");
    }

    #[test]
    fn test_invalid_email_rejected() {
        assert!(Email::new("".to_string()).is_err());
        assert!(Email::new("not-an-email".to_string()).is_err());
        assert!(Email::new("missing@tld@double.com".to_string()).is_err());
    }

    #[test]
    fn test_email_is_case_sensitive() {
        let lower = Email::new("a@x.com".to_string()).unwrap();
        let upper = Email::new("A@x.com".to_string()).unwrap();
        assert_ne!(lower, upper);
    }
}
