//! User Repository Interface
//!
//! Defines the contract for user data access. The store is an external
//! collaborator reached through lookup-by-email, create, and
//! update-by-email operations; email uniqueness is enforced here and is
//! the only guard against duplicate-signup races.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::entities::User;
use crate::domain::value_objects::{Email, UserId};

/// Repository operation errors
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,
    #[error("Entity already exists")]
    AlreadyExists,
    #[error("Storage error: {0}")]
    Storage(String),
}

/// User repository trait defining the contract for user data access
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their email address
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    /// Find a user by their unique ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// Persist a new user; fails with `AlreadyExists` if the email is taken
    async fn create(&self, user: &User) -> Result<(), RepositoryError>;

    /// Set the verified flag on the account with the given email
    async fn mark_verified(&self, email: &Email) -> Result<(), RepositoryError>;

    /// Record a login time on the account with the given email
    async fn update_last_login(
        &self,
        email: &Email,
        login_time: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;

    /// Check if a user exists with the given email
    async fn exists_by_email(&self, email: &Email) -> Result<bool, RepositoryError>;

    /// Count total users
    async fn count(&self) -> Result<usize, RepositoryError>;
}
