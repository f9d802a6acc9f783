//! In-memory user repository.
//!
//! Keeps accounts in a map keyed by email behind an async RwLock. Insertion
//! checks uniqueness under the write lock, so concurrent duplicate signups
//! cannot both succeed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::User;
use crate::domain::repositories::{RepositoryError, UserRepository};
use crate::domain::value_objects::{Email, UserId};

/// In-memory `UserRepository` implementation
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.get(email.as_str()).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.id == *id).cloned())
    }

    async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;
        if users.contains_key(user.email.as_str()) {
            return Err(RepositoryError::AlreadyExists);
        }
        users.insert(user.email.as_str().to_string(), user.clone());
        Ok(())
    }

    async fn mark_verified(&self, email: &Email) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(email.as_str())
            .ok_or(RepositoryError::NotFound)?;
        user.verify_email();
        Ok(())
    }

    async fn update_last_login(
        &self,
        email: &Email,
        login_time: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(email.as_str())
            .ok_or(RepositoryError::NotFound)?;
        user.last_login = Some(login_time);
        Ok(())
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.contains_key(email.as_str()))
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.len())
    }
}
