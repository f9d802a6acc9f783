//! Repository contracts for external persistence collaborators.

pub mod user_repository;

pub use user_repository::{RepositoryError, UserRepository};
