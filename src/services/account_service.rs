//! Account operations: signup, login, profile, resend-verification, and
//! verify-by-token, orchestrated over the repository, token service, and
//! mailer.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::entities::User;
use crate::domain::repositories::{RepositoryError, UserRepository};
use crate::domain::value_objects::Email;
use crate::services::mailer::Mailer;
use crate::services::password_service::{PasswordError, PasswordService};
use crate::services::token_service::{TokenError, TokenService};

/// Account service errors
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("User already exists")]
    AlreadyExists,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("User not found")]
    NotFound,
    #[error("User is already verified")]
    AlreadyVerified,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Error sending email: {0}")]
    SendFailed(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Repository error: {0}")]
    Repository(RepositoryError),
    #[error("Token error: {0}")]
    Token(TokenError),
    #[error("Cryptographic error: {0}")]
    Crypto(String),
}

impl From<RepositoryError> for AccountError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::AlreadyExists => Self::AlreadyExists,
            RepositoryError::NotFound => Self::NotFound,
            other => Self::Repository(other),
        }
    }
}

impl From<PasswordError> for AccountError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::Validation(msg) => Self::Validation(msg),
            PasswordError::Crypto(msg) => Self::Crypto(msg),
        }
    }
}

/// Account summary returned by signup, login, and profile.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserSummary {
    pub id: String,
    pub email: String,
    pub name: String,
    pub verified: bool,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.to_string(),
            name: user.name.clone(),
            verified: user.verified,
        }
    }
}

/// Orchestrates account operations against the store, token issuer, and
/// notification sender. Holds no per-request state.
pub struct AccountService {
    repo: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
    passwords: PasswordService,
    mailer: Arc<dyn Mailer>,
    /// Base URL embedded in verification links.
    public_base_url: String,
}

impl AccountService {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        tokens: Arc<TokenService>,
        passwords: PasswordService,
        mailer: Arc<dyn Mailer>,
        public_base_url: String,
    ) -> Self {
        Self {
            repo,
            tokens,
            passwords,
            mailer,
            public_base_url,
        }
    }

    /// Register a new account and send the verification email.
    ///
    /// The account is persisted before the email is dispatched; a send
    /// failure is reported as `SendFailed` but does not roll the account
    /// back.
    pub async fn signup(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<(UserSummary, String), AccountError> {
        let email = Email::new(email.to_string()).map_err(AccountError::Validation)?;

        if self.repo.exists_by_email(&email).await? {
            return Err(AccountError::AlreadyExists);
        }

        let password_hash = self.passwords.hash_password(password)?;

        let mut user = User::new(email.clone(), name.to_string(), password_hash);
        let session_token = self
            .tokens
            .issue_session(email.as_str(), user.id.as_str())
            .map_err(AccountError::Token)?;
        user.token = Some(session_token.clone());

        self.repo.create(&user).await?;
        info!(user_id = %user.id, email = %user.email, "User registered");

        self.send_verification_email(&email).await?;

        Ok((UserSummary::from(&user), session_token))
    }

    /// Authenticate and issue a session token.
    ///
    /// Unknown email and wrong password produce the same error, so callers
    /// learn nothing about which accounts exist. Login is deliberately not
    /// gated on `verified`; unverified accounts still get session tokens.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(UserSummary, String), AccountError> {
        let email = Email::new(email.to_string()).map_err(|_| AccountError::InvalidCredentials)?;

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let matches = self
            .passwords
            .verify_password(password, &user.password_hash)?;
        if !matches {
            return Err(AccountError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue_session(user.email.as_str(), user.id.as_str())
            .map_err(AccountError::Token)?;

        self.repo
            .update_last_login(&email, chrono::Utc::now())
            .await?;
        info!(user_id = %user.id, "User logged in");

        Ok((UserSummary::from(&user), token))
    }

    /// Fetch an account summary by email.
    pub async fn profile(&self, email: &str) -> Result<UserSummary, AccountError> {
        let email = Email::new(email.to_string()).map_err(|_| AccountError::NotFound)?;
        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AccountError::NotFound)?;
        Ok(UserSummary::from(&user))
    }

    /// Issue a fresh verification token and resend the email.
    pub async fn resend_verification(&self, email: &str) -> Result<(), AccountError> {
        let email = Email::new(email.to_string()).map_err(|_| AccountError::NotFound)?;

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AccountError::NotFound)?;

        if user.verified {
            return Err(AccountError::AlreadyVerified);
        }

        self.send_verification_email(&email).await?;
        info!(user_id = %user.id, "Verification email resent");
        Ok(())
    }

    /// Consume a verification token and mark the matching account verified.
    ///
    /// Idempotent in effect: re-verifying an already-verified account with a
    /// still-valid token succeeds again.
    pub async fn verify_by_token(&self, token: &str) -> Result<(), AccountError> {
        let email = self
            .tokens
            .verify_verification(token)
            .map_err(|_| AccountError::InvalidToken)?;
        let email = Email::new(email).map_err(|_| AccountError::InvalidToken)?;

        // A valid token for an account the store no longer knows is
        // indistinguishable from a stale one to the caller.
        self.repo
            .mark_verified(&email)
            .await
            .map_err(|_| AccountError::InvalidToken)?;

        info!(email = %email, "Email verified");
        Ok(())
    }

    async fn send_verification_email(&self, email: &Email) -> Result<(), AccountError> {
        let token = self
            .tokens
            .issue_verification(email.as_str())
            .map_err(AccountError::Token)?;
        let verify_url = format!(
            "{}/api/auth/verify/{}",
            self.public_base_url.trim_end_matches('/'),
            token
        );

        self.mailer
            .send_verification(email.as_str(), &verify_url)
            .await
            .map_err(|e| {
                warn!(email = %email, error = %e, "Verification email dispatch failed");
                AccountError::SendFailed(e.to_string())
            })
    }
}
