//! Verification email dispatch.
//!
//! The notification sender is an external collaborator; it is modeled as a
//! trait returning a synchronous `Result` so callers decide explicitly what
//! a send failure means for the request. There are no retries.

use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::info;

/// Mailer errors
#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Invalid message: {0}")]
    Message(String),
    #[error("Email dispatch failed: {0}")]
    Send(String),
}

/// Delivers the verification email containing a link that embeds the token.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_verification(&self, to: &str, verify_url: &str) -> Result<(), MailerError>;
}

/// SMTP configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
    pub use_tls: bool,
}

impl SmtpConfig {
    /// Load from `SMTP_*` environment variables; `None` when not configured.
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        let smtp_port = std::env::var("SMTP_PORT").ok()?.parse().ok()?;
        let username = std::env::var("SMTP_USERNAME").ok()?;
        let password = std::env::var("SMTP_PASSWORD").ok()?;
        let from_address = std::env::var("SMTP_FROM_ADDRESS").ok()?;
        let use_tls =
            std::env::var("SMTP_USE_TLS").unwrap_or_else(|_| "true".to_string()) == "true";

        Some(Self {
            smtp_host,
            smtp_port,
            username,
            password,
            from_address,
            use_tls,
        })
    }
}

/// Mailer backed by an async SMTP transport
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailerError> {
        let creds = Credentials::new(config.username.clone(), config.password.clone());

        let transport = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
                .map_err(|e| MailerError::Send(e.to_string()))?
                .port(config.smtp_port)
                .credentials(creds)
                .build()
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .credentials(creds)
                .build()
        };

        let from = config
            .from_address
            .parse()
            .map_err(|_| MailerError::Message("Invalid from address".to_string()))?;

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_verification(&self, to: &str, verify_url: &str) -> Result<(), MailerError> {
        let to_mailbox: Mailbox = to
            .parse()
            .map_err(|_| MailerError::Message(format!("Invalid recipient address: {to}")))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to_mailbox)
            .subject("Please verify your email")
            .header(ContentType::TEXT_HTML)
            .body(verification_body(verify_url))
            .map_err(|e| MailerError::Message(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| MailerError::Send(e.to_string()))?;

        Ok(())
    }
}

/// Fallback mailer for deployments without SMTP credentials: logs the
/// verification link instead of delivering it.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_verification(&self, to: &str, verify_url: &str) -> Result<(), MailerError> {
        info!(recipient = %to, url = %verify_url, "SMTP not configured; verification link logged");
        Ok(())
    }
}

fn verification_body(verify_url: &str) -> String {
    format!(
        r#"<html>
  <body style="font-family: Arial, sans-serif;">
    <div style="max-width: 600px; margin: auto; padding: 20px;">
      <h2>Welcome to Our Service!</h2>
      <p>Thank you for signing up! Please click the button below to verify your email address and activate your account.</p>
      <p style="text-align: center; margin: 20px 0;">
        <a href="{verify_url}" style="display: inline-block; padding: 15px 25px; color: #ffffff; background-color: #7F2DF1; text-decoration: none; border-radius: 5px;">Verify Email</a>
      </p>
      <p>If you did not sign up for this account, please ignore this email.</p>
    </div>
  </body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_embeds_the_link() {
        let body = verification_body("http://localhost:5000/api/auth/verify/abc.def.ghi");
        assert!(body.contains("http://localhost:5000/api/auth/verify/abc.def.ghi"));
        assert!(body.contains("Verify Email"));
    }

    #[tokio::test]
    async fn log_mailer_always_succeeds() {
        let mailer = LogMailer;
        assert!(mailer
            .send_verification("a@x.com", "http://localhost/verify/t")
            .await
            .is_ok());
    }
}
