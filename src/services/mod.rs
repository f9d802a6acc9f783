//! Application services.

pub mod account_service;
pub mod mailer;
pub mod password_service;
pub mod token_service;

pub use account_service::{AccountError, AccountService, UserSummary};
pub use mailer::{LogMailer, Mailer, MailerError, SmtpMailer};
pub use password_service::PasswordService;
pub use token_service::{SessionClaims, TokenClaims, TokenError, TokenPurpose, TokenService};
