//! Account Service
//!
//! A small user account service: signup with email verification, login
//! issuing bearer tokens, and profile retrieval. Tokens are signed JWTs
//! carrying a tagged purpose (`session` or `verification`) so one kind can
//! never be accepted in place of the other.

pub mod app;
pub mod config;
pub mod domain;
pub mod handlers;
pub mod infrastructure;
pub mod services;

pub use app::{create_router, AppState};
pub use config::AppConfig;
