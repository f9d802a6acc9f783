//! Application wiring: shared state and router construction.

pub mod router;

use std::sync::Arc;

use crate::services::account_service::AccountService;
use crate::services::token_service::TokenService;

/// Shared application state handed to every handler. Built once at startup
/// from explicit configuration; handlers hold no other state.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub tokens: Arc<TokenService>,
    /// Where the verify endpoint redirects after success.
    pub client_url: String,
}

pub use router::create_router;
