//! Account service entry point.

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use account_service::app::{create_router, AppState};
use account_service::config::AppConfig;
use account_service::infrastructure::memory::InMemoryUserRepository;
use account_service::services::account_service::AccountService;
use account_service::services::mailer::{LogMailer, Mailer, SmtpConfig, SmtpMailer};
use account_service::services::password_service::PasswordService;
use account_service::services::token_service::TokenService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let tokens = Arc::new(TokenService::new(
        &config.auth.jwt_secret,
        config.auth.issuer.clone(),
        chrono::Duration::seconds(config.auth.session_ttl_secs),
        chrono::Duration::seconds(config.auth.verification_ttl_secs),
    ));

    let mailer: Arc<dyn Mailer> = match SmtpConfig::from_env() {
        Some(smtp) => {
            info!(host = %smtp.smtp_host, "Using SMTP mailer");
            Arc::new(SmtpMailer::new(&smtp)?)
        }
        None => {
            info!("SMTP not configured; verification links will be logged");
            Arc::new(LogMailer)
        }
    };

    let accounts = Arc::new(AccountService::new(
        Arc::new(InMemoryUserRepository::new()),
        tokens.clone(),
        PasswordService::new(),
        mailer,
        config.urls.public_base_url.clone(),
    ));

    let state = AppState {
        accounts,
        tokens,
        client_url: config.urls.client_url.clone(),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    info!(%addr, "Account service listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await.map_err(|e| {
        error!("Server error: {}", e);
        e.into()
    })
}
