//! Environment-driven configuration, loaded once at startup.

use rand::rngs::OsRng;
use rand::RngCore;
use tracing::warn;

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub urls: UrlConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

/// Token signing configuration. The secret is process-wide; there is no
/// key rotation.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub issuer: String,
    /// Session token lifetime in seconds.
    pub session_ttl_secs: i64,
    /// Verification token lifetime in seconds.
    pub verification_ttl_secs: i64,
}

/// External URLs embedded in emails and redirects.
#[derive(Debug, Clone)]
pub struct UrlConfig {
    /// Base URL this service is reachable at; verification links point here.
    pub public_base_url: String,
    /// Where the verify endpoint redirects after a successful verification.
    pub client_url: String,
}

impl AppConfig {
    /// Load configuration from environment variables, with development
    /// defaults for everything except the JWT secret, which is generated
    /// (and logged as a warning) when unset.
    pub fn from_env() -> Self {
        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(s) if s.len() >= 32 => s,
            Ok(_) => {
                warn!("JWT_SECRET is shorter than 32 bytes; generating a random secret instead");
                generate_secure_secret()
            }
            Err(_) => {
                warn!("JWT_SECRET not set; generating a random secret (sessions will not survive restarts)");
                generate_secure_secret()
            }
        };

        Self {
            server: ServerConfig {
                bind_address: std::env::var("BIND_ADDRESS")
                    .unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: std::env::var("PORT")
                    .unwrap_or_else(|_| "5000".to_string())
                    .parse()
                    .unwrap_or(5000),
            },
            auth: AuthConfig {
                jwt_secret,
                issuer: std::env::var("TOKEN_ISSUER")
                    .unwrap_or_else(|_| "account-service".to_string()),
                session_ttl_secs: env_i64("SESSION_TTL_SECS", 3600),
                verification_ttl_secs: env_i64("VERIFICATION_TTL_SECS", 3600),
            },
            urls: UrlConfig {
                public_base_url: std::env::var("PUBLIC_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:5000".to_string()),
                client_url: std::env::var("CLIENT_URL")
                    .unwrap_or_else(|_| "http://localhost:3000/".to_string()),
            },
        }
    }
}

fn env_i64(key: &str, default: i64) -> i64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Generate a cryptographically secure random secret for JWT signing.
fn generate_secure_secret() -> String {
    let mut key = [0u8; 32];
    OsRng.fill_bytes(&mut key);
    hex::encode(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_secret_is_long_enough() {
        let secret = generate_secure_secret();
        assert_eq!(secret.len(), 64);
        assert_ne!(secret, generate_secure_secret());
    }
}
