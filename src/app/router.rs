//! HTTP router construction.

use axum::http::{header, HeaderValue, Method};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::app::AppState;
use crate::handlers::auth;

/// Create the application router.
///
/// - `POST /api/auth/signup`         - register + send verification email
/// - `POST /api/auth/login`          - authenticate, issue session token
/// - `POST /api/auth/profile`        - account summary (bearer token)
/// - `POST /resend-verification`     - fresh verification email
/// - `GET  /api/auth/verify/:token`  - consume verification token
/// - `GET  /health`                  - health check
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/profile", post(auth::profile))
        .route("/resend-verification", post(auth::resend_verification))
        .route("/api/auth/verify/:token", get(auth::verify_email))
        .route("/health", get(health_check))
        .layer(cors_layer())
        .with_state(state)
}

/// CORS policy: permissive for the configured origins, or any origin when
/// none are configured (the presentation client runs on a different port in
/// development).
fn cors_layer() -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    match std::env::var("ALLOWED_ORIGINS") {
        Ok(origins) if !origins.trim().is_empty() => {
            let mut layer = base;
            for origin in origins.split(',') {
                if let Ok(origin) = origin.trim().parse::<HeaderValue>() {
                    layer = layer.allow_origin(origin);
                }
            }
            layer
        }
        _ => base.allow_origin(tower_http::cors::Any),
    }
}

/// Health check endpoint
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "healthy",
        "service": "account-service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
