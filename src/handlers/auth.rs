//! Authentication endpoints: signup, login, profile, resend-verification,
//! and verify-by-token.
//!
//! Handlers validate input, call into `AccountService`, and map domain
//! errors onto the fixed statuses and JSON bodies of the wire contract.
//! All failures are terminal for the request; there are no retries.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Redirect,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use validator::Validate;

use crate::app::AppState;
use crate::services::account_service::{AccountError, UserSummary};

/// Error response body used by the `/api/auth` routes
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Response body used by the resend-verification route, which historically
/// speaks in `message` keys rather than `error`.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

// Request/response models

/// Signup request
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Profile request
#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub email: String,
}

/// Resend-verification request
#[derive(Debug, Deserialize, Default)]
pub struct ResendVerificationRequest {
    #[serde(default)]
    pub email: String,
}

/// Signup response: account summary plus a session-scope token
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub success: String,
    pub user: SignupUser,
}

#[derive(Debug, Serialize)]
pub struct SignupUser {
    #[serde(flatten)]
    pub summary: UserSummary,
    pub token: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserSummary,
}

type ErrorReply = (StatusCode, Json<ErrorBody>);

fn error_reply(status: StatusCode, message: &str) -> ErrorReply {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
}

/// Map an account error onto the signup route's wire contract.
fn signup_error(err: AccountError) -> ErrorReply {
    match err {
        AccountError::AlreadyExists => error_reply(StatusCode::BAD_REQUEST, "User already exists"),
        AccountError::Validation(msg) => error_reply(StatusCode::BAD_REQUEST, &msg),
        AccountError::SendFailed(_) => {
            error_reply(StatusCode::INTERNAL_SERVER_ERROR, "Error sending email")
        }
        other => {
            error!(error = %other, "Signup failed");
            error_reply(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        }
    }
}

/// `POST /api/auth/signup`
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<SignupResponse>, ErrorReply> {
    if let Err(errors) = request.validate() {
        return Err(error_reply(StatusCode::BAD_REQUEST, &validation_message(&errors)));
    }

    let (summary, token) = state
        .accounts
        .signup(&request.email, &request.name, &request.password)
        .await
        .map_err(signup_error)?;

    Ok(Json(SignupResponse {
        success: "Signup successful, please verify your email".to_string(),
        user: SignupUser { summary, token },
    }))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ErrorReply> {
    if request.validate().is_err() {
        // Malformed credentials get the same answer as wrong ones.
        return Err(error_reply(StatusCode::BAD_REQUEST, "Invalid email or password"));
    }

    let (user, token) = state
        .accounts
        .login(&request.email, &request.password)
        .await
        .map_err(|err| match err {
            AccountError::InvalidCredentials => {
                error_reply(StatusCode::BAD_REQUEST, "Invalid email or password")
            }
            other => {
                error!(error = %other, "Login failed");
                error_reply(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        })?;

    Ok(Json(LoginResponse { token, user }))
}

/// `POST /api/auth/profile`
///
/// Requires a session-purpose bearer token; verification tokens are
/// rejected here.
pub async fn profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ProfileRequest>,
) -> Result<Json<UserSummary>, ErrorReply> {
    let token = bearer_token(&headers)?;
    state
        .tokens
        .verify_session(token)
        .map_err(|_| error_reply(StatusCode::UNAUTHORIZED, "Invalid or expired token"))?;

    let summary = state
        .accounts
        .profile(&request.email)
        .await
        .map_err(|err| match err {
            AccountError::NotFound => error_reply(StatusCode::NOT_FOUND, "User not found"),
            other => {
                error!(error = %other, "Profile lookup failed");
                error_reply(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
            }
        })?;

    Ok(Json(summary))
}

/// `POST /resend-verification`
pub async fn resend_verification(
    State(state): State<AppState>,
    Json(request): Json<ResendVerificationRequest>,
) -> Result<Json<MessageBody>, (StatusCode, Json<MessageBody>)> {
    fn message_reply(status: StatusCode, message: &str) -> (StatusCode, Json<MessageBody>) {
        (
            status,
            Json(MessageBody {
                message: message.to_string(),
            }),
        )
    }

    if request.email.is_empty() {
        return Err(message_reply(StatusCode::BAD_REQUEST, "Email is required."));
    }

    state
        .accounts
        .resend_verification(&request.email)
        .await
        .map_err(|err| match err {
            AccountError::NotFound => message_reply(StatusCode::NOT_FOUND, "User not found."),
            AccountError::AlreadyVerified => {
                message_reply(StatusCode::BAD_REQUEST, "User is already verified.")
            }
            other => {
                error!(error = %other, "Resend verification failed");
                message_reply(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error.")
            }
        })?;

    Ok(Json(MessageBody {
        message: "Verification email sent.".to_string(),
    }))
}

/// `GET /api/auth/verify/:token`
///
/// Consumes a verification token and redirects to the client application.
pub async fn verify_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Redirect, ErrorReply> {
    state
        .accounts
        .verify_by_token(&token)
        .await
        .map_err(|_| error_reply(StatusCode::BAD_REQUEST, "Invalid or expired token"))?;

    Ok(Redirect::to(&state.client_url))
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, ErrorReply> {
    let auth_header = headers
        .get("Authorization")
        .ok_or_else(|| error_reply(StatusCode::UNAUTHORIZED, "Authorization header missing"))?;

    auth_header
        .to_str()
        .map_err(|_| error_reply(StatusCode::UNAUTHORIZED, "Invalid authorization header"))?
        .strip_prefix("Bearer ")
        .ok_or_else(|| error_reply(StatusCode::UNAUTHORIZED, "Bearer token required"))
}

fn validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref())
        .map(std::string::ToString::to_string)
        .next()
        .unwrap_or_else(|| "Invalid input provided".to_string())
}
