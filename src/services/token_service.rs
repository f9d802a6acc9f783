//! Token issue/verify with typed purpose claims.
//!
//! Tokens are HS256 JWTs signed with a process-wide secret loaded at
//! startup. Claims carry a tagged purpose so a verification token can never
//! be accepted where a session token is required, or the reverse. Every
//! token carries `exp`/`iat`, and verification enforces expiry with zero
//! leeway.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header,
    Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token service errors
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid or expired token")]
    Invalid,
    #[error("Token signing failed: {0}")]
    Signing(jsonwebtoken::errors::Error),
}

/// What a token is allowed to be used for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    /// Authorizes subsequent requests as a given account.
    Session,
    /// Proves control of an email address; consumed by the verify operation.
    Verification,
}

/// JWT claims carried by every token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Email address the token is bound to.
    pub sub: String,
    pub purpose: TokenPurpose,
    /// Account id; present on session tokens only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub exp: usize,
    pub iat: usize,
    pub iss: String,
}

/// Claims of a validated session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub email: String,
    pub user_id: String,
}

/// Issues and verifies signed, time-bound tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    session_ttl: Duration,
    verification_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, issuer: String, session_ttl: Duration, verification_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            session_ttl,
            verification_ttl,
        }
    }

    /// Issue a signed token for the given subject and purpose, expiring
    /// after `ttl`.
    pub fn issue(
        &self,
        email: &str,
        purpose: TokenPurpose,
        uid: Option<&str>,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: email.to_string(),
            purpose,
            uid: uid.map(str::to_string),
            exp: usize::try_from((now + ttl).timestamp()).unwrap_or(0),
            iat: usize::try_from(now.timestamp()).unwrap_or(0),
            iss: self.issuer.clone(),
        };

        let header = Header::new(Algorithm::HS256);
        encode(&header, &claims, &self.encoding_key).map_err(TokenError::Signing)
    }

    /// Issue a session token bound to an email and account id.
    pub fn issue_session(&self, email: &str, user_id: &str) -> Result<String, TokenError> {
        self.issue(email, TokenPurpose::Session, Some(user_id), self.session_ttl)
    }

    /// Issue a short-lived email-verification token.
    pub fn issue_verification(&self, email: &str) -> Result<String, TokenError> {
        self.issue(email, TokenPurpose::Verification, None, self.verification_ttl)
    }

    /// Decode and validate a token, returning the claims supplied at issue
    /// time. Fails on bad signature, malformed input, wrong algorithm, or
    /// expiry.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        // Enforce the expected algorithm before decoding (prevents
        // algorithm confusion).
        let header = decode_header(token).map_err(|_| TokenError::Invalid)?;
        if header.alg != Algorithm::HS256 {
            return Err(TokenError::Invalid);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss"]);

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::Invalid)
    }

    /// Validate a token presented as a session credential.
    pub fn verify_session(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let claims = self.verify(token)?;
        match (claims.purpose, claims.uid) {
            (TokenPurpose::Session, Some(user_id)) => Ok(SessionClaims {
                email: claims.sub,
                user_id,
            }),
            _ => Err(TokenError::Invalid),
        }
    }

    /// Validate an email-verification token, returning the embedded email.
    pub fn verify_verification(&self, token: &str) -> Result<String, TokenError> {
        let claims = self.verify(token)?;
        if claims.purpose != TokenPurpose::Verification {
            return Err(TokenError::Invalid);
        }
        Ok(claims.sub)
    }
}
