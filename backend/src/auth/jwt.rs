//! Session token issuance and verification
//!
//! Signs a compact, self-contained session token with pre-computed HMAC
//! keys. Verification never returns an `Err`: callers get a tagged
//! [`TokenVerification`] and branch on it explicitly.

use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Issuer claim embedded in every token
const ISSUER: &str = "auth-service";

/// Session lifetime: 8 hours. A constant, not configuration.
const TOKEN_LIFETIME_SECS: i64 = 8 * 60 * 60;

/// Signed token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Email at issue time
    pub email: String,
    /// Issuer
    pub iss: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Outcome of verifying a session token
///
/// This is a tagged union, not an exception path: both arms must be
/// handled by the caller. The `Invalid` arm carries the exact string the
/// client is allowed to see.
#[derive(Debug, Clone)]
pub enum TokenVerification {
    Valid { claims: Claims },
    Invalid { error: String },
}

/// Pre-computed signing keys
///
/// Deriving these is expensive, so they are built once at startup and
/// cached in AppState behind Arc for cheap cloning.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl TokenKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// Token service for session token operations
///
/// Sign and verify are synchronous: CPU-bound HMAC work with no
/// suspension points.
#[derive(Clone)]
pub struct TokenService {
    keys: TokenKeys,
}

impl TokenService {
    /// Create a new token service with pre-computed keys
    ///
    /// Call once at application startup and store in AppState; do not
    /// create per-request.
    pub fn new(secret: &str) -> Self {
        Self {
            keys: TokenKeys::new(secret),
        }
    }

    /// Issue a session token for a user
    #[inline]
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String> {
        self.sign(user_id, email, Duration::seconds(TOKEN_LIFETIME_SECS))
    }

    fn sign(&self, user_id: Uuid, email: &str, lifetime: Duration) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        };

        encode(&Header::default(), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to sign session token: {}", e))
    }

    /// Verify a session token
    ///
    /// Never panics or errors; every failure collapses into the `Invalid`
    /// arm. Three distinguished failure strings: "Token has expired" for
    /// an outlived token, "Invalid token" for anything malformed or signed
    /// with the wrong secret, and a message embedding the cause for the
    /// remaining verification failures.
    pub fn verify(&self, token: &str) -> TokenVerification {
        let mut validation = Validation::default();
        validation.set_issuer(&[ISSUER]);

        match decode::<Claims>(token, &self.keys.decoding, &validation) {
            Ok(data) => TokenVerification::Valid {
                claims: data.claims,
            },
            Err(e) => {
                let error = match e.kind() {
                    ErrorKind::ExpiredSignature => "Token has expired".to_string(),
                    ErrorKind::InvalidToken
                    | ErrorKind::InvalidSignature
                    | ErrorKind::InvalidAlgorithm
                    | ErrorKind::InvalidIssuer
                    | ErrorKind::ImmatureSignature
                    | ErrorKind::MissingRequiredClaim(_)
                    | ErrorKind::Base64(_)
                    | ErrorKind::Json(_)
                    | ErrorKind::Utf8(_) => "Invalid token".to_string(),
                    _ => format!("Token verification failed: {}", e),
                };
                TokenVerification::Invalid { error }
            }
        }
    }
}
