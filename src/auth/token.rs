//! JWT token service
//!
//! Issues and verifies signed, time-limited identity tokens. Claims are an
//! arbitrary JSON object supplied by the client at sign-in; the only field
//! this service interprets is `email`.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

const TOKEN_EXPIRY_HOURS: i64 = 24;

/// Claims embedded in an identity token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Identity email
    pub email: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: i64,
    /// Issued at (Unix timestamp seconds)
    pub iat: i64,
    /// Opaque profile claims passed through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Token errors
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token: {0}")]
    Invalid(String),

    #[error("token expired")]
    Expired,

    #[error("claims must include an email")]
    MissingEmail,
}

/// JWT token service (HS256)
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Sign an identity token for the given claims, expiring after 24h
    pub fn issue(&self, mut claims: Map<String, Value>) -> Result<String, TokenError> {
        let email = match claims.remove("email") {
            Some(Value::String(email)) if !email.is_empty() => email,
            _ => return Err(TokenError::MissingEmail),
        };

        // Timestamps are service-controlled; drop any client-sent copies
        claims.remove("exp");
        claims.remove("iat");

        let now = Utc::now();
        let claims = Claims {
            email,
            exp: (now + Duration::hours(TOKEN_EXPIRY_HOURS)).timestamp(),
            iat: now.timestamp(),
            extra: claims,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }

    /// Verify a token and return its decoded claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })?;

        Ok(token_data.claims)
    }
}
