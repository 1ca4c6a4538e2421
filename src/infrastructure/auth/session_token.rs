use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{User, UserId};

/// Signed session tokens. The token carries the user's internal identity;
/// every authenticated operation derives its owner from it, never from the
/// request body.
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub email: String,
    pub exp: i64,
}

impl SessionClaims {
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.sub)
    }
}

impl SessionKeys {
    pub fn new(secret: &str, ttl_hours: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours as i64),
        }
    }

    pub fn issue(&self, user: &User) -> Result<String, SessionTokenError> {
        let claims = SessionClaims {
            sub: user.id.as_uuid(),
            email: user.email.clone(),
            exp: (Utc::now() + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| SessionTokenError::Creation(e.to_string()))
    }

    /// Expired or tampered tokens fail verification uniformly.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, SessionTokenError> {
        decode::<SessionClaims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| SessionTokenError::Invalid)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionTokenError {
    #[error("token creation failed: {0}")]
    Creation(String),
    #[error("invalid session token")]
    Invalid,
}
