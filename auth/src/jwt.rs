use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),
}

/// Claims carried by access and refresh tokens alike.
///
/// `sub` holds the user id. `email` and `role` ride along so the HTTP layer
/// can authorize without a database round trip. `jti` is a fresh UUID per
/// token; without it, two tokens minted for the same user within one second
/// would be byte-identical, since `iat` only has second granularity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Build claims for a user, expiring `ttl` from now.
    pub fn new(
        sub: impl ToString,
        email: impl ToString,
        role: impl ToString,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();

        Self {
            sub: sub.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

/// Signs and validates tokens under a single secret.
///
/// Uses HS256 (HMAC with SHA-256). Access and refresh tokens each get their
/// own handler so one class never validates against the other's secret.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// The secret should be at least 256 bits (32 bytes) for HS256 and come
    /// from configuration, never from code.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Sign claims into a JWT string.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))
    }

    /// Decode and validate a JWT string.
    ///
    /// Enforces the signature and the `exp` claim.
    ///
    /// # Errors
    /// * `TokenExpired` - The `exp` claim is in the past
    /// * `InvalidToken` - Signature mismatch or malformed token
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let validation = Validation::new(self.algorithm);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    _ => JwtError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_claims(ttl: Duration) -> Claims {
        Claims::new("user123", "alice@example.com", "user", ttl)
    }

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");

        let claims = test_claims(Duration::minutes(15));
        let token = handler.encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());

        let decoded = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_claims_timestamps() {
        let claims = test_claims(Duration::minutes(15));
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_claims_are_unique_per_token() {
        // Same inputs in the same second still produce distinct tokens
        let first = test_claims(Duration::minutes(15));
        let second = test_claims(Duration::minutes(15));
        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_decode_expired_token() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");

        // Well past the default 60s validation leeway
        let claims = test_claims(Duration::minutes(-5));
        let token = handler.encode(&claims).expect("Failed to encode token");

        let result = handler.decode(&token);
        assert!(matches!(result, Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_decode_invalid_token() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");

        let result = handler.decode("invalid.token.here");
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let token = handler1
            .encode(&test_claims(Duration::minutes(15)))
            .expect("Failed to encode token");

        let result = handler2.decode(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }
}
