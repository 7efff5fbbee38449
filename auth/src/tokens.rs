use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Access token lifetime. Short lived; clients renew through the refresh flow.
pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 15;

/// Refresh token lifetime. Matches the refresh cookie max age.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

/// Access and refresh token issued together.
///
/// The refresh token plaintext exists only in flight; the service persists
/// nothing but its hash.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues and validates access/refresh token pairs.
///
/// Each token class is signed with its own secret, so a refresh token can
/// never be replayed as an access token or vice versa.
pub struct TokenIssuer {
    access: JwtHandler,
    refresh: JwtHandler,
}

impl TokenIssuer {
    /// Create an issuer from the two signing secrets.
    ///
    /// Secrets come from configuration. Reusing the same bytes for both
    /// classes would collapse the access/refresh distinction.
    pub fn new(access_secret: &[u8], refresh_secret: &[u8]) -> Self {
        Self {
            access: JwtHandler::new(access_secret),
            refresh: JwtHandler::new(refresh_secret),
        }
    }

    /// Issue a fresh token pair for a user.
    ///
    /// Both tokens carry the same identity claims; only the lifetime and the
    /// signing secret differ. Signing happens sequentially and a failure on
    /// either token aborts the pair.
    ///
    /// # Errors
    /// * `SigningFailed` - Either token could not be signed
    pub fn issue_pair(&self, user_id: &str, email: &str, role: &str) -> Result<TokenPair, JwtError> {
        let access_claims = Claims::new(
            user_id,
            email,
            role,
            Duration::minutes(ACCESS_TOKEN_TTL_MINUTES),
        );
        let refresh_claims =
            Claims::new(user_id, email, role, Duration::days(REFRESH_TOKEN_TTL_DAYS));

        let access_token = self.access.encode(&access_claims)?;
        let refresh_token = self.refresh.encode(&refresh_claims)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Validate an access token and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Token lifetime has elapsed
    /// * `InvalidToken` - Signature mismatch, malformed token, or a refresh
    ///   token presented as an access token
    pub fn verify_access(&self, token: &str) -> Result<Claims, JwtError> {
        self.access.decode(token)
    }

    /// Validate a refresh token and return its claims.
    ///
    /// Signature validity alone does not authorize a refresh; the service
    /// still checks the presented token against the stored hash.
    ///
    /// # Errors
    /// * `TokenExpired` - Token lifetime has elapsed
    /// * `InvalidToken` - Signature mismatch or malformed token
    pub fn verify_refresh(&self, token: &str) -> Result<Claims, JwtError> {
        self.refresh.decode(token)
    }
}
