//! Authentication primitives for the identity service.
//!
//! Provides the credential building blocks the service composes behind its
//! own ports:
//! - Password hashing (Argon2id), reused for refresh token storage
//! - JWT claims, signing, and validation
//! - Access/refresh token pair issuance with separate secrets
//! - Password reset token generation
//!
//! No I/O happens here. Persistence and transport stay in the service crate
//! so these primitives remain trivially testable.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Token Pairs
//! ```
//! use auth::TokenIssuer;
//!
//! let issuer = TokenIssuer::new(
//!     b"access_secret_at_least_32_bytes_long!",
//!     b"refresh_secret_at_least_32_bytes_ok!",
//! );
//! let pair = issuer.issue_pair("user123", "alice@example.com", "user").unwrap();
//!
//! let claims = issuer.verify_access(&pair.access_token).unwrap();
//! assert_eq!(claims.sub, "user123");
//!
//! // A refresh token never validates as an access token.
//! assert!(issuer.verify_access(&pair.refresh_token).is_err());
//! ```

pub mod jwt;
pub mod password;
pub mod reset;
pub mod tokens;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use reset::generate_reset_token;
pub use reset::RESET_TOKEN_TTL_MINUTES;
pub use tokens::TokenIssuer;
pub use tokens::TokenPair;
pub use tokens::ACCESS_TOKEN_TTL_MINUTES;
pub use tokens::REFRESH_TOKEN_TTL_DAYS;
