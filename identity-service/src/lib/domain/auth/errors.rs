use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

use crate::domain::user::models::AuthProvider;
use crate::user::errors::UserError;

/// Top-level error for authentication operations.
///
/// The credential-failure variants deliberately carry fixed messages. Unknown
/// email, wrong password, and OAuth-only accounts all surface the same
/// `InvalidCredentials` text so responses never reveal which part failed.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("User with this email already exists")]
    EmailAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is deactivated")]
    AccountDeactivated,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Invalid or expired reset token")]
    InvalidResetToken,

    #[error("Email is already registered with provider {0}")]
    ProviderMismatch(AuthProvider),

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error(transparent)]
    User(#[from] UserError),
}

/// Error for reset-token delivery operations
#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    #[error("Failed to deliver reset token: {0}")]
    DeliveryFailed(String),
}
