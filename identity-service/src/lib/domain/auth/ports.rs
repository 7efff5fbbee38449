use async_trait::async_trait;
use auth::TokenPair;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::NotifierError;
use crate::domain::auth::models::AuthSession;
use crate::domain::auth::models::OAuthUserCommand;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for authentication and token lifecycle operations.
///
/// The sole authority for credential verification; nothing outside this port
/// reads or writes password or token material.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new email/password account and start a session.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` / `Token` / `User` - Infrastructure failure
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AuthError>;

    /// Verify email/password credentials and start a session.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, wrong password, or an account
    ///   without a password (OAuth-only); indistinguishable by design
    /// * `AccountDeactivated` - Credentials verified but the account is inactive
    /// * `Password` / `Token` / `User` - Infrastructure failure
    async fn login(&self, email: &EmailAddress, password: &str) -> Result<AuthSession, AuthError>;

    /// Exchange a valid refresh token for a fresh pair, rotating the stored hash.
    ///
    /// A presented token is accepted exactly once; any reuse, forgery, expiry,
    /// or lost rotation race collapses into `InvalidRefreshToken`.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Token failed any validation step
    /// * `Password` / `Token` / `User` - Infrastructure failure
    async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;

    /// End the user's session by clearing the stored refresh token hash.
    ///
    /// Idempotent; logging out twice (or for an unknown id) is not an error.
    ///
    /// # Errors
    /// * `User` - Infrastructure failure
    async fn logout(&self, user_id: &UserId) -> Result<(), AuthError>;

    /// Issue a password reset token for the account, if one exists.
    ///
    /// Returns Ok for unknown emails with no observable difference, so the
    /// endpoint cannot be used to enumerate accounts. Delivery failures are
    /// logged, not surfaced.
    ///
    /// # Errors
    /// * `User` - Infrastructure failure
    async fn forgot_password(&self, email: &str) -> Result<(), AuthError>;

    /// Consume a reset token and set a new password.
    ///
    /// Clears the reset token and the refresh token hash, so sessions opened
    /// with the old password end here.
    ///
    /// # Errors
    /// * `InvalidResetToken` - Token unknown or past its expiry
    /// * `Password` / `User` - Infrastructure failure
    async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AuthError>;

    /// Find or create the account for an OAuth-asserted identity.
    ///
    /// Unknown email creates a passwordless account under the asserted
    /// provider. A known email is returned only when the provider matches.
    ///
    /// # Errors
    /// * `ProviderMismatch` - Email belongs to an account under a different provider
    /// * `User` - Infrastructure failure
    async fn validate_oauth_user(&self, command: OAuthUserCommand) -> Result<User, AuthError>;
}

/// Out-of-band delivery of password reset tokens.
///
/// The real adapter would send email; the seam exists so the domain never
/// knows the transport.
#[async_trait]
pub trait ResetTokenNotifier: Send + Sync + 'static {
    /// Deliver a reset token to the account holder.
    ///
    /// # Errors
    /// * `DeliveryFailed` - Transport-level failure
    async fn send_reset_token(
        &self,
        email: &EmailAddress,
        token: &str,
    ) -> Result<(), NotifierError>;
}
