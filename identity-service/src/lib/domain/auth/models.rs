use auth::TokenPair;

use crate::domain::user::models::AuthProvider;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserRole;

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    /// Defaults to `UserRole::User` when absent.
    pub role: Option<UserRole>,
}

impl RegisterCommand {
    pub fn new(
        email: EmailAddress,
        password: String,
        first_name: String,
        last_name: String,
        role: Option<UserRole>,
    ) -> Self {
        Self {
            email,
            password,
            first_name,
            last_name,
            role,
        }
    }
}

/// Command carrying the identity asserted by an OAuth provider.
///
/// Built after the provider handshake has succeeded; the fields are trusted
/// as verified by the provider.
#[derive(Debug)]
pub struct OAuthUserCommand {
    pub email: EmailAddress,
    pub first_name: String,
    pub last_name: String,
    pub provider: AuthProvider,
    pub provider_id: String,
}

/// Authenticated user together with their freshly issued tokens.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub tokens: TokenPair,
}
