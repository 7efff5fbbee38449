use std::sync::Arc;

use async_trait::async_trait;
use auth::generate_reset_token;
use auth::PasswordHasher;
use auth::TokenIssuer;
use auth::TokenPair;
use auth::RESET_TOKEN_TTL_MINUTES;
use chrono::Duration;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthSession;
use crate::domain::auth::models::OAuthUserCommand;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::ResetTokenNotifier;
use crate::domain::user::models::AuthProvider;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserRole;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// Domain service implementation for authentication.
///
/// Owns the whole credential lifecycle: registration, login, refresh token
/// rotation, logout, the password reset flow, and OAuth account resolution.
/// Passwords and refresh tokens are only ever persisted as argon2 hashes.
pub struct AuthService<R, N>
where
    R: UserRepository,
    N: ResetTokenNotifier,
{
    repository: Arc<R>,
    notifier: Arc<N>,
    password_hasher: PasswordHasher,
    token_issuer: Arc<TokenIssuer>,
}

impl<R, N> AuthService<R, N>
where
    R: UserRepository,
    N: ResetTokenNotifier,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `notifier` - Reset token delivery implementation
    /// * `token_issuer` - Pair issuer built from the configured secrets
    pub fn new(repository: Arc<R>, notifier: Arc<N>, token_issuer: Arc<TokenIssuer>) -> Self {
        Self {
            repository,
            notifier,
            password_hasher: PasswordHasher::new(),
            token_issuer,
        }
    }

    /// Issue a token pair for the user and persist the refresh token's hash.
    ///
    /// The refresh plaintext leaves the service exactly once, inside the
    /// returned session.
    async fn issue_session(&self, user: User) -> Result<AuthSession, AuthError> {
        let tokens = self.token_issuer.issue_pair(
            &user.id.to_string(),
            user.email.as_str(),
            user.role.as_str(),
        )?;

        let refresh_token_hash = self.password_hasher.hash(&tokens.refresh_token)?;
        self.repository
            .set_refresh_token(&user.id, Some(&refresh_token_hash))
            .await?;

        Ok(AuthSession { user, tokens })
    }
}

#[async_trait]
impl<R, N> AuthServicePort for AuthService<R, N>
where
    R: UserRepository,
    N: ResetTokenNotifier,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AuthError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = self.password_hasher.hash(&command.password)?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash: Some(password_hash),
            first_name: command.first_name,
            last_name: command.last_name,
            role: command.role.unwrap_or(UserRole::User),
            provider: AuthProvider::Email,
            provider_id: None,
            refresh_token_hash: None,
            reset_token: None,
            reset_token_expires_at: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        // The unique constraint still guards against a concurrent register
        // slipping between the lookup above and this insert
        let user = self.repository.create(user).await.map_err(|e| match e {
            UserError::EmailAlreadyExists(_) => AuthError::EmailAlreadyExists,
            other => AuthError::from(other),
        })?;

        self.issue_session(user).await
    }

    async fn login(&self, email: &EmailAddress, password: &str) -> Result<AuthSession, AuthError> {
        let user = self
            .repository
            .find_by_email(email.as_str())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // OAuth-only accounts have no password and fail like a wrong password
        let stored_hash = user
            .password_hash
            .as_deref()
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        // Checked only after the password verified, so the deactivated
        // message never leaks whether a guessed password was right
        if !user.is_active {
            return Err(AuthError::AccountDeactivated);
        }

        self.issue_session(user).await
    }

    async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        // Any verification failure collapses into the same rejection
        let claims = self
            .token_issuer
            .verify_refresh(refresh_token)
            .map_err(|e| {
                tracing::warn!("Refresh token verification failed: {}", e);
                AuthError::InvalidRefreshToken
            })?;

        let user_id =
            UserId::from_string(&claims.sub).map_err(|_| AuthError::InvalidRefreshToken)?;

        let user = self
            .repository
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        let current_hash = user
            .refresh_token_hash
            .as_deref()
            .ok_or(AuthError::InvalidRefreshToken)?;

        if !self.password_hasher.verify(refresh_token, current_hash)? {
            return Err(AuthError::InvalidRefreshToken);
        }

        let tokens = self.token_issuer.issue_pair(
            &user.id.to_string(),
            user.email.as_str(),
            user.role.as_str(),
        )?;
        let new_hash = self.password_hasher.hash(&tokens.refresh_token)?;

        // Conditional rotation: if another request rotated first, this one
        // lost the race and the presented token is treated as spent
        let rotated = self
            .repository
            .rotate_refresh_token(&user.id, current_hash, &new_hash)
            .await?;
        if !rotated {
            return Err(AuthError::InvalidRefreshToken);
        }

        Ok(tokens)
    }

    async fn logout(&self, user_id: &UserId) -> Result<(), AuthError> {
        self.repository.set_refresh_token(user_id, None).await?;
        Ok(())
    }

    async fn forgot_password(&self, email: &str) -> Result<(), AuthError> {
        // Unknown emails return the same Ok as known ones
        let Some(user) = self.repository.find_by_email(email).await? else {
            return Ok(());
        };

        let token = generate_reset_token();
        let expires_at = Utc::now() + Duration::minutes(RESET_TOKEN_TTL_MINUTES);

        self.repository
            .set_reset_token(&user.id, &token, expires_at)
            .await?;

        if let Err(e) = self.notifier.send_reset_token(&user.email, &token).await {
            tracing::error!(
                "Failed to deliver password reset token for user {}: {}",
                user.id,
                e
            );
        }

        Ok(())
    }

    async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AuthError> {
        let user = self
            .repository
            .find_by_reset_token(token)
            .await?
            .ok_or(AuthError::InvalidResetToken)?;

        let expires_at = user
            .reset_token_expires_at
            .ok_or(AuthError::InvalidResetToken)?;
        if expires_at < Utc::now() {
            return Err(AuthError::InvalidResetToken);
        }

        let password_hash = self.password_hasher.hash(new_password)?;

        // Consumes the token and drops the refresh hash in the same write
        self.repository
            .update_password(&user.id, &password_hash)
            .await?;

        Ok(())
    }

    async fn validate_oauth_user(&self, command: OAuthUserCommand) -> Result<User, AuthError> {
        if let Some(existing) = self
            .repository
            .find_by_email(command.email.as_str())
            .await?
        {
            if existing.provider != command.provider {
                return Err(AuthError::ProviderMismatch(existing.provider));
            }
            return Ok(existing);
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash: None,
            first_name: command.first_name,
            last_name: command.last_name,
            role: UserRole::User,
            provider: command.provider,
            provider_id: Some(command.provider_id),
            refresh_token_hash: None,
            reset_token: None,
            reset_token_expires_at: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let user = self.repository.create(user).await?;

        Ok(user)
    }
}
