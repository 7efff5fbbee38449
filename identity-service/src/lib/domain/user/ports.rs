use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user administration operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Retrieve all users, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Update existing user with optional fields.
    ///
    /// # Arguments
    /// * `id` - User ID to update
    /// * `command` - Command with optional email, name, role, and active-flag fields
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update_user(&self, id: &UserId, command: UpdateUserCommand)
        -> Result<User, UserError>;

    /// Delete existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;
}

/// Persistence operations for the user aggregate.
///
/// Credential state (refresh token hash, reset token, password hash) is
/// mutated through dedicated single-row operations rather than full-entity
/// updates, so concurrent auth flows never clobber each other's writes.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve user holding the given password reset token.
    ///
    /// Matches the stored token by equality; expiry is the caller's check.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_reset_token(&self, token: &str) -> Result<Option<User>, UserError>;

    /// Retrieve all users, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<User>, UserError>;

    /// Update the identity fields of an existing user.
    ///
    /// Writes email, names, role, and the active flag. Credential state is
    /// untouched; use the dedicated operations below for that.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Remove user from storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;

    /// Store or clear the refresh token hash for a user.
    ///
    /// None ends the session (logout). Unknown ids are a no-op so logout
    /// stays idempotent.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn set_refresh_token(
        &self,
        id: &UserId,
        refresh_token_hash: Option<&str>,
    ) -> Result<(), UserError>;

    /// Replace the refresh token hash only if it still equals `current_hash`.
    ///
    /// Single conditional write; two concurrent refreshes with the same token
    /// cannot both succeed.
    ///
    /// # Returns
    /// True if the hash matched and was replaced, false if it had already
    /// changed (or the user is gone)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn rotate_refresh_token(
        &self,
        id: &UserId,
        current_hash: &str,
        new_hash: &str,
    ) -> Result<bool, UserError>;

    /// Store a password reset token with its expiry, superseding any prior one.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn set_reset_token(
        &self,
        id: &UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), UserError>;

    /// Store a new password hash and clear all credential state.
    ///
    /// One write sets the hash, consumes the reset token, and drops the
    /// refresh token hash so existing sessions end with the old password.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn update_password(&self, id: &UserId, password_hash: &str) -> Result<(), UserError>;
}
