use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::models::AuthProvider;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserRole;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw database row; converted into the domain model after fetching.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: Option<String>,
    first_name: String,
    last_name: String,
    role: String,
    provider: String,
    provider_id: Option<String>,
    refresh_token_hash: Option<String>,
    reset_token: Option<String>,
    reset_token_expires_at: Option<DateTime<Utc>>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn try_into_user(self) -> Result<User, UserError> {
        Ok(User {
            id: UserId(self.id),
            email: EmailAddress::new(self.email)?,
            password_hash: self.password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            role: UserRole::from_string(&self.role)?,
            provider: AuthProvider::from_string(&self.provider)?,
            provider_id: self.provider_id,
            refresh_token_hash: self.refresh_token_hash,
            reset_token: self.reset_token,
            reset_token_expires_at: self.reset_token_expires_at,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, first_name, last_name, role,
                               provider, provider_id, refresh_token_hash, reset_token,
                               reset_token_expires_at, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.role.as_str())
        .bind(user.provider.as_str())
        .bind(&user.provider_id)
        .bind(&user.refresh_token_hash)
        .bind(&user.reset_token)
        .bind(user.reset_token_expires_at)
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
                    return UserError::EmailAlreadyExists(user.email.as_str().to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, email, password_hash, first_name, last_name, role, provider,
                   provider_id, refresh_token_hash, reset_token, reset_token_expires_at,
                   is_active, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(r.try_into_user()?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, email, password_hash, first_name, last_name, role, provider,
                   provider_id, refresh_token_hash, reset_token, reset_token_expires_at,
                   is_active, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(r.try_into_user()?)),
            None => Ok(None),
        }
    }

    async fn find_by_reset_token(&self, token: &str) -> Result<Option<User>, UserError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, email, password_hash, first_name, last_name, role, provider,
                   provider_id, refresh_token_hash, reset_token, reset_token_expires_at,
                   is_active, created_at, updated_at
            FROM users
            WHERE reset_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(r.try_into_user()?)),
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT id, email, password_hash, first_name, last_name, role, provider,
                   provider_id, refresh_token_hash, reset_token, reset_token_expires_at,
                   is_active, created_at, updated_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(|r| r.try_into_user()).collect()
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = $2, first_name = $3, last_name = $4, role = $5, is_active = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.role.as_str())
        .bind(user.is_active)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
                    return UserError::EmailAlreadyExists(user.email.as_str().to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(user.id.to_string()));
        }

        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn set_refresh_token(
        &self,
        id: &UserId,
        refresh_token_hash: Option<&str>,
    ) -> Result<(), UserError> {
        sqlx::query(
            r#"
            UPDATE users
            SET refresh_token_hash = $2, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(refresh_token_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn rotate_refresh_token(
        &self,
        id: &UserId,
        current_hash: &str,
        new_hash: &str,
    ) -> Result<bool, UserError> {
        // The hash in the predicate makes this a compare-and-swap; a
        // concurrent rotation leaves rows_affected at zero
        let result = sqlx::query(
            r#"
            UPDATE users
            SET refresh_token_hash = $3, updated_at = now()
            WHERE id = $1 AND refresh_token_hash = $2
            "#,
        )
        .bind(id.0)
        .bind(current_hash)
        .bind(new_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }

    async fn set_reset_token(
        &self,
        id: &UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), UserError> {
        sqlx::query(
            r#"
            UPDATE users
            SET reset_token = $2, reset_token_expires_at = $3, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(token)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn update_password(&self, id: &UserId, password_hash: &str) -> Result<(), UserError> {
        // One write installs the new hash, consumes the reset token and
        // ends any active session
        sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2, reset_token = NULL, reset_token_expires_at = NULL,
                refresh_token_hash = NULL, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
