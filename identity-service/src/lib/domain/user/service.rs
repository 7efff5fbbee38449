use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user administration.
///
/// Concrete implementation of UserServicePort with dependency injection.
/// Credential handling lives in the auth service; this one covers the
/// profile and admin surface.
pub struct UserService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> UserServicePort for UserService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_email) = command.email {
            user.email = new_email;
        }

        if let Some(new_first_name) = command.first_name {
            user.first_name = new_first_name;
        }

        if let Some(new_last_name) = command.last_name {
            user.last_name = new_last_name;
        }

        if let Some(new_role) = command.role {
            user.role = new_role;
        }

        if let Some(new_is_active) = command.is_active {
            user.is_active = new_is_active;
        }

        user.updated_at = Utc::now();

        self.repository.update(user).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::user::models::AuthProvider;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::UserRole;

    // Define mocks in the test module using mockall
    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn find_by_reset_token(&self, token: &str) -> Result<Option<User>, UserError>;
            async fn list_all(&self) -> Result<Vec<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
            async fn set_refresh_token<'a, 'b, 'c>(&'a self, id: &'b UserId, refresh_token_hash: Option<&'c str>) -> Result<(), UserError>;
            async fn rotate_refresh_token(&self, id: &UserId, current_hash: &str, new_hash: &str) -> Result<bool, UserError>;
            async fn set_reset_token(&self, id: &UserId, token: &str, expires_at: DateTime<Utc>) -> Result<(), UserError>;
            async fn update_password(&self, id: &UserId, password_hash: &str) -> Result<(), UserError>;
        }
    }

    fn test_user(email: &str) -> User {
        User {
            id: UserId::new(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: Some("$argon2id$test_hash".to_string()),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            role: UserRole::User,
            provider: AuthProvider::Email,
            provider_id: None,
            refresh_token_hash: None,
            reset_token: None,
            reset_token_expires_at: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_list_users_newest_first() {
        let mut repository = MockTestUserRepository::new();

        let users = vec![test_user("b@example.com"), test_user("a@example.com")];
        let returned_users = users.clone();
        repository
            .expect_list_all()
            .times(1)
            .returning(move || Ok(returned_users.clone()));

        let service = UserService::new(Arc::new(repository));

        let result = service.list_users().await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let mut repository = MockTestUserRepository::new();

        let expected_user = test_user("test@example.com");
        let user_id = expected_user.id;

        let returned_user = expected_user.clone();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        let service = UserService::new(Arc::new(repository));

        let result = service.get_user(&user_id).await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap().id, user_id);
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let result = service.get_user(&UserId::new()).await;
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_user_applies_partial_fields() {
        let mut repository = MockTestUserRepository::new();

        let existing_user = test_user("old@example.com");
        let user_id = existing_user.id;

        let returned_user = existing_user.clone();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        repository
            .expect_update()
            .withf(|user| {
                user.email.as_str() == "new@example.com"
                    && user.first_name == "New"
                    // Untouched fields keep their values
                    && user.last_name == "User"
                    && user.role == UserRole::User
                    && !user.is_active
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            email: Some(EmailAddress::new("new@example.com".to_string()).unwrap()),
            first_name: Some("New".to_string()),
            last_name: None,
            role: None,
            is_active: Some(false),
        };

        let result = service.update_user(&user_id, command).await;
        assert!(result.is_ok());

        let updated_user = result.unwrap();
        assert_eq!(updated_user.email.as_str(), "new@example.com");
        assert!(!updated_user.is_active);
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_update().times(0);

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            email: None,
            first_name: Some("New".to_string()),
            last_name: None,
            role: None,
            is_active: None,
        };

        let result = service.update_user(&UserId::new(), command).await;
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_user_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        let existing_user = test_user("old@example.com");
        let user_id = existing_user.id;

        let returned_user = existing_user.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        repository
            .expect_update()
            .times(1)
            .returning(|user| Err(UserError::EmailAlreadyExists(user.email.to_string())));

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            email: Some(EmailAddress::new("taken@example.com".to_string()).unwrap()),
            first_name: None,
            last_name: None,
            role: None,
            is_active: None,
        };

        let result = service.update_user(&user_id, command).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_delete_user_success() {
        let mut repository = MockTestUserRepository::new();

        let user_id = UserId::new();
        repository
            .expect_delete()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(|_| Ok(()));

        let service = UserService::new(Arc::new(repository));

        let result = service.delete_user(&user_id).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        let user_id = UserId::new();
        repository
            .expect_delete()
            .times(1)
            .returning(move |_| Err(UserError::NotFound(user_id.to_string())));

        let service = UserService::new(Arc::new(repository));

        let result = service.delete_user(&user_id).await;
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }
}
