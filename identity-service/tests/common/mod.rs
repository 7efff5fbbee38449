use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::TokenIssuer;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use identity_service::config::Config;
use identity_service::config::DatabaseConfig;
use identity_service::config::JwtConfig;
use identity_service::config::ServerConfig;
use identity_service::domain::auth::ports::AuthServicePort;
use identity_service::domain::auth::service::AuthService;
use identity_service::domain::user::models::User;
use identity_service::domain::user::models::UserId;
use identity_service::domain::user::ports::UserRepository;
use identity_service::domain::user::ports::UserServicePort;
use identity_service::domain::user::service::UserService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::notifier::TracingResetNotifier;
use identity_service::user::errors::UserError;

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub repository: Arc<InMemoryUserRepository>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let repository = Arc::new(InMemoryUserRepository::new());

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let config = Config {
            database: DatabaseConfig {
                url: "postgresql://unused-in-these-tests".to_string(),
            },
            server: ServerConfig {
                http_port: port,
                frontend_url: "http://localhost:5173".to_string(),
            },
            jwt: JwtConfig {
                access_secret: "test-access-secret-32-bytes-long-ok!".to_string(),
                refresh_secret: "test-refresh-secret-32-bytes-long-!!".to_string(),
            },
        };

        let token_issuer = Arc::new(TokenIssuer::new(
            config.jwt.access_secret.as_bytes(),
            config.jwt.refresh_secret.as_bytes(),
        ));
        let reset_notifier = Arc::new(TracingResetNotifier::new(&config));

        let auth_service: Arc<dyn AuthServicePort> = Arc::new(AuthService::new(
            Arc::clone(&repository),
            reset_notifier,
            Arc::clone(&token_issuer),
        ));
        let user_service: Arc<dyn UserServicePort> =
            Arc::new(UserService::new(Arc::clone(&repository)));

        let router = create_router(auth_service, user_service, token_issuer);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            repository,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// POST to the refresh endpoint with an explicit cookie value, bypassing
    /// the client's cookie store
    pub async fn refresh_with_cookie(&self, refresh_token: &str) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/api/auth/refresh", self.address))
            .header(
                reqwest::header::COOKIE,
                format!("refreshToken={}", refresh_token),
            )
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Extract the refresh token value from a response's Set-Cookie headers
pub fn refresh_cookie_value(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("refreshToken="))
        .map(|value| {
            value
                .trim_start_matches("refreshToken=")
                .split(';')
                .next()
                .unwrap_or_default()
                .to_string()
        })
}

/// In-memory credential store backing the API tests.
///
/// Mirrors the Postgres repository's observable semantics: unique emails,
/// conditional refresh rotation, newest-first listing, updates that leave
/// credential columns alone.
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }

    /// Peek the stored reset token for an email, standing in for reading
    /// the link out of a delivery channel.
    pub fn reset_token_for(&self, email: &str) -> Option<String> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.as_str() == email)
            .and_then(|u| u.reset_token.clone())
    }

    /// Backdate a pending reset token so it reads as expired.
    pub fn expire_reset_token(&self, email: &str) {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.email.as_str() == email) {
            user.reset_token_expires_at = Some(Utc::now() - Duration::minutes(1));
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == *id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn find_by_reset_token(&self, token: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.reset_token.as_deref() == Some(token))
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let mut users = self.users.lock().unwrap().clone();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        let Some(stored) = users.iter_mut().find(|u| u.id == user.id) else {
            return Err(UserError::NotFound(user.id.to_string()));
        };

        // Identity fields only; credential state stays as stored
        stored.email = user.email.clone();
        stored.first_name = user.first_name.clone();
        stored.last_name = user.last_name.clone();
        stored.role = user.role;
        stored.is_active = user.is_active;
        stored.updated_at = user.updated_at;

        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != *id);
        if users.len() == before {
            return Err(UserError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn set_refresh_token(
        &self,
        id: &UserId,
        refresh_token_hash: Option<&str>,
    ) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == *id) {
            user.refresh_token_hash = refresh_token_hash.map(str::to_string);
        }
        Ok(())
    }

    async fn rotate_refresh_token(
        &self,
        id: &UserId,
        current_hash: &str,
        new_hash: &str,
    ) -> Result<bool, UserError> {
        let mut users = self.users.lock().unwrap();
        match users
            .iter_mut()
            .find(|u| u.id == *id && u.refresh_token_hash.as_deref() == Some(current_hash))
        {
            Some(user) => {
                user.refresh_token_hash = Some(new_hash.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_reset_token(
        &self,
        id: &UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == *id) {
            user.reset_token = Some(token.to_string());
            user.reset_token_expires_at = Some(expires_at);
        }
        Ok(())
    }

    async fn update_password(&self, id: &UserId, password_hash: &str) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == *id) {
            user.password_hash = Some(password_hash.to_string());
            user.reset_token = None;
            user.reset_token_expires_at = None;
            user.refresh_token_hash = None;
        }
        Ok(())
    }
}
