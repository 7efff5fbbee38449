use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserRole;
use crate::inbound::http::cookies::refresh_cookie;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;

const MIN_PASSWORD_LENGTH: usize = 6;

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<RegisterRequest>,
) -> Result<(CookieJar, ApiSuccess<RegisterResponseData>), ApiError> {
    let session = state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)?;

    // Refresh token travels only in the cookie, never in the body
    let jar = jar.add(refresh_cookie(session.tokens.refresh_token));

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::CREATED,
            RegisterResponseData {
                user: (&session.user).into(),
                access_token: session.tokens.access_token,
            },
        ),
    ))
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    email: String,
    password: String,
    first_name: String,
    last_name: String,
    role: Option<UserRole>,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Password must be at least {} characters", MIN_PASSWORD_LENGTH)]
    PasswordTooShort,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        if self.password.len() < MIN_PASSWORD_LENGTH {
            return Err(ParseRegisterRequestError::PasswordTooShort);
        }
        let email = EmailAddress::new(self.email)?;
        Ok(RegisterCommand::new(
            email,
            self.password,
            self.first_name,
            self.last_name,
            self.role,
        ))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub user: UserData,
    pub access_token: String,
}
