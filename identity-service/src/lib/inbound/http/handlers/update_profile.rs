use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UpdateUserCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::UserServicePort;

/// HTTP request body for updating the caller's own profile (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UpdateProfileRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, UserError> {
        let email = self.email.map(EmailAddress::new).transpose()?;

        // Role and activation are admin-only and stay untouched here
        Ok(UpdateUserCommand {
            email,
            first_name: self.first_name,
            last_name: self.last_name,
            role: None,
            is_active: None,
        })
    }
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .user_service
        .update_user(&user.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
