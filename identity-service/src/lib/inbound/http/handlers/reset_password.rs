use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageResponseData;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

const MIN_PASSWORD_LENGTH: usize = 6;

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    if body.password.len() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::UnprocessableEntity(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    state
        .auth_service
        .reset_password(&body.token, &body.password)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageResponseData {
            message: "Password reset successfully".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResetPasswordRequest {
    token: String,
    password: String,
}
