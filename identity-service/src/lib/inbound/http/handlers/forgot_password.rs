use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageResponseData;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    state
        .auth_service
        .forgot_password(&body.email)
        .await
        .map_err(ApiError::from)?;

    // Identical response whether or not the email exists
    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageResponseData {
            message: "If the email exists, a reset link has been sent".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForgotPasswordRequest {
    email: String,
}
