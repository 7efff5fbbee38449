use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::cookies::refresh_cookie;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequestBody>,
) -> Result<(CookieJar, ApiSuccess<LoginResponseData>), ApiError> {
    // A malformed email cannot belong to any account, so it fails the
    // same way as a wrong password
    let email = EmailAddress::new(body.email)
        .map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let session = state
        .auth_service
        .login(&email, &body.password)
        .await
        .map_err(ApiError::from)?;

    let jar = jar.add(refresh_cookie(session.tokens.refresh_token));

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            LoginResponseData {
                user: (&session.user).into(),
                access_token: session.tokens.access_token,
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub user: UserData,
    pub access_token: String,
}
