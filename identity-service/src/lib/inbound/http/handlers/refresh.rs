use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::cookies::refresh_cookie;
use crate::inbound::http::cookies::REFRESH_TOKEN_COOKIE;
use crate::inbound::http::router::AppState;

pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<RefreshResponseData>), ApiError> {
    let refresh_token = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| ApiError::Unauthorized("Invalid refresh token".to_string()))?;

    let tokens = state
        .auth_service
        .refresh_tokens(&refresh_token)
        .await
        .map_err(ApiError::from)?;

    // The presented token is spent; the cookie carries its replacement
    let jar = jar.add(refresh_cookie(tokens.refresh_token));

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            RefreshResponseData {
                access_token: tokens.access_token,
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub access_token: String,
}
