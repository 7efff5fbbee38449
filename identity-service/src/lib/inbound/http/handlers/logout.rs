use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum_extra::extract::cookie::CookieJar;

use super::ApiError;
use super::ApiSuccess;
use super::MessageResponseData;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::cookies::clear_refresh_cookie;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<MessageResponseData>), ApiError> {
    state
        .auth_service
        .logout(&user.user_id)
        .await
        .map_err(ApiError::from)?;

    let jar = jar.add(clear_refresh_cookie());

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            MessageResponseData {
                message: "Logged out successfully".to_string(),
            },
        ),
    ))
}
