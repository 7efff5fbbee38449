use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<ApiSuccess<ListUsersResponseData>, ApiError> {
    state
        .user_service
        .list_users()
        .await
        .map_err(ApiError::from)
        .map(|users| {
            ApiSuccess::new(
                StatusCode::OK,
                ListUsersResponseData {
                    users: users.iter().map(UserData::from).collect(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListUsersResponseData {
    pub users: Vec<UserData>,
}
