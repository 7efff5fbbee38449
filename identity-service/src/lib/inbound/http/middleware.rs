use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::user::models::UserId;
use crate::domain::user::models::UserRole;
use crate::inbound::http::router::AppState;

/// Extension type to store authenticated user info in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
    pub role: UserRole,
}

/// Middleware that validates access tokens and adds user info to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    // Extract token from Authorization header
    let token = extract_token_from_header(&req)?;

    // Validate against the access secret; refresh tokens are rejected here
    let claims = state.token_issuer.verify_access(token).map_err(|e| {
        tracing::warn!("JWT validation failed: {}", e);
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid or expired token"
            })),
        )
            .into_response()
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::error!("Failed to parse user ID from token: {}", e);
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid token format"
            })),
        )
            .into_response()
    })?;

    let role = UserRole::from_string(&claims.role).map_err(|e| {
        tracing::error!("Failed to parse role from token: {}", e);
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid token format"
            })),
        )
            .into_response()
    })?;

    // Add authenticated user info to request extensions
    req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email,
        role,
    });

    Ok(next.run(req).await)
}

/// Middleware that restricts a route to admin accounts.
///
/// Must run after `authenticate`; it reads the extension that middleware
/// inserted.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, Response> {
    let user = req.extensions().get::<AuthenticatedUser>().ok_or_else(|| {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Authentication required"
            })),
        )
            .into_response()
    })?;

    if user.role != UserRole::Admin {
        return Err((
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "Admin access required"
            })),
        )
            .into_response());
    }

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "Missing Authorization header"
                })),
            )
                .into_response()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid Authorization header"
            })),
        )
            .into_response()
    })?;

    if !auth_str.starts_with("Bearer ") {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid Authorization header format. Expected: Bearer <token>"
            })),
        )
            .into_response());
    }

    Ok(auth_str.trim_start_matches("Bearer "))
}
