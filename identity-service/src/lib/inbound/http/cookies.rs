use auth::REFRESH_TOKEN_TTL_DAYS;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use time::Duration;

/// Cookie carrying the refresh token between browser and service.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Build the refresh token cookie set on registration, login and refresh.
///
/// HttpOnly and SameSite=Strict keep the token out of reach of scripts and
/// cross-site requests; the lifetime matches the token's own expiry.
pub fn refresh_cookie(token: String) -> Cookie<'static> {
    Cookie::build((REFRESH_TOKEN_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(Duration::days(REFRESH_TOKEN_TTL_DAYS))
        // TODO: secure(true) once the service is behind https
        .secure(false)
        .build()
}

/// Build an expired refresh token cookie, set on logout.
pub fn clear_refresh_cookie() -> Cookie<'static> {
    Cookie::build((REFRESH_TOKEN_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(Duration::ZERO)
        .secure(false)
        .build()
}
