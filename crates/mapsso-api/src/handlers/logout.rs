//! Session teardown.

use axum::{Extension, Json};
use axum_extra::extract::cookie::CookieJar;

use crate::error::SsoApiError;
use crate::handlers::removal_cookie;
use crate::models::LogoutResponse;
use crate::router::SsoState;
use crate::services::SESSION_COOKIE;

/// Destroys the local session. Idempotent; logging out twice is fine.
#[utoipa::path(
    post,
    path = "/sso/v1/logout",
    tag = "sso",
    responses((status = 200, description = "Session destroyed (or none existed)"))
)]
pub async fn logout(
    Extension(state): Extension<SsoState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<LogoutResponse>), SsoApiError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.destroy(cookie.value()).await;
        tracing::info!("session destroyed");
    }
    let jar = jar.remove(removal_cookie());

    Ok((
        jar,
        Json(LogoutResponse {
            success: true,
            message: "Logged out successfully".to_string(),
        }),
    ))
}
