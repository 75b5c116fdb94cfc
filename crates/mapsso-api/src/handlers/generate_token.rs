//! Token issuance for an already-authenticated session.

use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::HeaderMap;
use axum::{Extension, Json};
use axum_extra::extract::cookie::CookieJar;

use crate::error::SsoApiError;
use crate::handlers::user_agent;
use crate::models::GenerateTokenResponse;
use crate::router::SsoState;
use crate::services::SESSION_COOKIE;

/// Issues a fresh token for the session's subject. Each call produces a
/// distinct token; nothing is reused.
#[utoipa::path(
    get,
    path = "/sso/v1/generate-token",
    tag = "sso",
    responses(
        (status = 200, description = "Fresh token for the active session"),
        (status = 401, description = "No active session"),
        (status = 403, description = "Origin guard rejected the request"),
    )
)]
pub async fn generate_token(
    Extension(state): Extension<SsoState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<Json<GenerateTokenResponse>, SsoApiError> {
    let session_id = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or(SsoApiError::Unauthenticated)?;
    let user_id = state
        .sessions
        .subject(&session_id)
        .await
        .ok_or(SsoApiError::Unauthenticated)?;

    let client_ip = addr.ip().to_string();
    let token = state
        .tokens
        .issue(&user_id, Some(&client_ip), user_agent(&headers).as_deref())
        .map_err(|e| SsoApiError::Internal(e.to_string()))?;

    tracing::debug!(user_id = %user_id, "issued handshake token");
    Ok(Json(GenerateTokenResponse {
        success: true,
        token,
    }))
}
