//! Credential login.

use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::HeaderMap;
use axum::{Extension, Form, Json};
use axum_extra::extract::cookie::CookieJar;

use crate::error::SsoApiError;
use crate::handlers::{session_cookie, user_agent};
use crate::models::{LoginRequest, LoginResponse, UserSummary};
use crate::router::SsoState;

/// Authenticates form credentials, issues a token bound to the caller and
/// establishes the local session.
#[utoipa::path(
    post,
    path = "/sso/v1/login",
    tag = "sso",
    responses(
        (status = 200, description = "Authenticated; token issued and session established"),
        (status = 400, description = "Empty username or password"),
        (status = 401, description = "Credentials rejected"),
        (status = 403, description = "Origin guard rejected the request"),
    )
)]
pub async fn login(
    Extension(state): Extension<SsoState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    jar: CookieJar,
    headers: HeaderMap,
    Form(request): Form<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), SsoApiError> {
    let username = request.log.trim();
    if username.is_empty() || request.pwd.trim().is_empty() {
        // Never touch the directory for an obviously incomplete form.
        return Err(SsoApiError::MissingCredentials);
    }

    let Some(user) = state.directory.authenticate(username, &request.pwd).await else {
        tracing::warn!(username = %username, client = %addr.ip(), "login rejected");
        return Err(SsoApiError::InvalidCredentials);
    };

    let client_ip = addr.ip().to_string();
    let token = state
        .tokens
        .issue(&user.id, Some(&client_ip), user_agent(&headers).as_deref())
        .map_err(|e| SsoApiError::Internal(e.to_string()))?;

    let session_id = state.sessions.create(&user.id).await;
    let jar = jar.add(session_cookie(session_id));

    tracing::info!(user_id = %user.id, client = %client_ip, "login succeeded");
    Ok((
        jar,
        Json(LoginResponse {
            success: true,
            token,
            user: UserSummary {
                id: user.id,
                username: user.username,
                email: user.email,
            },
        }),
    ))
}
