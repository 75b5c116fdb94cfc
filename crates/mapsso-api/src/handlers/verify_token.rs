//! Token redemption on a secondary domain.

use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::{Extension, Json};
use axum_extra::extract::cookie::CookieJar;

use validator::Validate;

use mapsso_token::TokenError;

use crate::error::SsoApiError;
use crate::handlers::session_cookie;
use crate::models::{VerifyTokenRequest, VerifyTokenResponse};
use crate::router::SsoState;

/// Verifies a token issued on another mapped domain and, on success,
/// establishes the session on this one. All failure detail collapses into
/// one generic 401.
#[utoipa::path(
    post,
    path = "/sso/v1/verify-token",
    tag = "sso",
    responses(
        (status = 200, description = "Token accepted; session established on this domain"),
        (status = 401, description = "Token validation failed"),
    )
)]
pub async fn verify_token(
    Extension(state): Extension<SsoState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    jar: CookieJar,
    Json(request): Json<VerifyTokenRequest>,
) -> Result<(CookieJar, Json<VerifyTokenResponse>), SsoApiError> {
    request.validate().map_err(|_| {
        SsoApiError::TokenRejected(TokenError::Malformed("empty token".to_string()))
    })?;

    let client_ip = addr.ip().to_string();
    let claims = match state.tokens.verify(&request.token, &client_ip) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!(client = %client_ip, reason = %e, "token verification failed");
            return Err(SsoApiError::TokenRejected(e));
        }
    };

    // Subject must still exist; a verified token for a deleted user leaves
    // no session behind.
    let Some(user) = state.directory.find_by_id(&claims.sub).await else {
        tracing::warn!(user_id = %claims.sub, "token subject not found");
        return Err(SsoApiError::UnknownUser);
    };

    let session_id = state.sessions.create(&user.id).await;
    let jar = jar.add(session_cookie(session_id));

    tracing::info!(user_id = %user.id, client = %client_ip, "cross-domain token accepted");
    Ok((
        jar,
        Json(VerifyTokenResponse {
            success: true,
            user_id: user.id,
        }),
    ))
}
