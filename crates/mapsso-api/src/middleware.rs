//! Origin guard for the endpoints that act on ambient session state.

use axum::extract::Request;
use axum::http::header::ORIGIN;
use axum::middleware::Next;
use axum::response::Response;
use axum::Extension;

use crate::error::SsoApiError;
use crate::router::SsoState;

/// Header carrying the anti-forgery nonce.
pub const NONCE_HEADER: &str = "x-sso-nonce";

/// Rejects requests without a valid anti-forgery nonce or with an `Origin`
/// outside the allowlist.
///
/// A missing `Origin` header passes only when the deployment allows it
/// (non-CORS user agents omit the header on same-origin requests).
pub async fn origin_guard(
    Extension(state): Extension<SsoState>,
    request: Request,
    next: Next,
) -> Result<Response, SsoApiError> {
    let nonce = request
        .headers()
        .get(NONCE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if !state.nonces.verify(nonce) {
        tracing::warn!(path = %request.uri().path(), "rejecting request with bad nonce");
        return Err(SsoApiError::ForbiddenOrigin);
    }

    let origin = request
        .headers()
        .get(ORIGIN)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if origin.is_empty() {
        if !state.settings.allow_empty_origin {
            tracing::warn!(path = %request.uri().path(), "rejecting request without origin");
            return Err(SsoApiError::ForbiddenOrigin);
        }
    } else {
        let allowlist = state.allowlist.resolve().await;
        if !allowlist.allows_origin(origin) {
            tracing::warn!(origin = %origin, "rejecting request from untrusted origin");
            return Err(SsoApiError::ForbiddenOrigin);
        }
    }

    Ok(next.run(request).await)
}
