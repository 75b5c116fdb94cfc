//! API error type and the uniform response envelope.
//!
//! Every failure leaves the service as `{"success": false, ...}` with either
//! a `message` (caller mistakes worth explaining) or an `error` (security
//! failures, collapsed to a generic string so probes learn nothing about
//! which check tripped).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use mapsso_token::TokenError;

#[derive(Debug, Error)]
pub enum SsoApiError {
    /// Login called with an empty username or password.
    #[error("username and password are required")]
    MissingCredentials,

    /// Credentials did not match a directory entry.
    #[error("invalid login credentials")]
    InvalidCredentials,

    /// Token issuance requested without an active session.
    #[error("no authenticated session")]
    Unauthenticated,

    /// Token failed decoding, expiry or binding checks.
    #[error("token rejected: {0}")]
    TokenRejected(#[from] TokenError),

    /// Token verified but its subject no longer exists in the directory.
    #[error("token subject not found")]
    UnknownUser,

    /// Anti-forgery nonce or Origin check failed.
    #[error("request origin not allowed")]
    ForbiddenOrigin,

    #[error("internal error: {0}")]
    Internal(String),
}

impl SsoApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SsoApiError::MissingCredentials => StatusCode::BAD_REQUEST,
            SsoApiError::InvalidCredentials
            | SsoApiError::Unauthenticated
            | SsoApiError::TokenRejected(_)
            | SsoApiError::UnknownUser => StatusCode::UNAUTHORIZED,
            SsoApiError::ForbiddenOrigin => StatusCode::FORBIDDEN,
            SsoApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The wire body. Token and session failures share one generic string
    /// each; the detailed variant only reaches the logs.
    fn body(&self) -> serde_json::Value {
        match self {
            SsoApiError::MissingCredentials => json!({
                "success": false,
                "message": "Username and password are required",
            }),
            SsoApiError::InvalidCredentials => json!({
                "success": false,
                "message": "Invalid login credentials",
            }),
            SsoApiError::Unauthenticated => json!({
                "success": false,
                "error": "Authentication failed",
            }),
            SsoApiError::TokenRejected(_) | SsoApiError::UnknownUser => json!({
                "success": false,
                "error": "Token validation failed",
            }),
            SsoApiError::ForbiddenOrigin => json!({
                "success": false,
                "message": "Invalid request origin",
            }),
            SsoApiError::Internal(_) => json!({
                "success": false,
                "message": "Internal server error",
            }),
        }
    }
}

impl IntoResponse for SsoApiError {
    fn into_response(self) -> Response {
        if matches!(self, SsoApiError::Internal(_)) {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
        (self.status_code(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            SsoApiError::MissingCredentials.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SsoApiError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            SsoApiError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            SsoApiError::TokenRejected(TokenError::Expired).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            SsoApiError::UnknownUser.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            SsoApiError::ForbiddenOrigin.status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_token_failures_collapse_to_one_message() {
        let expired = SsoApiError::TokenRejected(TokenError::Expired).body();
        let forged = SsoApiError::TokenRejected(TokenError::InvalidSignature).body();
        let unknown = SsoApiError::UnknownUser.body();
        assert_eq!(expired, forged);
        assert_eq!(expired, unknown);
        assert_eq!(expired["error"], "Token validation failed");
        assert_eq!(expired["success"], false);
    }

    #[test]
    fn test_missing_credentials_message() {
        let body = SsoApiError::MissingCredentials.body();
        assert_eq!(body["message"], "Username and password are required");
        assert!(body.get("error").is_none());
    }
}
