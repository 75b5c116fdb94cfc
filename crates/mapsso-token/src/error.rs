//! Error types for token encoding, decoding and binding checks.

use thiserror::Error;

/// Errors surfaced by the token codec.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token's signature does not verify against the deployment secret.
    #[error("invalid token signature")]
    InvalidSignature,

    /// The token is structurally broken (not a JWT, bad base64, wrong
    /// algorithm, missing claims).
    #[error("malformed token: {0}")]
    Malformed(String),

    /// The token's expiry timestamp is in the past.
    #[error("token has expired")]
    Expired,

    /// The token is bound to a different client address than the caller's.
    #[error("token origin does not match the requesting client")]
    OriginMismatch,

    /// The signing secret is unusable (too short).
    #[error("invalid signing secret: {0}")]
    InvalidKey(String),
}

impl TokenError {
    /// Returns true if this error means the token expired.
    pub fn is_expired(&self) -> bool {
        matches!(self, TokenError::Expired)
    }

    /// Returns true if this error means the signature check failed.
    pub fn is_invalid_signature(&self) -> bool {
        matches!(self, TokenError::InvalidSignature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            TokenError::InvalidSignature.to_string(),
            "invalid token signature"
        );
        assert_eq!(TokenError::Expired.to_string(), "token has expired");
        assert_eq!(
            TokenError::Malformed("bad segment count".into()).to_string(),
            "malformed token: bad segment count"
        );
    }

    #[test]
    fn test_classification_helpers() {
        assert!(TokenError::Expired.is_expired());
        assert!(!TokenError::Expired.is_invalid_signature());
        assert!(TokenError::InvalidSignature.is_invalid_signature());
        assert!(!TokenError::OriginMismatch.is_expired());
    }
}
