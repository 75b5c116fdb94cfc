//! Deployment signing secret.

use crate::error::TokenError;

/// Minimum accepted secret length in bytes. HMAC-SHA512 keys shorter than
/// the hash output are trivially brute-forceable at this size.
pub const MIN_SECRET_LEN: usize = 32;

/// Shared HMAC secret for the deployment.
///
/// Always supplied externally (environment, secret manager); there is no
/// built-in default. `Debug` never prints key material.
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Wraps raw key bytes, rejecting secrets shorter than
    /// [`MIN_SECRET_LEN`].
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, TokenError> {
        let bytes = bytes.into();
        if bytes.len() < MIN_SECRET_LEN {
            return Err(TokenError::InvalidKey(format!(
                "secret must be at least {MIN_SECRET_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SigningSecret").field(&"<redacted>").finish()
    }
}
