//! SSO token claims and builder.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::codec::DEFAULT_TOKEN_TTL_SECS;
use crate::error::TokenError;

/// Claim set carried by an SSO token.
///
/// `sub` identifies the authenticated user on the primary domain. The
/// binding context (`ip`, `user_agent`) ties the token to the client that
/// requested it; `nonce` makes every issued token unique even for the same
/// subject within the same second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SsoClaims {
    /// Subject (user id).
    pub sub: String,
    /// Issuer (primary domain).
    pub iss: String,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch. Always greater than `iat`.
    pub exp: i64,
    /// Unique token id.
    pub jti: String,
    /// Client address the token is bound to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    /// Client user agent the token was issued for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Per-token random value.
    pub nonce: String,
}

impl SsoClaims {
    pub fn builder(sub: impl Into<String>, iss: impl Into<String>) -> SsoClaimsBuilder {
        SsoClaimsBuilder::new(sub, iss)
    }

    /// Checks the binding context against the verifying request's client
    /// address. Tokens without a bound address pass unconditionally.
    pub fn verify_binding(&self, remote_addr: &str) -> Result<(), TokenError> {
        match self.ip.as_deref() {
            Some(bound) if bound != remote_addr => Err(TokenError::OriginMismatch),
            _ => Ok(()),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.exp < Utc::now().timestamp()
    }
}

/// Builder for [`SsoClaims`].
///
/// Defaults: `iat` = now, `exp` = `iat` + [`DEFAULT_TOKEN_TTL_SECS`],
/// fresh `jti` and `nonce` UUIDs.
#[derive(Debug, Clone)]
pub struct SsoClaimsBuilder {
    sub: String,
    iss: String,
    iat: Option<i64>,
    ttl_secs: i64,
    ip: Option<String>,
    user_agent: Option<String>,
    nonce: Option<String>,
}

impl SsoClaimsBuilder {
    pub fn new(sub: impl Into<String>, iss: impl Into<String>) -> Self {
        Self {
            sub: sub.into(),
            iss: iss.into(),
            iat: None,
            ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            ip: None,
            user_agent: None,
            nonce: None,
        }
    }

    /// Overrides issued-at (mainly for tests).
    #[must_use]
    pub fn issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Sets the token lifetime. Values below one second are clamped so the
    /// expiry invariant (`exp > iat`) holds.
    #[must_use]
    pub fn expires_in_secs(mut self, ttl_secs: i64) -> Self {
        self.ttl_secs = ttl_secs.max(1);
        self
    }

    /// Binds the token to a client address.
    #[must_use]
    pub fn bound_address(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    #[must_use]
    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    pub fn build(self) -> SsoClaims {
        let iat = self.iat.unwrap_or_else(|| Utc::now().timestamp());
        SsoClaims {
            sub: self.sub,
            iss: self.iss,
            iat,
            exp: iat + self.ttl_secs,
            jti: Uuid::new_v4().to_string(),
            ip: self.ip,
            user_agent: self.user_agent,
            nonce: self.nonce.unwrap_or_else(|| Uuid::new_v4().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_defaults() {
        let claims = SsoClaims::builder("user-1", "auth.example.com").build();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.iss, "auth.example.com");
        assert_eq!(claims.exp, claims.iat + DEFAULT_TOKEN_TTL_SECS);
        assert!(!claims.jti.is_empty());
        assert!(!claims.nonce.is_empty());
        assert!(claims.ip.is_none());
    }

    #[test]
    fn test_expiry_always_after_issuance() {
        let claims = SsoClaims::builder("user-1", "auth.example.com")
            .expires_in_secs(0)
            .build();
        assert!(claims.exp > claims.iat);

        let claims = SsoClaims::builder("user-1", "auth.example.com")
            .expires_in_secs(-30)
            .build();
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_fresh_ids_per_build() {
        let a = SsoClaims::builder("user-1", "auth.example.com").build();
        let b = SsoClaims::builder("user-1", "auth.example.com").build();
        assert_ne!(a.jti, b.jti);
        assert_ne!(a.nonce, b.nonce);
    }

    #[test]
    fn test_verify_binding_match() {
        let claims = SsoClaims::builder("user-1", "auth.example.com")
            .bound_address("203.0.113.7")
            .build();
        assert!(claims.verify_binding("203.0.113.7").is_ok());
    }

    #[test]
    fn test_verify_binding_mismatch() {
        let claims = SsoClaims::builder("user-1", "auth.example.com")
            .bound_address("203.0.113.7")
            .build();
        let err = claims.verify_binding("198.51.100.9").unwrap_err();
        assert!(matches!(err, TokenError::OriginMismatch));
    }

    #[test]
    fn test_verify_binding_unbound_token_passes() {
        let claims = SsoClaims::builder("user-1", "auth.example.com").build();
        assert!(claims.verify_binding("198.51.100.9").is_ok());
    }

    #[test]
    fn test_is_expired() {
        let live = SsoClaims::builder("user-1", "auth.example.com").build();
        assert!(!live.is_expired());

        let stale = SsoClaims::builder("user-1", "auth.example.com")
            .issued_at(Utc::now().timestamp() - 7200)
            .expires_in_secs(3600)
            .build();
        assert!(stale.is_expired());
    }

    #[test]
    fn test_unbound_claims_skip_ip_field_in_json() {
        let claims = SsoClaims::builder("user-1", "auth.example.com").build();
        let json = serde_json::to_string(&claims).unwrap();
        assert!(!json.contains("\"ip\""));
        assert!(!json.contains("\"user_agent\""));
    }
}
