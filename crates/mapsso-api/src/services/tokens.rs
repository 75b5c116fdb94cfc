//! Token issuance and verification on top of the codec.

use mapsso_token::{decode_token, encode_token, SigningSecret, SsoClaims, TokenError};

/// Issues and verifies SSO tokens for one deployment.
pub struct TokenService {
    secret: SigningSecret,
    issuer: String,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(secret: SigningSecret, issuer: impl Into<String>, ttl_secs: i64) -> Self {
        Self {
            secret,
            issuer: issuer.into(),
            ttl_secs,
        }
    }

    /// Issues a token for a user, bound to the requesting client. Every
    /// call produces a distinct token (fresh `jti` and nonce).
    pub fn issue(
        &self,
        user_id: &str,
        client_ip: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<String, TokenError> {
        let mut builder =
            SsoClaims::builder(user_id, &self.issuer).expires_in_secs(self.ttl_secs);
        if let Some(ip) = client_ip {
            builder = builder.bound_address(ip);
        }
        if let Some(agent) = user_agent {
            builder = builder.user_agent(agent);
        }
        encode_token(&builder.build(), &self.secret)
    }

    /// Decodes a token and checks its binding against the caller.
    pub fn verify(&self, token: &str, remote_addr: &str) -> Result<SsoClaims, TokenError> {
        let claims = decode_token(token, &self.secret)?;
        claims.verify_binding(remote_addr)?;
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        let secret = SigningSecret::new(vec![0x5a; 32]).unwrap();
        TokenService::new(secret, "auth.example.com", 3600)
    }

    #[test]
    fn test_issue_and_verify() {
        let svc = service();
        let token = svc
            .issue("user-1", Some("203.0.113.7"), Some("Mozilla/5.0"))
            .unwrap();
        let claims = svc.verify(&token, "203.0.113.7").unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.iss, "auth.example.com");
    }

    #[test]
    fn test_binding_enforced_on_verify() {
        let svc = service();
        let token = svc.issue("user-1", Some("203.0.113.7"), None).unwrap();
        let err = svc.verify(&token, "198.51.100.9").unwrap_err();
        assert!(matches!(err, TokenError::OriginMismatch));
    }

    #[test]
    fn test_every_issue_is_distinct() {
        let svc = service();
        let a = svc.issue("user-1", None, None).unwrap();
        let b = svc.issue("user-1", None, None).unwrap();
        assert_ne!(a, b);
    }
}
