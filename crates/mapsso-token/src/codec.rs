//! JWT encode/decode for SSO tokens.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::SsoClaims;
use crate::error::TokenError;
use crate::secret::SigningSecret;

/// Default token lifetime, one hour.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Signs a claim set as a compact HS512 JWT.
pub fn encode_token(claims: &SsoClaims, secret: &SigningSecret) -> Result<String, TokenError> {
    let header = Header::new(Algorithm::HS512);
    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&header, claims, &key).map_err(|e| TokenError::Malformed(e.to_string()))
}

/// Decodes and verifies a token.
///
/// Rejects bad signatures, structural damage and expired tokens (no
/// leeway). The binding context is NOT checked here; callers run
/// [`SsoClaims::verify_binding`] against the requesting client.
pub fn decode_token(token: &str, secret: &SigningSecret) -> Result<SsoClaims, TokenError> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS512);
    validation.leeway = 0;
    validation.validate_exp = true;

    let data = decode::<SsoClaims>(token, &key, &validation).map_err(map_jwt_error)?;

    // The expiry invariant also holds for foreign input.
    if data.claims.exp <= data.claims.iat {
        return Err(TokenError::Malformed(
            "expiry precedes issuance".to_string(),
        ));
    }
    Ok(data.claims)
}

/// Maps `jsonwebtoken` errors onto the codec's error taxonomy.
fn map_jwt_error(err: jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenError::Malformed("unexpected signing algorithm".to_string())
        }
        _ => TokenError::Malformed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_secret() -> SigningSecret {
        SigningSecret::new(b"0123456789abcdef0123456789abcdef".to_vec()).unwrap()
    }

    fn other_secret() -> SigningSecret {
        SigningSecret::new(b"fedcba9876543210fedcba9876543210".to_vec()).unwrap()
    }

    #[test]
    fn test_round_trip_preserves_claims() {
        let claims = SsoClaims::builder("user-42", "auth.example.com")
            .bound_address("203.0.113.7")
            .user_agent("Mozilla/5.0")
            .build();
        let token = encode_token(&claims, &test_secret()).unwrap();
        let decoded = decode_token(&token, &test_secret()).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_wrong_key_is_invalid_signature() {
        let claims = SsoClaims::builder("user-42", "auth.example.com").build();
        let token = encode_token(&claims, &test_secret()).unwrap();
        let err = decode_token(&token, &other_secret()).unwrap_err();
        assert!(matches!(err, TokenError::InvalidSignature));
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = SsoClaims::builder("user-42", "auth.example.com")
            .issued_at(Utc::now().timestamp() - 7200)
            .expires_in_secs(3600)
            .build();
        let token = encode_token(&claims, &test_secret()).unwrap();
        let err = decode_token(&token, &test_secret()).unwrap_err();
        assert!(matches!(err, TokenError::Expired));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let err = decode_token("not-a-jwt", &test_secret()).unwrap_err();
        assert!(matches!(err, TokenError::Malformed(_)));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let claims = SsoClaims::builder("user-42", "auth.example.com").build();
        let token = encode_token(&claims, &test_secret()).unwrap();
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        parts[1] = format!("{}AA", parts[1]);
        assert!(decode_token(&parts.join("."), &test_secret()).is_err());
    }

    #[test]
    fn test_hs256_token_rejected() {
        let claims = SsoClaims::builder("user-42", "auth.example.com").build();
        let header = Header::new(Algorithm::HS256);
        let key = EncodingKey::from_secret(test_secret().as_bytes());
        let token = encode(&header, &claims, &key).unwrap();
        let err = decode_token(&token, &test_secret()).unwrap_err();
        assert!(matches!(err, TokenError::Malformed(_)));
    }
}
