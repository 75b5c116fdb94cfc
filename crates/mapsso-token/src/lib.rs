//! Signed token codec for the cross-domain SSO handshake.
//!
//! Tokens are compact JWTs signed with HMAC-SHA512. Every mapped domain in a
//! deployment shares one signing secret, so possession of a valid token is
//! proof that the bearer authenticated against the primary domain. Claims
//! carry a binding context (client address, user agent) that the verifying
//! side checks before trusting the token.

pub mod claims;
pub mod codec;
pub mod error;
pub mod secret;

pub use claims::{SsoClaims, SsoClaimsBuilder};
pub use codec::{decode_token, encode_token, DEFAULT_TOKEN_TTL_SECS};
pub use error::TokenError;
pub use secret::SigningSecret;
