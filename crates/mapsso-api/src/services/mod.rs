//! Service layer: identity, sessions, tokens, anti-forgery nonces.

pub mod directory;
pub mod nonce;
pub mod session;
pub mod tokens;

pub use directory::{hash_password, InMemoryDirectory, UserDirectory, UserRecord};
pub use nonce::NonceService;
pub use session::{InMemorySessionStore, SessionStore, SESSION_COOKIE};
pub use tokens::TokenService;
