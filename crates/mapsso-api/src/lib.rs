//! Auth endpoints for the cross-domain SSO handshake.
//!
//! Mounted under `/sso/v1`:
//!
//! - `POST /login` issues a token and a local session for valid credentials
//! - `GET /generate-token` issues a fresh token for the active session
//! - `POST /verify-token` redeems a token issued on another mapped domain
//! - `POST /logout` destroys the local session
//! - `GET /settings` hands the browser client its bootstrap configuration
//!
//! The host platform's user directory and session machinery stay behind
//! traits ([`services::UserDirectory`], [`services::SessionStore`]); this
//! crate never persists anything itself.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;
pub mod services;

pub use error::SsoApiError;
pub use router::{sso_router, EndpointSettings, SsoState};
