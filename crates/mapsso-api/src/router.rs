//! Route table and shared state.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};

use mapsso_domains::AllowlistResolver;

use crate::handlers;
use crate::middleware::origin_guard;
use crate::services::{NonceService, SessionStore, TokenService, UserDirectory};

/// Deployment-level knobs the handlers read.
pub struct EndpointSettings {
    /// Base URL of this service, handed to the browser client.
    pub ajax_url: String,
    /// Relay page URL for the popup handshake.
    pub auth_popup: String,
    /// Host these endpoints are served from.
    pub domain: String,
    /// Post-logout landing URL.
    pub logout_redirect_url: String,
    /// Whether requests without an `Origin` header pass the origin guard.
    pub allow_empty_origin: bool,
}

/// Shared handler state. Cheap to clone, everything is behind `Arc`.
#[derive(Clone)]
pub struct SsoState {
    pub directory: Arc<dyn UserDirectory>,
    pub sessions: Arc<dyn SessionStore>,
    pub tokens: Arc<TokenService>,
    pub nonces: Arc<NonceService>,
    pub allowlist: Arc<AllowlistResolver>,
    pub settings: Arc<EndpointSettings>,
}

/// Builds the `/sso/v1` router.
///
/// `login` and `generate-token` sit behind the origin guard; `verify-token`
/// carries its own credential (the token) and `logout`/`settings` are
/// harmless without one.
pub fn sso_router(state: SsoState) -> Router {
    let guarded = Router::new()
        .route("/login", post(handlers::login))
        .route("/generate-token", get(handlers::generate_token))
        .route_layer(axum::middleware::from_fn(origin_guard));

    Router::new()
        .merge(guarded)
        .route("/verify-token", post(handlers::verify_token))
        .route("/logout", post(handlers::logout))
        .route("/settings", get(handlers::settings))
        .layer(Extension(state))
}
