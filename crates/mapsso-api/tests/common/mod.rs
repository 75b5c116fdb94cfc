//! Shared test harness: a fully wired router with in-memory services.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::connect_info::MockConnectInfo;
use axum::Router;

use mapsso_api::services::{
    hash_password, InMemoryDirectory, InMemorySessionStore, NonceService, TokenService,
    UserRecord,
};
use mapsso_api::{sso_router, EndpointSettings, SsoState};
use mapsso_domains::{AllowlistResolver, DomainMapping, StaticMappingRepository};
use mapsso_token::SigningSecret;

pub const CLIENT_IP: &str = "203.0.113.7";
pub const ISSUER: &str = "auth.example.com";

const SECRET: &[u8] = b"integration-test-secret-0123456789ab";
const NONCE_KEY: &[u8] = b"integration-test-nonce-key";

pub fn signing_secret() -> SigningSecret {
    SigningSecret::new(SECRET.to_vec()).expect("test secret is long enough")
}

pub fn token_service() -> TokenService {
    TokenService::new(signing_secret(), ISSUER, 3600)
}

pub fn nonce() -> String {
    NonceService::new(NONCE_KEY.to_vec()).issue()
}

/// Router mounted at `/sso/v1` with one known user (`alice` /
/// `correct horse`) and an allowlist of `auth.example.com` plus
/// `shop.example.com`.
pub fn test_app() -> Router {
    let directory = InMemoryDirectory::new(vec![UserRecord {
        id: "user-1".into(),
        username: "alice".into(),
        email: "alice@example.com".into(),
        password_hash: hash_password("correct horse").expect("hashing succeeds"),
    }]);

    let repository = Arc::new(StaticMappingRepository::new(vec![DomainMapping {
        id: 1,
        host: "shop.example.com".into(),
    }]));
    let allowlist = AllowlistResolver::new(repository, vec![1], vec![], ISSUER, None);

    let state = SsoState {
        directory: Arc::new(directory),
        sessions: Arc::new(InMemorySessionStore::new()),
        tokens: Arc::new(token_service()),
        nonces: Arc::new(NonceService::new(NONCE_KEY.to_vec())),
        allowlist: Arc::new(allowlist),
        settings: Arc::new(EndpointSettings {
            ajax_url: format!("https://{ISSUER}/sso/v1"),
            auth_popup: format!("https://{ISSUER}/sso-auth/"),
            domain: ISSUER.into(),
            logout_redirect_url: format!("https://{ISSUER}/"),
            allow_empty_origin: true,
        }),
    };

    Router::new()
        .nest("/sso/v1", sso_router(state))
        .layer(MockConnectInfo(SocketAddr::from(([203, 0, 113, 7], 4444))))
}
