//! Wires configuration into the shared handler state.

use std::sync::Arc;

use mapsso_api::services::{
    hash_password, InMemoryDirectory, InMemorySessionStore, NonceService, TokenService,
    UserRecord,
};
use mapsso_api::{EndpointSettings, SsoState};
use mapsso_domains::{AllowlistResolver, StaticMappingRepository, SystemDnsProbe};

use crate::config::{Config, ConfigError};

pub fn build_state(config: &Config) -> Result<SsoState, ConfigError> {
    let mut users = Vec::with_capacity(config.users.len());
    for seed in &config.users {
        let password_hash =
            hash_password(&seed.password).map_err(|e| ConfigError::InvalidValue {
                var: "SSO_USERS".to_string(),
                message: format!("could not hash password for '{}': {e}", seed.username),
            })?;
        users.push(UserRecord {
            id: seed.id.clone(),
            username: seed.username.clone(),
            email: seed.email.clone(),
            password_hash,
        });
    }

    let repository = Arc::new(StaticMappingRepository::new(config.mappings.clone()));
    let mut allowlist = AllowlistResolver::new(
        repository,
        config.subdomain_mapping_ids.clone(),
        config.alias_mapping_ids.clone(),
        config.base_host.clone(),
        config.current_domain.clone(),
    );
    if config.require_dns {
        allowlist = allowlist.with_dns_probe(Arc::new(SystemDnsProbe));
    }

    let domain = config
        .current_domain
        .clone()
        .unwrap_or_else(|| config.base_host.clone());

    Ok(SsoState {
        directory: Arc::new(InMemoryDirectory::new(users)),
        sessions: Arc::new(InMemorySessionStore::new()),
        tokens: Arc::new(TokenService::new(
            config.jwt_secret.clone(),
            config.base_host.clone(),
            config.token_ttl_secs,
        )),
        nonces: Arc::new(NonceService::new(config.jwt_secret.as_bytes().to_vec())),
        allowlist: Arc::new(allowlist),
        settings: Arc::new(EndpointSettings {
            ajax_url: format!("https://{domain}/sso/v1"),
            auth_popup: config.relay_url.clone(),
            domain,
            logout_redirect_url: config.logout_redirect_url.clone(),
            allow_empty_origin: config.allow_empty_origin,
        }),
    })
}
