//! Environment-driven configuration.
//!
//! Loading is fail-fast: a missing signing secret or base host stops the
//! process before it binds a socket. `validate_security_config` reports
//! softer problems (warnings) separately from hard ones (errors).

use serde::Deserialize;
use thiserror::Error;

use mapsso_domains::DomainMapping;
use mapsso_token::{SigningSecret, TokenError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(String),

    #[error("invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("invalid port: {0}")]
    InvalidPort(String),
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Production,
}

impl AppEnvironment {
    fn from_env_str(value: &str) -> Result<Self, ConfigError> {
        match value.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(AppEnvironment::Development),
            "production" | "prod" => Ok(AppEnvironment::Production),
            other => Err(ConfigError::InvalidValue {
                var: "APP_ENV".to_string(),
                message: format!("unknown environment '{other}'"),
            }),
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, AppEnvironment::Production)
    }
}

/// Seed entry for the in-memory user directory (`SSO_USERS` JSON).
#[derive(Debug, Clone, Deserialize)]
pub struct SeedUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_filter: String,
    pub environment: AppEnvironment,

    pub jwt_secret: SigningSecret,
    pub token_ttl_secs: i64,

    pub base_host: String,
    pub current_domain: Option<String>,
    pub mappings: Vec<DomainMapping>,
    pub subdomain_mapping_ids: Vec<i64>,
    pub alias_mapping_ids: Vec<i64>,
    pub require_dns: bool,

    pub allow_empty_origin: bool,
    pub relay_url: String,
    pub logout_redirect_url: String,

    pub users: Vec<SeedUser>,
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name.to_string()))
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_bool(name: &str, default: bool) -> Result<bool, ConfigError> {
    match optional_var(name) {
        None => Ok(default),
        Some(v) => match v.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            other => Err(ConfigError::InvalidValue {
                var: name.to_string(),
                message: format!("expected a boolean, got '{other}'"),
            }),
        },
    }
}

fn parse_id_list(name: &str) -> Result<Vec<i64>, ConfigError> {
    let Some(raw) = optional_var(name) else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>().map_err(|_| ConfigError::InvalidValue {
                var: name.to_string(),
                message: format!("'{s}' is not an integer id"),
            })
        })
        .collect()
}

fn parse_json_var<T: serde::de::DeserializeOwned>(name: &str) -> Result<Vec<T>, ConfigError> {
    let Some(raw) = optional_var(name) else {
        return Ok(Vec::new());
    };
    serde_json::from_str(&raw).map_err(|e| ConfigError::InvalidValue {
        var: name.to_string(),
        message: e.to_string(),
    })
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = optional_var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = optional_var("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidPort(e.to_string()))?;
        let log_filter = optional_var("RUST_LOG").unwrap_or_else(|| "info".to_string());
        let environment = match optional_var("APP_ENV") {
            Some(v) => AppEnvironment::from_env_str(&v)?,
            None => AppEnvironment::Development,
        };

        let jwt_secret = SigningSecret::new(required_var("SSO_JWT_SECRET")?.into_bytes())
            .map_err(|e| match e {
                TokenError::InvalidKey(message) => ConfigError::InvalidValue {
                    var: "SSO_JWT_SECRET".to_string(),
                    message,
                },
                other => ConfigError::InvalidValue {
                    var: "SSO_JWT_SECRET".to_string(),
                    message: other.to_string(),
                },
            })?;
        let token_ttl_secs = match optional_var("SSO_TOKEN_TTL_SECS") {
            None => mapsso_token::DEFAULT_TOKEN_TTL_SECS,
            Some(v) => v.parse::<i64>().ok().filter(|t| *t > 0).ok_or_else(|| {
                ConfigError::InvalidValue {
                    var: "SSO_TOKEN_TTL_SECS".to_string(),
                    message: format!("'{v}' is not a positive number of seconds"),
                }
            })?,
        };

        let base_host = required_var("SSO_BASE_HOST")?;
        let relay_url = optional_var("SSO_RELAY_URL")
            .unwrap_or_else(|| format!("https://{base_host}/sso-auth/"));
        let logout_redirect_url = optional_var("SSO_LOGOUT_REDIRECT_URL")
            .unwrap_or_else(|| format!("https://{base_host}/"));

        Ok(Config {
            host,
            port,
            log_filter,
            environment,
            jwt_secret,
            token_ttl_secs,
            current_domain: optional_var("SSO_CURRENT_DOMAIN"),
            mappings: parse_json_var("SSO_MAPPINGS")?,
            subdomain_mapping_ids: parse_id_list("SSO_SUBDOMAIN_MAPPING_IDS")?,
            alias_mapping_ids: parse_id_list("SSO_ALIAS_MAPPING_IDS")?,
            require_dns: parse_bool("SSO_REQUIRE_DNS", false)?,
            allow_empty_origin: parse_bool("SSO_ALLOW_EMPTY_ORIGIN", true)?,
            relay_url,
            logout_redirect_url,
            users: parse_json_var("SSO_USERS")?,
            base_host,
        })
    }

    /// Splits configuration problems into warnings (log and continue) and
    /// errors (refuse to start).
    pub fn validate_security_config(&self) -> Result<Vec<String>, Vec<String>> {
        let mut warnings = Vec::new();
        let mut errors = Vec::new();

        if self.environment.is_production() {
            if self.allow_empty_origin {
                warnings.push(
                    "SSO_ALLOW_EMPTY_ORIGIN is on in production; requests without an \
                     Origin header bypass the origin check"
                        .to_string(),
                );
            }
            if !self.relay_url.starts_with("https://") {
                errors.push("SSO_RELAY_URL must use https in production".to_string());
            }
        }
        if self.mappings.is_empty() {
            warnings.push(
                "no domain mappings configured; the allowlist only holds the base host"
                    .to_string(),
            );
        }

        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(errors)
        }
    }
}
