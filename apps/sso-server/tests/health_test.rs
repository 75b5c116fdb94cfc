//! The assembled application, driven end to end.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use mapsso_domains::DomainMapping;
use mapsso_token::SigningSecret;
use sso_server::config::{AppEnvironment, Config};
use sso_server::server::{build_router, cors_layer};
use sso_server::state::build_state;

fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        log_filter: "info".to_string(),
        environment: AppEnvironment::Development,
        jwt_secret: SigningSecret::new(b"server-test-secret-0123456789abcdef".to_vec())
            .expect("secret is long enough"),
        token_ttl_secs: 3600,
        base_host: "example.com".to_string(),
        current_domain: None,
        mappings: vec![DomainMapping {
            id: 1,
            host: "shop.example.com".to_string(),
        }],
        subdomain_mapping_ids: vec![1],
        alias_mapping_ids: vec![],
        require_dns: false,
        allow_empty_origin: true,
        relay_url: "https://example.com/sso-auth/".to_string(),
        logout_redirect_url: "https://example.com/".to_string(),
        users: vec![],
    }
}

async fn test_app() -> axum::Router {
    let state = build_state(&test_config()).expect("state builds");
    let cors = cors_layer(&state).await;
    build_router(state, cors)
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body readable")
        .to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("body is json");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_sso_routes_are_mounted() {
    let app = test_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/sso/v1/settings")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body readable")
        .to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("body is json");
    assert_eq!(body["domain"], "example.com");
    let hosts: Vec<&str> = body["host_list"]
        .as_array()
        .expect("host_list is an array")
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert_eq!(hosts, vec!["example.com", "shop.example.com"]);
}
