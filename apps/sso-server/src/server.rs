//! Router assembly and process lifecycle.

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use mapsso_api::middleware::NONCE_HEADER;
use mapsso_api::{sso_router, SsoState};

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Cross-origin policy: only allowlisted hosts (over https), with
/// credentials so session cookies travel.
///
/// The origin list is a snapshot taken at startup. The origin guard
/// re-resolves the allowlist per request, so a mapping change takes effect
/// there immediately but needs a restart to reach this layer. The binary's
/// mappings come from the environment, which only changes on restart
/// anyway.
pub async fn cors_layer(state: &SsoState) -> CorsLayer {
    let allowlist = state.allowlist.resolve().await;
    let origins: Vec<HeaderValue> = allowlist
        .hosts()
        .filter_map(|host| HeaderValue::from_str(&format!("https://{host}")).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(NONCE_HEADER)])
        .allow_credentials(true)
}

/// The full application router: `/health` plus the SSO endpoints under
/// `/sso/v1`.
pub fn build_router(state: SsoState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/sso/v1", sso_router(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Resolves on ctrl-c or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install ctrl-c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received ctrl-c, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
