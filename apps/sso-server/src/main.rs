use std::net::SocketAddr;

use sso_server::config::Config;
use sso_server::server::{build_router, cors_layer, shutdown_signal};
use sso_server::{logging, state};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("FATAL: configuration error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.log_filter);

    match config.validate_security_config() {
        Ok(warnings) => {
            for warning in warnings {
                tracing::warn!(warning = %warning, "security configuration");
            }
        }
        Err(errors) => {
            for error in errors {
                tracing::error!(error = %error, "security configuration");
            }
            std::process::exit(1);
        }
    }

    let state = match state::build_state(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    let cors = cors_layer(&state).await;
    let app = build_router(state, cors);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, addr = %addr, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(
        addr = %addr,
        environment = ?config.environment,
        base_host = %config.base_host,
        "sso server listening"
    );

    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
