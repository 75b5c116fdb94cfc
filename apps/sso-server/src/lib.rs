//! Standalone SSO endpoint server: config, logging, state wiring, router.

pub mod config;
pub mod logging;
pub mod server;
pub mod state;
