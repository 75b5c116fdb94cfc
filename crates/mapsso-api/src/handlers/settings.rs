//! Client bootstrap configuration.

use axum::{Extension, Json};

use crate::error::SsoApiError;
use crate::models::ClientSettings;
use crate::router::SsoState;

/// Hands the browser client everything it needs to start a handshake: the
/// endpoint base URL, the relay page, a fresh nonce and the current host
/// allowlist. The allowlist is resolved per request, never cached.
#[utoipa::path(
    get,
    path = "/sso/v1/settings",
    tag = "sso",
    responses((status = 200, description = "Client bootstrap configuration"))
)]
pub async fn settings(
    Extension(state): Extension<SsoState>,
) -> Result<Json<ClientSettings>, SsoApiError> {
    let allowlist = state.allowlist.resolve().await;
    let mut host_list: Vec<String> = allowlist.hosts().map(str::to_string).collect();
    host_list.sort();

    Ok(Json(ClientSettings {
        ajax_url: state.settings.ajax_url.clone(),
        auth_popup: state.settings.auth_popup.clone(),
        domain: state.settings.domain.clone(),
        nonce: state.nonces.issue(),
        host_list,
        logout_redirect_url: state.settings.logout_redirect_url.clone(),
    }))
}
