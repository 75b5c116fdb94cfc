//! Relay URL construction and target-origin validation.

use url::Url;

use mapsso_domains::resolver::is_valid_hostname;

use crate::error::ClientError;

/// What the relay page should do once it loads on the primary domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayAction {
    Login,
    Logout,
}

impl RelayAction {
    fn as_str(&self) -> &'static str {
        match self {
            RelayAction::Login => "login",
            RelayAction::Logout => "logout",
        }
    }
}

/// Builds the relay page URL.
///
/// Hosts that do not look like hostnames are dropped rather than smuggled
/// into the query string; `host[]` repeats once per surviving host.
pub fn build_relay_url(
    auth_popup: &Url,
    token: Option<&str>,
    redirect_url: &str,
    action: RelayAction,
    nonce: &str,
    hosts: &[String],
) -> Url {
    let mut url = auth_popup.clone();
    {
        let mut query = url.query_pairs_mut();
        if let Some(token) = token {
            query.append_pair("token", token);
        }
        query.append_pair("redirect_url", redirect_url);
        query.append_pair("action", action.as_str());
        query.append_pair("_wpnonce", nonce);
        for host in hosts.iter().filter(|h| is_valid_hostname(h)) {
            query.append_pair("host[]", host);
        }
    }
    url
}

/// The relay URL must live on the page's own origin; a handshake never
/// navigates a popup anywhere else.
pub fn validate_target_origin(relay: &Url, page_origin: &Url) -> Result<(), ClientError> {
    let expected = page_origin.origin();
    let actual = relay.origin();
    if actual != expected {
        return Err(ClientError::InvalidTargetOrigin {
            expected: expected.ascii_serialization(),
            actual: actual.ascii_serialization(),
        });
    }
    Ok(())
}
