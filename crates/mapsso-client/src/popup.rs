//! Popup relay strategy.
//!
//! The popup MUST open synchronously inside the user gesture; any await
//! before `open_popup` gets it blocked. The flow therefore opens a blank
//! popup first, talks to the API, and only then points the popup at the
//! relay page.

use async_trait::async_trait;
use url::Url;

use crate::error::ClientError;
use crate::geometry::{PopupGeometry, WindowMetrics};
use crate::relay::{build_relay_url, validate_target_origin, RelayAction};

/// Window name shared by every handshake popup, so repeated clicks reuse
/// one window instead of stacking them.
pub const POPUP_NAME: &str = "ssoPopup";

/// A popup the flow can steer.
pub trait PopupHandle {
    fn navigate(&mut self, url: &Url);
    fn close(&mut self);
}

/// The opener window.
pub trait BrowserWindow {
    /// Opens a blank popup. `None` means the browser blocked it.
    fn open_popup(&mut self, name: &str, features: &str) -> Option<Box<dyn PopupHandle>>;

    /// Submits the plain login form, the non-SSO fallback path.
    fn submit_login_form(&mut self);

    fn metrics(&self) -> WindowMetrics;

    /// Origin of the page the flow runs on.
    fn page_url(&self) -> Url;
}

/// The endpoint service, as seen from the browser.
///
/// Implementations own transport concerns (timeouts included); any
/// transport-level failure surfaces as [`ClientError::NetworkFailure`],
/// an API-level rejection as [`ClientError::AuthFailed`].
#[async_trait]
pub trait AuthApi {
    /// Exchanges credentials for a token.
    async fn login(&self, credentials: &Credentials) -> Result<String, ClientError>;

    /// Fetches a token for the already-authenticated session.
    async fn fetch_token(&self) -> Result<String, ClientError>;

    /// Redeems a token on this domain; returns the user id.
    async fn verify(&self, token: &str) -> Result<String, ClientError>;

    async fn logout(&self) -> Result<(), ClientError>;
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub redirect_to: Option<String>,
}

/// Bootstrap configuration, the server's `/settings` payload after URL
/// parsing.
#[derive(Debug, Clone)]
pub struct HandshakeSettings {
    pub auth_popup: Url,
    pub nonce: String,
    pub host_list: Vec<String>,
    pub logout_redirect_url: String,
}

/// Where a handshake currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakePhase {
    Idle,
    PopupOpened,
    LoginPending,
    TokenIssued,
    RelayNavigated,
    LoginFailed,
    PopupClosed,
    FormFallbackSubmitted,
}

/// Drives the popup handshake. Terminal phases are
/// [`HandshakePhase::RelayNavigated`] (token handed to the relay page) and
/// [`HandshakePhase::FormFallbackSubmitted`] (SSO out of the picture, the
/// plain form takes over).
pub struct PopupFlow<W, A> {
    window: W,
    api: A,
    settings: HandshakeSettings,
    phase: HandshakePhase,
}

impl<W: BrowserWindow, A: AuthApi> PopupFlow<W, A> {
    pub fn new(window: W, api: A, settings: HandshakeSettings) -> Self {
        Self {
            window,
            api,
            settings,
            phase: HandshakePhase::Idle,
        }
    }

    pub fn phase(&self) -> HandshakePhase {
        self.phase
    }

    fn advance(&mut self, phase: HandshakePhase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "handshake phase change");
        self.phase = phase;
    }

    /// Runs the login handshake end to end.
    ///
    /// A blocked popup aborts with [`ClientError::PopupBlocked`]; an API
    /// failure closes the popup and submits the plain form instead; a
    /// relay URL off the page's origin aborts before any navigation.
    pub async fn run_login(
        &mut self,
        credentials: Credentials,
        redirect_url: &str,
    ) -> Result<HandshakePhase, ClientError> {
        let features = PopupGeometry::centered(&self.window.metrics()).feature_string();
        // Synchronous, pre-await: this is the user-gesture window.
        let Some(mut popup) = self.window.open_popup(POPUP_NAME, &features) else {
            tracing::warn!("popup blocked, handshake aborted");
            return Err(ClientError::PopupBlocked);
        };
        self.advance(HandshakePhase::PopupOpened);

        self.advance(HandshakePhase::LoginPending);
        let token = match self.api.login(&credentials).await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(reason = %e, "login failed, falling back to the plain form");
                self.advance(HandshakePhase::LoginFailed);
                popup.close();
                self.advance(HandshakePhase::PopupClosed);
                self.window.submit_login_form();
                self.advance(HandshakePhase::FormFallbackSubmitted);
                return Ok(self.phase);
            }
        };
        self.advance(HandshakePhase::TokenIssued);

        let relay = build_relay_url(
            &self.settings.auth_popup,
            Some(&token),
            redirect_url,
            RelayAction::Login,
            &self.settings.nonce,
            &self.settings.host_list,
        );
        if let Err(e) = validate_target_origin(&relay, &self.window.page_url()) {
            popup.close();
            self.advance(HandshakePhase::PopupClosed);
            return Err(e);
        }

        popup.navigate(&relay);
        self.advance(HandshakePhase::RelayNavigated);
        Ok(self.phase)
    }

    /// Opens the logout relay in a popup. No token travels; the relay page
    /// tears sessions down domain by domain. If the logout call fails the
    /// popup closes before the error propagates.
    pub async fn run_logout(&mut self) -> Result<HandshakePhase, ClientError> {
        let relay = build_relay_url(
            &self.settings.auth_popup,
            None,
            &self.settings.logout_redirect_url,
            RelayAction::Logout,
            &self.settings.nonce,
            &self.settings.host_list,
        );
        validate_target_origin(&relay, &self.window.page_url())?;

        let features = PopupGeometry::centered(&self.window.metrics()).feature_string();
        let Some(mut popup) = self.window.open_popup(POPUP_NAME, &features) else {
            return Err(ClientError::PopupBlocked);
        };
        self.advance(HandshakePhase::PopupOpened);

        if let Err(e) = self.api.logout().await {
            tracing::warn!(reason = %e, "logout call failed, closing popup");
            popup.close();
            self.advance(HandshakePhase::PopupClosed);
            return Err(e);
        }
        popup.navigate(&relay);
        self.advance(HandshakePhase::RelayNavigated);
        Ok(self.phase)
    }
}
