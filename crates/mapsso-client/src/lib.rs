//! Browser-side orchestration of the cross-domain SSO handshake.
//!
//! Two strategies move a token between mapped domains:
//!
//! - **Popup relay**: open a popup, log in over the API, then navigate the
//!   popup to the relay page on the primary domain with the token in the
//!   query string. If anything fails, close the popup and fall back to the
//!   plain login form.
//! - **Iframe channel**: a hidden iframe on the primary domain owns token
//!   storage; the embedding page talks to it over `postMessage` with
//!   explicit target origins.
//!
//! The browser surfaces (window, popup, fetch, storage) sit behind traits
//! so the flows run headless under test.

pub mod error;
pub mod frame;
pub mod geometry;
pub mod popup;
pub mod relay;

pub use error::ClientError;
pub use frame::{ChannelMessage, FrameChannel, FrameFlow, FrameOutcome, StorageRelay, TokenStore};
pub use geometry::{PopupGeometry, WindowMetrics};
pub use popup::{
    AuthApi, BrowserWindow, Credentials, HandshakePhase, HandshakeSettings, PopupFlow,
    PopupHandle,
};
pub use relay::{build_relay_url, validate_target_origin, RelayAction};
