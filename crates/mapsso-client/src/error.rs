//! Handshake failure modes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The browser refused to open the popup (blocker, missing gesture).
    #[error("popup was blocked")]
    PopupBlocked,

    /// An API call failed at the transport level.
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// The relay URL does not share the page's origin; navigation refused.
    #[error("relay target origin {actual} does not match page origin {expected}")]
    InvalidTargetOrigin { expected: String, actual: String },

    /// The API rejected the operation (bad credentials, rejected token).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// A postMessage arrived from an origin outside the allowlist.
    #[error("message from untrusted origin {0}")]
    UntrustedOrigin(String),

    /// A relay or page URL failed to parse.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The storage frame replied with something the flow cannot use.
    #[error("unexpected channel reply")]
    UnexpectedReply,
}
