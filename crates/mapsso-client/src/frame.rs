//! Iframe/postMessage strategy.
//!
//! The primary domain hosts a hidden storage frame that owns the token.
//! Pages on secondary domains embed it and exchange tagged messages; the
//! frame answers only senders whose origin is allowlisted, and replies go
//! to that exact origin, never `*`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use mapsso_domains::HostAllowlist;

use crate::error::ClientError;
use crate::popup::AuthApi;

/// Messages crossing the frame boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum ChannelMessage {
    #[serde(rename = "storeToken")]
    StoreToken { token: String },
    #[serde(rename = "getToken")]
    GetToken,
    #[serde(rename = "clearToken")]
    ClearToken,
    #[serde(rename = "tokenResponse")]
    TokenResponse { token: Option<String> },
    #[serde(rename = "tokenStored")]
    TokenStored,
    #[serde(rename = "tokenCleared")]
    TokenCleared,
}

/// Token persistence inside the storage frame (localStorage in practice).
pub trait TokenStore {
    fn store(&mut self, token: &str);
    fn load(&self) -> Option<String>;
    fn clear(&mut self);
}

/// The storage frame's message handler.
pub struct StorageRelay<S> {
    store: S,
    allowlist: HostAllowlist,
}

impl<S: TokenStore> StorageRelay<S> {
    pub fn new(store: S, allowlist: HostAllowlist) -> Self {
        Self { store, allowlist }
    }

    /// Handles one inbound message. The reply, if any, goes back to
    /// `origin` and nowhere else. Messages from unlisted origins are
    /// dropped with an error before the store is touched.
    pub fn handle(
        &mut self,
        origin: &str,
        message: ChannelMessage,
    ) -> Result<Option<ChannelMessage>, ClientError> {
        if !self.allowlist.allows_origin(origin) {
            tracing::warn!(origin = %origin, "dropping message from untrusted origin");
            return Err(ClientError::UntrustedOrigin(origin.to_string()));
        }

        let reply = match message {
            ChannelMessage::StoreToken { token } => {
                self.store.store(&token);
                Some(ChannelMessage::TokenStored)
            }
            ChannelMessage::GetToken => Some(ChannelMessage::TokenResponse {
                token: self.store.load(),
            }),
            ChannelMessage::ClearToken => {
                self.store.clear();
                Some(ChannelMessage::TokenCleared)
            }
            // Reply-shaped messages are not requests; ignore them.
            ChannelMessage::TokenResponse { .. }
            | ChannelMessage::TokenStored
            | ChannelMessage::TokenCleared => None,
        };
        Ok(reply)
    }
}

/// Transport between the embedding page and the storage frame. The
/// implementation posts to the frame's exact origin and resolves with the
/// frame's reply.
#[async_trait]
pub trait FrameChannel {
    async fn exchange(&mut self, message: ChannelMessage) -> Result<ChannelMessage, ClientError>;
}

/// What a sync pass achieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Local session existed; its token is now in shared storage.
    TokenPublished,
    /// A stored token was redeemed here; the page should reload.
    SessionEstablished { user_id: String },
    /// No session anywhere, nothing to do.
    NoToken,
}

/// The embedding page's side of the iframe strategy.
pub struct FrameFlow<A> {
    api: A,
}

impl<A: AuthApi> FrameFlow<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// One synchronization pass.
    ///
    /// With a local session the token flows out to shared storage; without
    /// one, a stored token (if any) is redeemed against this domain.
    pub async fn sync(
        &mut self,
        channel: &mut dyn FrameChannel,
        has_local_session: bool,
    ) -> Result<FrameOutcome, ClientError> {
        if has_local_session {
            let token = self.api.fetch_token().await?;
            match channel.exchange(ChannelMessage::StoreToken { token }).await? {
                ChannelMessage::TokenStored => Ok(FrameOutcome::TokenPublished),
                _ => Err(ClientError::UnexpectedReply),
            }
        } else {
            match channel.exchange(ChannelMessage::GetToken).await? {
                ChannelMessage::TokenResponse { token: Some(token) } => {
                    let user_id = self.api.verify(&token).await?;
                    tracing::info!(user_id = %user_id, "session established from stored token");
                    Ok(FrameOutcome::SessionEstablished { user_id })
                }
                ChannelMessage::TokenResponse { token: None } => Ok(FrameOutcome::NoToken),
                _ => Err(ClientError::UnexpectedReply),
            }
        }
    }

    /// Logs out locally and clears the shared token.
    pub async fn clear(&mut self, channel: &mut dyn FrameChannel) -> Result<(), ClientError> {
        self.api.logout().await?;
        match channel.exchange(ChannelMessage::ClearToken).await? {
            ChannelMessage::TokenCleared => Ok(()),
            _ => Err(ClientError::UnexpectedReply),
        }
    }
}
