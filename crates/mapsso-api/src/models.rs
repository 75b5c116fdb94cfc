//! Request and response bodies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Login form. Field names match the classic login form (`log`, `pwd`) so
/// the same form posts to either the HTML login or this endpoint.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Username or email.
    pub log: String,
    /// Password.
    pub pwd: String,
    /// Where the browser should land after the handshake completes.
    #[serde(default)]
    pub redirect_to: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct VerifyTokenRequest {
    #[validate(length(min = 1))]
    pub token: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub user: UserSummary,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenerateTokenResponse {
    pub success: bool,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VerifyTokenResponse {
    pub success: bool,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

/// Bootstrap configuration the browser client reads before starting a
/// handshake.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClientSettings {
    /// Base URL of this endpoint service.
    pub ajax_url: String,
    /// Relay page URL opened in the popup.
    pub auth_popup: String,
    /// Host the settings were served from.
    pub domain: String,
    /// Anti-forgery nonce for the guarded endpoints.
    pub nonce: String,
    /// Allowlisted hosts, sorted for stable output.
    pub host_list: Vec<String>,
    /// Where the logout popup sends the browser afterwards.
    pub logout_redirect_url: String,
}
