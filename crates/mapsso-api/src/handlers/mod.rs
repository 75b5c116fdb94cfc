//! Endpoint handlers.

mod generate_token;
mod login;
mod logout;
mod settings;
mod verify_token;

pub use generate_token::generate_token;
pub use login::login;
pub use logout::logout;
pub use settings::settings;
pub use verify_token::verify_token;

use axum::http::header::USER_AGENT;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::services::SESSION_COOKIE;

/// Session cookie with the attributes every auth cookie here carries.
pub(crate) fn session_cookie(session_id: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, session_id);
    cookie.set_path("/");
    cookie.set_secure(true);
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Strict);
    cookie
}

/// Expired clone of the session cookie, for logout.
pub(crate) fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie
}

pub(crate) fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
