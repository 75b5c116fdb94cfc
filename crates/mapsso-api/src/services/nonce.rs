//! Anti-forgery nonces for the guarded endpoints.
//!
//! A nonce is the hex HMAC-SHA256 of the current time window under the
//! deployment secret. Verification accepts the current and the previous
//! window, so a page loaded just before a window rolls over keeps working.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

const NONCE_CONTEXT: &str = "sso-nonce";

/// Default window length, ten minutes.
pub const DEFAULT_WINDOW_SECS: i64 = 600;

pub struct NonceService {
    key: Vec<u8>,
    window_secs: i64,
}

impl NonceService {
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            window_secs: DEFAULT_WINDOW_SECS,
        }
    }

    #[must_use]
    pub fn with_window_secs(mut self, window_secs: i64) -> Self {
        self.window_secs = window_secs.max(1);
        self
    }

    fn mac_for_window(&self, window: i64) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .expect("HMAC accepts keys of any length");
        mac.update(format!("{NONCE_CONTEXT}|{window}").as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn current_window(&self) -> i64 {
        chrono::Utc::now().timestamp() / self.window_secs
    }

    /// Issues a nonce for the current window.
    pub fn issue(&self) -> String {
        self.mac_for_window(self.current_window())
    }

    /// Constant-time check against the current and previous window.
    pub fn verify(&self, nonce: &str) -> bool {
        let window = self.current_window();
        [window, window - 1].iter().any(|w| {
            let expected = self.mac_for_window(*w);
            expected.as_bytes().ct_eq(nonce.as_bytes()).into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> NonceService {
        NonceService::new(b"0123456789abcdef0123456789abcdef".to_vec())
    }

    #[test]
    fn test_issued_nonce_verifies() {
        let svc = service();
        assert!(svc.verify(&svc.issue()));
    }

    #[test]
    fn test_garbage_rejected() {
        let svc = service();
        assert!(!svc.verify("deadbeef"));
        assert!(!svc.verify(""));
    }

    #[test]
    fn test_nonce_is_key_dependent() {
        let a = service();
        let b = NonceService::new(b"fedcba9876543210fedcba9876543210".to_vec());
        assert!(!b.verify(&a.issue()));
    }

    #[test]
    fn test_previous_window_still_accepted() {
        let svc = service();
        let previous = svc.mac_for_window(svc.current_window() - 1);
        assert!(svc.verify(&previous));
        let ancient = svc.mac_for_window(svc.current_window() - 2);
        assert!(!svc.verify(&ancient));
    }
}
