//! The resolved trusted-host set.

use std::collections::HashSet;
use url::Url;

/// Deduplicated set of hostnames the deployment trusts.
///
/// No ordering is guaranteed; callers that need a stable list (for example
/// to hand to a browser client) should sort the output of [`hosts`].
///
/// [`hosts`]: HostAllowlist::hosts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostAllowlist {
    hosts: HashSet<String>,
}

impl HostAllowlist {
    pub fn new(hosts: impl IntoIterator<Item = String>) -> Self {
        Self {
            hosts: hosts.into_iter().collect(),
        }
    }

    /// Case-insensitive host membership check.
    pub fn contains_host(&self, host: &str) -> bool {
        self.hosts.contains(&host.to_ascii_lowercase())
    }

    /// Validates an `Origin` header value: it must parse as a URL and its
    /// host must be allowlisted. The empty-origin policy is the caller's
    /// decision, so an empty string is rejected here.
    pub fn allows_origin(&self, origin: &str) -> bool {
        let Ok(url) = Url::parse(origin) else {
            return false;
        };
        match url.host_str() {
            Some(host) => self.contains_host(host),
            None => false,
        }
    }

    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.hosts.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowlist() -> HostAllowlist {
        HostAllowlist::new(vec![
            "example.com".to_string(),
            "shop.example.com".to_string(),
        ])
    }

    #[test]
    fn test_contains_host_case_insensitive() {
        assert!(allowlist().contains_host("Shop.Example.COM"));
        assert!(!allowlist().contains_host("evil.example.net"));
    }

    #[test]
    fn test_allows_origin_for_listed_host() {
        assert!(allowlist().allows_origin("https://shop.example.com"));
        assert!(allowlist().allows_origin("http://example.com:8080"));
    }

    #[test]
    fn test_rejects_unlisted_or_broken_origin() {
        assert!(!allowlist().allows_origin("https://evil.example.net"));
        assert!(!allowlist().allows_origin("not a url"));
        assert!(!allowlist().allows_origin(""));
    }

    #[test]
    fn test_rejects_lookalike_host() {
        // Suffix match is not membership.
        assert!(!allowlist().allows_origin("https://example.com.evil.net"));
    }
}
