//! Allowlist resolution from mapping records.

use std::collections::HashSet;
use std::net::ToSocketAddrs;
use std::sync::Arc;

use regex::Regex;
use std::sync::OnceLock;

use crate::allowlist::HostAllowlist;
use crate::mapping::MappingRepository;

/// Hostname shape filter: at least one label, a dot, and a two-letter-plus
/// top-level label. Anything else coming out of mapping records is dropped.
fn hostname_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap_or_else(|e| {
            // The pattern is a compile-time constant; this cannot fail.
            panic!("hostname pattern failed to compile: {e}")
        })
    })
}

/// Returns true for hostnames the allowlist will accept.
pub fn is_valid_hostname(host: &str) -> bool {
    !host.is_empty() && hostname_pattern().is_match(host)
}

/// Reachability probe used by the optional DNS filter.
pub trait DnsProbe: Send + Sync {
    /// True when the host resolves to at least one address.
    fn resolves(&self, host: &str) -> bool;
}

/// Probe backed by the system resolver.
#[derive(Debug, Clone, Default)]
pub struct SystemDnsProbe;

impl DnsProbe for SystemDnsProbe {
    fn resolves(&self, host: &str) -> bool {
        // Port is irrelevant, getaddrinfo only sees the host.
        (host, 443u16)
            .to_socket_addrs()
            .map(|mut addrs| addrs.next().is_some())
            .unwrap_or(false)
    }
}

/// Builds the trusted-host set for a deployment.
///
/// The result is the union of the subdomain-mapping hosts, the
/// alias-mapping hosts, the base host and the current effective domain,
/// filtered by hostname shape and (optionally) DNS reachability. The set is
/// rebuilt on every call; mapping records may change between requests.
pub struct AllowlistResolver {
    repository: Arc<dyn MappingRepository>,
    subdomain_mapping_ids: Vec<i64>,
    alias_mapping_ids: Vec<i64>,
    base_host: String,
    current_domain: Option<String>,
    dns_probe: Option<Arc<dyn DnsProbe>>,
}

impl AllowlistResolver {
    pub fn new(
        repository: Arc<dyn MappingRepository>,
        subdomain_mapping_ids: Vec<i64>,
        alias_mapping_ids: Vec<i64>,
        base_host: impl Into<String>,
        current_domain: Option<String>,
    ) -> Self {
        Self {
            repository,
            subdomain_mapping_ids,
            alias_mapping_ids,
            base_host: base_host.into(),
            current_domain,
            dns_probe: None,
        }
    }

    /// Enables the DNS reachability filter. Hosts that do not resolve are
    /// dropped from the allowlist.
    #[must_use]
    pub fn with_dns_probe(mut self, probe: Arc<dyn DnsProbe>) -> Self {
        self.dns_probe = Some(probe);
        self
    }

    pub async fn resolve(&self) -> HostAllowlist {
        let mut candidates: HashSet<String> = HashSet::new();

        for ids in [&self.subdomain_mapping_ids, &self.alias_mapping_ids] {
            for mapping in self.repository.find_by_ids(ids).await {
                candidates.insert(mapping.host.to_ascii_lowercase());
            }
        }
        candidates.insert(self.base_host.to_ascii_lowercase());
        if let Some(current) = &self.current_domain {
            candidates.insert(current.to_ascii_lowercase());
        }

        let hosts: HashSet<String> = candidates
            .into_iter()
            .filter(|host| {
                if !is_valid_hostname(host) {
                    tracing::debug!(host = %host, "dropping malformed allowlist candidate");
                    return false;
                }
                if let Some(probe) = &self.dns_probe {
                    if !probe.resolves(host) {
                        tracing::warn!(host = %host, "dropping unresolvable allowlist candidate");
                        return false;
                    }
                }
                true
            })
            .collect();

        HostAllowlist::new(hosts)
    }
}
