//! Trusted-host resolution for a mapped-domain deployment.
//!
//! A deployment serves one site under several hostnames (subdomain mappings
//! plus alias mappings). The SSO handshake only relays tokens to hosts that
//! belong to the deployment, so every request that crosses a domain boundary
//! is checked against the allowlist resolved here.

pub mod allowlist;
pub mod mapping;
pub mod resolver;

pub use allowlist::HostAllowlist;
pub use mapping::{DomainMapping, MappingRepository, StaticMappingRepository};
pub use resolver::{AllowlistResolver, DnsProbe, SystemDnsProbe};
