//! Single-host resolution.
//!
//! This module provides the [`Resolve`] trait and its two backends:
//! - [`DnsResolver`]: A-record lookups against the configured nameservers
//! - [`SystemResolver`]: the platform resolver (`getaddrinfo`)
//!
//! Every failure path is converted into a [`Resolution::Failed`] value. Nothing in
//! here returns an error to the caller or panics on a bad host.

mod dns;
mod system;

use std::collections::BTreeSet;
use std::net::{IpAddr, Ipv4Addr};

use futures::future::BoxFuture;

use crate::error_handling::ResolveFailure;

pub use dns::DnsResolver;
pub use system::SystemResolver;

/// Outcome of resolving one hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Deduplicated IPv4 addresses; never empty.
    Resolved(BTreeSet<Ipv4Addr>),
    /// Typed reason the lookup failed.
    Failed(ResolveFailure),
}

impl Resolution {
    /// Builds an outcome from raw lookup results, keeping IPv4 addresses only.
    ///
    /// A lookup that produced no IPv4 address is a malformed response.
    pub fn from_addrs<I>(addrs: I) -> Self
    where
        I: IntoIterator<Item = IpAddr>,
    {
        let ips: BTreeSet<Ipv4Addr> = addrs
            .into_iter()
            .filter_map(|ip| match ip {
                IpAddr::V4(v4) => Some(v4),
                IpAddr::V6(_) => None,
            })
            .collect();

        Resolution::Resolved(ips).into_checked()
    }

    /// Turns an empty resolved set into a malformed-response failure.
    ///
    /// `Resolved` is public, so outcomes from custom resolvers pass through here
    /// before being recorded.
    pub fn into_checked(self) -> Self {
        match self {
            Resolution::Resolved(ips) if ips.is_empty() => Resolution::Failed(
                ResolveFailure::MalformedResponse("no addresses returned".to_string()),
            ),
            other => other,
        }
    }

    /// Whether the lookup produced at least one address.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    /// The failure, if this outcome is one.
    pub fn failure(&self) -> Option<&ResolveFailure> {
        match self {
            Resolution::Failed(failure) => Some(failure),
            Resolution::Resolved(_) => None,
        }
    }
}

/// Resolves one hostname to its IPv4 addresses.
///
/// Implementations must bound each call by their configured lifetime and must
/// express every failure as [`Resolution::Failed`].
pub trait Resolve: Send + Sync + 'static {
    /// Resolves `host`, never taking longer than the implementation's lifetime.
    fn resolve<'a>(&'a self, host: &'a str) -> BoxFuture<'a, Resolution>;
}

/// Rejects hostnames that cannot be looked up at all, before any I/O.
pub(crate) fn check_hostname(host: &str) -> Option<ResolveFailure> {
    if host.trim().is_empty() {
        return Some(ResolveFailure::NameNotFound("empty hostname".to_string()));
    }
    None
}
