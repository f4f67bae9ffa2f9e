//! Lookups through the platform resolver.

use std::io;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use tokio::net::lookup_host;

use super::{check_hostname, Resolution, Resolve};
use crate::config::SYSTEM_LOOKUP_PORT;
use crate::error_handling::ResolveFailure;

/// Resolves hostnames with `getaddrinfo`, honouring `/etc/hosts` and the system
/// search configuration. Only IPv4 results are kept.
pub struct SystemResolver {
    lifetime: Duration,
}

impl SystemResolver {
    /// Creates a resolver capping each lookup at `lifetime`.
    pub fn new(lifetime: Duration) -> Self {
        Self { lifetime }
    }

    /// Resolves `host` through the platform resolver.
    pub async fn lookup(&self, host: &str) -> Resolution {
        if let Some(failure) = check_hostname(host) {
            return Resolution::Failed(failure);
        }

        match tokio::time::timeout(self.lifetime, lookup_host((host, SYSTEM_LOOKUP_PORT))).await {
            Ok(Ok(addrs)) => Resolution::from_addrs(addrs.map(|addr| addr.ip())),
            Ok(Err(e)) => {
                log::trace!("System lookup for {host} failed: {e}");
                Resolution::Failed(classify_io_error(&e))
            }
            Err(_) => Resolution::Failed(ResolveFailure::Timeout),
        }
    }
}

impl Resolve for SystemResolver {
    fn resolve<'a>(&'a self, host: &'a str) -> BoxFuture<'a, Resolution> {
        self.lookup(host).boxed()
    }
}

/// `getaddrinfo` reports most failures as opaque errors; anything that is not
/// clearly transport-level is treated as the name not resolving.
pub(crate) fn classify_io_error(err: &io::Error) -> ResolveFailure {
    match err.kind() {
        io::ErrorKind::TimedOut => ResolveFailure::Timeout,
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::NotConnected
        | io::ErrorKind::AddrNotAvailable => ResolveFailure::Network(err.to_string()),
        _ => ResolveFailure::NameNotFound(err.to_string()),
    }
}
