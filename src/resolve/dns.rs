//! A-record lookups through hickory-resolver.

use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::error::ProtoErrorKind;
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::TokioAsyncResolver;

use super::{check_hostname, Resolution, Resolve};
use crate::config::ResolverSettings;
use crate::error_handling::{ConfigError, ResolveFailure};

/// Resolves hostnames by querying the configured nameservers.
///
/// Each lookup is capped at the settings' lifetime regardless of how the
/// underlying resolver retries.
pub struct DnsResolver {
    resolver: TokioAsyncResolver,
    lifetime: Duration,
}

impl DnsResolver {
    /// Creates a resolver from validated settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SystemConfig` if no nameservers were given and the
    /// system configuration cannot be read.
    pub fn new(settings: &ResolverSettings) -> Result<Self, ConfigError> {
        let resolver = crate::initialization::init_resolver(settings)?;
        Ok(Self {
            resolver,
            lifetime: settings.lifetime(),
        })
    }

    /// Resolves `host` to its A records.
    pub async fn lookup(&self, host: &str) -> Resolution {
        if let Some(failure) = check_hostname(host) {
            return Resolution::Failed(failure);
        }

        match tokio::time::timeout(self.lifetime, self.resolver.lookup_ip(host)).await {
            Ok(Ok(response)) => Resolution::from_addrs(response.iter()),
            Ok(Err(e)) => {
                log::trace!("DNS lookup for {host} failed: {e}");
                Resolution::Failed(classify_resolve_error(&e))
            }
            Err(_) => Resolution::Failed(ResolveFailure::Timeout),
        }
    }
}

impl Resolve for DnsResolver {
    fn resolve<'a>(&'a self, host: &'a str) -> BoxFuture<'a, Resolution> {
        self.lookup(host).boxed()
    }
}

/// Maps a hickory error onto the per-host failure taxonomy.
pub(crate) fn classify_resolve_error(err: &ResolveError) -> ResolveFailure {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => {
            if *response_code == ResponseCode::NXDomain {
                ResolveFailure::NameNotFound("NXDOMAIN".to_string())
            } else {
                ResolveFailure::NameNotFound(format!("no A records ({response_code})"))
            }
        }
        ResolveErrorKind::Timeout => ResolveFailure::Timeout,
        ResolveErrorKind::NoConnections => {
            ResolveFailure::Network("no nameserver connections available".to_string())
        }
        ResolveErrorKind::Io(e) => ResolveFailure::Network(e.to_string()),
        ResolveErrorKind::Proto(proto) => match proto.kind() {
            ProtoErrorKind::Timeout => ResolveFailure::Timeout,
            ProtoErrorKind::Io(e) => ResolveFailure::Network(e.to_string()),
            _ => ResolveFailure::MalformedResponse(proto.to_string()),
        },
        _ => ResolveFailure::MalformedResponse(err.to_string()),
    }
}
