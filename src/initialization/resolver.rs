//! DNS resolver initialization.
//!
//! This module builds the hickory resolver from validated settings and picks the
//! lookup backend named in the configuration.

use std::sync::Arc;

use hickory_resolver::config::{
    LookupIpStrategy, NameServerConfig, Protocol, ResolverConfig, ResolverOpts,
};
use hickory_resolver::TokioAsyncResolver;

use crate::config::{Backend, Config, ResolverSettings};
use crate::error_handling::ConfigError;
use crate::resolve::{DnsResolver, Resolve, SystemResolver};

/// Initializes the DNS resolver for A-record lookups.
///
/// Uses the configured nameservers over UDP, or the system configuration when the
/// list is empty. The per-query timeout comes from the settings and the attempt
/// count is derived from how many timeouts fit in the lifetime. `ndots` is 0 so
/// candidate names are never expanded with search domains first.
///
/// A new resolver (and therefore a new cache) is built for every batch.
///
/// # Errors
///
/// Returns `ConfigError::SystemConfig` if the system configuration is needed and
/// cannot be read.
pub fn init_resolver(settings: &ResolverSettings) -> Result<TokioAsyncResolver, ConfigError> {
    let config = if settings.nameservers().is_empty() {
        let (config, _) = hickory_resolver::system_conf::read_system_conf()
            .map_err(|e| ConfigError::SystemConfig(e.to_string()))?;
        config
    } else {
        let mut config = ResolverConfig::new();
        for addr in settings.nameservers() {
            config.add_name_server(NameServerConfig::new(*addr, Protocol::Udp));
        }
        config
    };

    let mut opts = ResolverOpts::default();
    opts.timeout = settings.timeout();
    opts.attempts = settings.attempts();
    opts.ndots = 0;
    opts.ip_strategy = LookupIpStrategy::Ipv4Only;

    log::debug!(
        "DNS resolver: {} nameserver(s), timeout {:?}, {} attempt(s), lifetime {:?}",
        config.name_servers().len(),
        opts.timeout,
        opts.attempts,
        settings.lifetime()
    );

    Ok(TokioAsyncResolver::tokio(config, opts))
}

/// Builds the lookup backend selected by `config.backend`.
///
/// # Errors
///
/// Propagates `ConfigError` from [`init_resolver`].
pub fn init_backend(config: &Config) -> Result<Arc<dyn Resolve>, ConfigError> {
    let backend: Arc<dyn Resolve> = match config.backend {
        Backend::Dns => Arc::new(DnsResolver::new(&config.resolver)?),
        Backend::System => Arc::new(SystemResolver::new(config.resolver.lifetime())),
    };
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_init_resolver_with_explicit_nameservers() {
        let settings = ResolverSettings::new(
            ["1.1.1.1", "8.8.8.8:53"],
            Duration::from_secs(1),
            Duration::from_secs(3),
        )
        .unwrap();
        assert!(init_resolver(&settings).is_ok());
    }

    #[tokio::test]
    async fn test_init_backend_system() {
        let config = Config {
            backend: Backend::System,
            ..Default::default()
        };
        let backend = init_backend(&config).expect("system backend needs no config files");
        let outcome = backend.resolve("127.0.0.1").await;
        assert!(outcome.is_resolved());
    }
}
