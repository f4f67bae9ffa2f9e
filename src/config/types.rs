//! Configuration types.
//!
//! This module defines the resolver settings and the library configuration struct,
//! plus the enums shared with command-line parsing.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_MAX_CONCURRENCY, DNS_LIFETIME, DNS_PORT, DNS_TIMEOUT, LOGGING_INTERVAL,
};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Which lookup path resolves hostnames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Query the configured nameservers directly (A records only)
    Dns,
    /// Go through the platform resolver (`getaddrinfo`), IPv4 results only
    System,
}

/// Immutable resolution parameters.
///
/// Construct with [`ResolverSettings::new`], which validates every value up front so
/// that misconfiguration is reported at startup rather than per query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    nameservers: Vec<SocketAddr>,
    timeout: Duration,
    lifetime: Duration,
}

impl ResolverSettings {
    /// Builds validated settings.
    ///
    /// # Arguments
    ///
    /// * `nameservers` - `IP` or `IP:port` strings; empty means system configuration
    /// * `timeout` - Per-query timeout (must be positive)
    /// * `lifetime` - Bound on one whole resolution (must be positive and >= `timeout`)
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first invalid value.
    pub fn new<I, S>(nameservers: I, timeout: Duration, lifetime: Duration) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let nameservers = nameservers
            .into_iter()
            .map(|ns| parse_nameserver(ns.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        if timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if lifetime.is_zero() {
            return Err(ConfigError::ZeroLifetime);
        }
        if lifetime < timeout {
            return Err(ConfigError::LifetimeShorterThanTimeout {
                lifetime_ms: lifetime.as_millis(),
                timeout_ms: timeout.as_millis(),
            });
        }

        Ok(Self {
            nameservers,
            timeout,
            lifetime,
        })
    }

    /// Configured nameservers. Empty means the system configuration is used.
    pub fn nameservers(&self) -> &[SocketAddr] {
        &self.nameservers
    }

    /// Per-query timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Upper bound on one resolution, retries included.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Number of transport attempts that fit inside the lifetime (at least one).
    pub fn attempts(&self) -> usize {
        let per_query = self.timeout.as_millis().max(1);
        ((self.lifetime.as_millis() / per_query) as usize).max(1)
    }
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            nameservers: Vec::new(),
            timeout: DNS_TIMEOUT,
            lifetime: DNS_LIFETIME,
        }
    }
}

fn parse_nameserver(raw: &str) -> Result<SocketAddr, ConfigError> {
    let trimmed = raw.trim();
    if let Ok(addr) = trimmed.parse::<SocketAddr>() {
        return Ok(addr);
    }
    trimmed
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DNS_PORT))
        .map_err(|_| ConfigError::InvalidNameserver(raw.to_string()))
}

/// Library configuration (no CLI dependencies).
///
/// Passed explicitly to the batch entry points; nothing is read from global state.
///
/// # Examples
///
/// ```no_run
/// use bulk_resolve::{Config, ResolverSettings};
/// use std::time::Duration;
///
/// let config = Config {
///     resolver: ResolverSettings::new(
///         ["1.1.1.1", "8.8.8.8:53"],
///         Duration::from_secs(2),
///         Duration::from_secs(5),
///     )?,
///     max_concurrency: 100,
///     ..Default::default()
/// };
/// # Ok::<(), bulk_resolve::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Nameservers, timeout and lifetime
    pub resolver: ResolverSettings,

    /// Maximum lookups in flight at once
    pub max_concurrency: usize,

    /// Lookup path
    pub backend: Backend,

    /// Seconds between progress log lines (0 disables periodic progress)
    pub progress_interval: u64,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Config {
    /// Checks the values that `ResolverSettings` cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroConcurrency` if `max_concurrency` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolver: ResolverSettings::default(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            backend: Backend::Dns,
            progress_interval: LOGGING_INTERVAL,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
