//! Configuration constants used as defaults.

use std::time::Duration;

/// Default per-query DNS timeout.
pub const DNS_TIMEOUT: Duration = Duration::from_secs(5);

/// Default lifetime of a single resolution, inclusive of transport retries.
///
/// Slightly larger than two timeouts so the resolver gets one retry.
pub const DNS_LIFETIME: Duration = Duration::from_secs(12);

/// Default upper bound on in-flight lookups.
pub const DEFAULT_MAX_CONCURRENCY: usize = 200;

/// Seconds between progress log lines.
pub const LOGGING_INTERVAL: u64 = 5;

/// Port assumed for nameservers given without one.
pub const DNS_PORT: u16 = 53;

/// Service port handed to the system resolver (`getaddrinfo` needs one).
pub const SYSTEM_LOOKUP_PORT: u16 = 80;
