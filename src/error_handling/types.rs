//! Error type definitions.
//!
//! This module defines the fatal configuration and initialization errors, plus the
//! per-host failure types that are folded into candidate records.

use std::io;

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for invalid resolver configuration.
///
/// These are the only failures that stop a batch, and they are raised before any
/// lookup is attempted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A nameserver entry is neither `IP` nor `IP:port`.
    #[error("Invalid nameserver address '{0}'")]
    InvalidNameserver(String),

    /// The per-query timeout is zero.
    #[error("Resolver timeout must be greater than zero")]
    ZeroTimeout,

    /// The lifetime bound is zero.
    #[error("Resolver lifetime must be greater than zero")]
    ZeroLifetime,

    /// The lifetime bound is shorter than a single query timeout.
    #[error("Resolver lifetime ({lifetime_ms}ms) must not be shorter than the timeout ({timeout_ms}ms)")]
    LifetimeShorterThanTimeout {
        /// Configured lifetime in milliseconds
        lifetime_ms: u128,
        /// Configured timeout in milliseconds
        timeout_ms: u128,
    },

    /// The concurrency bound is zero, which would never launch a lookup.
    #[error("Maximum concurrency must be greater than zero")]
    ZeroConcurrency,

    /// No nameservers were given and the system configuration could not be read.
    #[error("Failed to read system resolver configuration: {0}")]
    SystemConfig(String),
}

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// The resolver configuration was rejected.
    #[error("Resolver configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    /// The Tokio runtime backing the blocking entry point could not be built.
    #[error("Runtime initialization error: {0}")]
    RuntimeError(#[from] io::Error),
}

/// Why a single hostname could not be resolved.
///
/// The `Display` output is what ends up in a failed record's `ips` field, so it is
/// kept short and stable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveFailure {
    /// The lookup did not finish within the lifetime bound.
    #[error("timeout")]
    Timeout,

    /// The name does not exist or has no A records (NXDOMAIN / NODATA).
    #[error("name not found: {0}")]
    NameNotFound(String),

    /// The response had an unexpected shape, e.g. zero addresses.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Transport-level failure talking to the nameservers.
    #[error("network error: {0}")]
    Network(String),

    /// The lookup task itself failed (panicked or was aborted).
    #[error("resolution task failed: {0}")]
    TaskFailed(String),

    /// The batch was cancelled before this lookup finished.
    #[error("cancelled")]
    Cancelled,
}

impl ResolveFailure {
    /// Returns the counter category for this failure.
    pub fn kind(&self) -> FailureKind {
        match self {
            ResolveFailure::Timeout => FailureKind::Timeout,
            ResolveFailure::NameNotFound(_) => FailureKind::NameNotFound,
            ResolveFailure::MalformedResponse(_) => FailureKind::MalformedResponse,
            ResolveFailure::Network(_) => FailureKind::Network,
            ResolveFailure::TaskFailed(_) => FailureKind::TaskFailed,
            ResolveFailure::Cancelled => FailureKind::Cancelled,
        }
    }
}

/// Categories of per-host failures, used for statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FailureKind {
    /// Lookup exceeded its lifetime
    Timeout,
    /// NXDOMAIN or no A records
    NameNotFound,
    /// Unexpected answer shape
    MalformedResponse,
    /// Transport failure
    Network,
    /// Lookup task panicked or was aborted
    TaskFailed,
    /// Batch cancelled
    Cancelled,
}

impl FailureKind {
    /// Human-readable label used in summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Timeout => "Lookup timeout",
            FailureKind::NameNotFound => "Name not found",
            FailureKind::MalformedResponse => "Malformed response",
            FailureKind::Network => "Network error",
            FailureKind::TaskFailed => "Resolution task failure",
            FailureKind::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
