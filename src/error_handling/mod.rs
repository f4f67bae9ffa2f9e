//! Error handling and failure statistics.
//!
//! This module provides:
//! - Fatal error types (`ConfigError`, `InitializationError`)
//! - The per-host `ResolveFailure` taxonomy
//! - Failure statistics tracking
//!
//! Only configuration and initialization errors ever reach the caller as `Err`.
//! Per-host failures are absorbed into the candidate records.

mod stats;
mod types;

// Re-export public API
pub use stats::FailureStats;
pub use types::{ConfigError, FailureKind, InitializationError, ResolveFailure};
