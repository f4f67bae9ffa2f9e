//! bulk_resolve library: concurrent A-record resolution for candidate hostnames
//!
//! This library takes an ordered collection of candidate records, resolves every
//! record that does not yet carry a result, and returns the same collection with
//! each of those records filled in. Lookups run concurrently under a configurable
//! bound, and a failing host never aborts the batch: its record is marked invalid
//! with a short description of what went wrong.
//!
//! # Example
//!
//! ```no_run
//! use bulk_resolve::{run_bulk_query, CandidateRecord, Config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let records = vec![
//!     CandidateRecord::new("www.example.com"),
//!     CandidateRecord::with_ips("mail.example.com", "192.0.2.10"),
//! ];
//!
//! let resolved = run_bulk_query(records, &Config::default())?;
//! for record in &resolved {
//!     println!("{} -> {:?} (valid={})", record.subdomain, record.ips, record.valid);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Async callers use [`resolve_with_config`] or a [`BatchCoordinator`] directly.

#![warn(missing_docs)]

pub mod app;
mod batch;
pub mod config;
mod error_handling;
pub mod initialization;
mod record;
mod resolve;

// Re-export public API
pub use batch::{resolve_with_config, BatchCoordinator, BatchProgress, BatchSummary};
pub use config::{Backend, Config, LogFormat, LogLevel, ResolverSettings};
pub use error_handling::{
    ConfigError, FailureKind, FailureStats, InitializationError, ResolveFailure,
};
pub use record::{record_outcome, CandidateRecord};
pub use resolve::{DnsResolver, Resolution, Resolve, SystemResolver};
pub use run::run_bulk_query;

// Blocking boundary between the async core and synchronous callers
mod run {
    use crate::batch::resolve_with_config;
    use crate::config::Config;
    use crate::error_handling::InitializationError;
    use crate::initialization::init_runtime;
    use crate::record::CandidateRecord;

    /// Resolves a batch for a caller that has no async runtime of its own.
    ///
    /// Builds a multi-threaded Tokio runtime, drives the batch to completion on it,
    /// and returns the populated collection in input order. Records that already
    /// carry `ips` are returned untouched, and if no record needs resolving no
    /// runtime is started at all.
    ///
    /// # Errors
    ///
    /// Returns an error only for invalid configuration or if the runtime cannot be
    /// built. Per-host failures are recorded in the returned records.
    ///
    /// # Panics
    ///
    /// Panics if called from inside a Tokio runtime; use [`resolve_with_config`]
    /// there instead.
    pub fn run_bulk_query(
        records: Vec<CandidateRecord>,
        config: &Config,
    ) -> Result<Vec<CandidateRecord>, InitializationError> {
        config.validate()?;
        if !records.iter().any(CandidateRecord::needs_resolution) {
            return Ok(records);
        }

        let runtime = init_runtime()?;
        let resolved = runtime.block_on(resolve_with_config(records, config))?;
        Ok(resolved)
    }
}
