//! Batch resolution.
//!
//! This module provides the [`BatchCoordinator`], which filters the records that
//! need a lookup, resolves them concurrently under a semaphore bound, reports
//! progress, and writes each outcome back by original index.

mod coordinator;
mod progress;

use std::time::Duration;

use crate::config::Config;
use crate::error_handling::ConfigError;
use crate::initialization::init_backend;
use crate::record::CandidateRecord;

// Re-export public API
pub use coordinator::{BatchCoordinator, BatchSummary};
pub use progress::BatchProgress;

/// Resolves `records` with the backend, bound and progress interval in `config`.
///
/// # Errors
///
/// Returns `ConfigError` if the configuration is invalid. No per-host failure is
/// ever returned here; those are recorded in the records themselves.
pub async fn resolve_with_config(
    records: Vec<CandidateRecord>,
    config: &Config,
) -> Result<Vec<CandidateRecord>, ConfigError> {
    config.validate()?;
    if !records.iter().any(CandidateRecord::needs_resolution) {
        return Ok(records);
    }

    let resolver = init_backend(config)?;
    let coordinator = BatchCoordinator::new(resolver, config.max_concurrency)
        .with_progress_interval(Duration::from_secs(config.progress_interval));
    Ok(coordinator.resolve_batch(records).await)
}
