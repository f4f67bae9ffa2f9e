//! Fan-out/fan-in over a batch of candidate records.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{debug, info, warn};
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;

use super::progress::{spawn_progress_reporter, stop_progress_reporter, BatchProgress};
use crate::config::LOGGING_INTERVAL;
use crate::error_handling::{FailureStats, InitializationError, ResolveFailure};
use crate::initialization::{init_runtime, init_semaphore};
use crate::record::{record_outcome, CandidateRecord};
use crate::resolve::{Resolution, Resolve};

/// Counts for one finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Records that needed a lookup.
    pub total: usize,
    /// Progress count when the batch returned; equals `total` on every path.
    pub completed: usize,
    /// Records that ended with a failure, cancellations included.
    pub failed: usize,
}

/// Resolves every record that still needs it, at most `max_concurrency` at a time.
///
/// Results are written back by original index, so the returned collection has the
/// same order and length as the input whatever order lookups finish in. Per-host
/// failures end up in the records; the batch itself never fails.
pub struct BatchCoordinator<R: ?Sized> {
    resolver: Arc<R>,
    max_concurrency: usize,
    progress_interval: Duration,
    cancel: CancellationToken,
}

impl<R: Resolve + ?Sized> BatchCoordinator<R> {
    /// Creates a coordinator. A zero bound is raised to one.
    pub fn new(resolver: Arc<R>, max_concurrency: usize) -> Self {
        let max_concurrency = if max_concurrency == 0 {
            warn!("Maximum concurrency of 0 would never launch a lookup, using 1");
            1
        } else {
            max_concurrency
        };
        Self {
            resolver,
            max_concurrency,
            progress_interval: Duration::from_secs(LOGGING_INTERVAL),
            cancel: CancellationToken::new(),
        }
    }

    /// Sets how often progress is logged. `Duration::ZERO` disables progress output.
    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Attaches a token that cancels the batch.
    ///
    /// Lookups that have not finished when the token fires are recorded as
    /// `ResolveFailure::Cancelled`; the batch still returns every record.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Upper bound on lookups in flight.
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Resolves all records whose `ips` is absent or empty.
    ///
    /// Records that already carry a value are left untouched. If nothing needs
    /// resolving the input is returned as is, without touching the resolver.
    pub async fn resolve_batch(&self, records: Vec<CandidateRecord>) -> Vec<CandidateRecord> {
        self.resolve_batch_with_summary(records).await.0
    }

    /// Same as [`resolve_batch`](Self::resolve_batch), also returning the batch counts.
    pub async fn resolve_batch_with_summary(
        &self,
        mut records: Vec<CandidateRecord>,
    ) -> (Vec<CandidateRecord>, BatchSummary) {
        let pending: Vec<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.needs_resolution())
            .map(|(index, _)| index)
            .collect();

        if pending.is_empty() {
            debug!("No records need resolution ({} total)", records.len());
            return (records, BatchSummary::default());
        }

        info!(
            "Resolving A records for {} of {} hosts (max concurrency {})",
            pending.len(),
            records.len(),
            self.max_concurrency
        );

        let semaphore = init_semaphore(self.max_concurrency);
        let progress = Arc::new(BatchProgress::new(pending.len()));
        let stats = FailureStats::new();

        let reporting = !self.progress_interval.is_zero();
        let reporter_cancel = CancellationToken::new();
        let reporter = reporting.then(|| {
            spawn_progress_reporter(
                Arc::clone(&progress),
                self.progress_interval,
                reporter_cancel.clone(),
            )
        });

        let mut tasks = FuturesUnordered::new();
        let mut queue = pending.into_iter();

        while let Some(index) = queue.next() {
            // The semaphore is never closed, so a missing permit means cancellation
            let permit = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => None,
                permit = Arc::clone(&semaphore).acquire_owned() => permit.ok(),
            };

            let Some(permit) = permit else {
                for skipped in std::iter::once(index).chain(queue.by_ref()) {
                    progress.advance();
                    finish(
                        &mut records[skipped],
                        Resolution::Failed(ResolveFailure::Cancelled),
                        &stats,
                    );
                }
                break;
            };

            let resolver = Arc::clone(&self.resolver);
            let task_progress = Arc::clone(&progress);
            let cancel = self.cancel.clone();
            let host = records[index].subdomain.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                let outcome = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Resolution::Failed(ResolveFailure::Cancelled),
                    outcome = resolver.resolve(&host) => outcome,
                };
                task_progress.advance();
                outcome
            });
            tasks.push(async move { (index, handle.await) });
        }

        while let Some((index, joined)) = tasks.next().await {
            let outcome = match joined {
                Ok(outcome) => outcome,
                Err(join_error) => {
                    // The task never reached its own progress update
                    progress.advance();
                    warn!(
                        "Resolution task for {} failed: {}",
                        records[index].subdomain, join_error
                    );
                    Resolution::Failed(task_failure(&join_error))
                }
            };
            finish(&mut records[index], outcome, &stats);
        }

        stop_progress_reporter(reporter_cancel, reporter).await;
        if reporting {
            progress.log_progress();
        }
        stats.log_summary();
        info!(
            "Finished resolving {} hosts ({} resolved, {} failed)",
            progress.total(),
            progress.total() - stats.total(),
            stats.total()
        );

        let summary = BatchSummary {
            total: progress.total(),
            completed: progress.completed(),
            failed: stats.total(),
        };
        (records, summary)
    }

    /// Runs [`resolve_batch`](Self::resolve_batch) on a dedicated runtime.
    ///
    /// Must not be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::RuntimeError` if the runtime cannot be built.
    pub fn run_blocking(
        &self,
        records: Vec<CandidateRecord>,
    ) -> Result<Vec<CandidateRecord>, InitializationError> {
        if !records.iter().any(CandidateRecord::needs_resolution) {
            return Ok(records);
        }
        let runtime = init_runtime()?;
        Ok(runtime.block_on(self.resolve_batch(records)))
    }
}

fn finish(record: &mut CandidateRecord, outcome: Resolution, stats: &FailureStats) {
    let outcome = outcome.into_checked();
    if let Some(failure) = outcome.failure() {
        stats.increment(failure);
    }
    record_outcome(record, outcome);
}

fn task_failure(join_error: &JoinError) -> ResolveFailure {
    if join_error.is_panic() {
        ResolveFailure::TaskFailed("panicked".to_string())
    } else {
        ResolveFailure::TaskFailed("aborted".to_string())
    }
}
