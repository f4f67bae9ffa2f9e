//! Progress tracking for a running batch.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::info;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Completed-out-of-total counter shared by every lookup task.
///
/// Each finished task calls [`BatchProgress::advance`] exactly once, so the count
/// only ever grows and ends at `total`.
#[derive(Debug)]
pub struct BatchProgress {
    total: usize,
    completed: AtomicUsize,
    start: Instant,
}

impl BatchProgress {
    /// Starts a counter at zero out of `total`.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            completed: AtomicUsize::new(0),
            start: Instant::now(),
        }
    }

    /// Records one completed lookup and returns the new count.
    pub fn advance(&self) -> usize {
        self.completed.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Lookups finished so far.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Lookups launched for the batch.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Logs `completed/total` with the elapsed time and rate.
    pub fn log_progress(&self) {
        let completed = self.completed();
        let elapsed_secs = self.start.elapsed().as_secs_f64();
        let rate = if elapsed_secs > 0.0 {
            completed as f64 / elapsed_secs
        } else {
            0.0
        };
        let pct = if self.total > 0 {
            completed as f64 * 100.0 / self.total as f64
        } else {
            100.0
        };
        info!(
            "Progress: {}/{} ({:.1}%) in {:.2} seconds (~{:.2} hosts/sec)",
            completed, self.total, pct, elapsed_secs, rate
        );
    }
}

/// Spawns a task logging progress every `interval` until `cancel` fires.
pub fn spawn_progress_reporter(
    progress: Arc<BatchProgress>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    progress.log_progress();
                }
                _ = cancel.cancelled() => {
                    break;
                }
            }
        }
    })
}

/// Stops the reporter and waits for it to exit.
pub async fn stop_progress_reporter(cancel: CancellationToken, reporter: Option<JoinHandle<()>>) {
    cancel.cancel();
    if let Some(reporter) = reporter {
        let _ = reporter.await;
    }
}
