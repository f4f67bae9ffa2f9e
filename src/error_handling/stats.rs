//! Failure statistics tracking.
//!
//! Thread-safe counters for per-host resolution failures, reported once a batch
//! completes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::info;
use strum::IntoEnumIterator;

use super::types::{FailureKind, ResolveFailure};

/// Thread-safe failure statistics tracker.
///
/// Tracks the count of each failure kind using atomic counters. All kinds are
/// initialized to zero on creation, so the map is never mutated afterwards.
pub struct FailureStats {
    failures: HashMap<FailureKind, AtomicUsize>,
}

impl FailureStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut failures = HashMap::new();
        for kind in FailureKind::iter() {
            failures.insert(kind, AtomicUsize::new(0));
        }
        FailureStats { failures }
    }

    /// Increment the counter matching `failure`.
    pub fn increment(&self, failure: &ResolveFailure) {
        let kind = failure.kind();
        if let Some(counter) = self.failures.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment failure counter for {:?} which is not in the map",
                kind
            );
        }
    }

    /// Get the count for a failure kind.
    pub fn get_count(&self, kind: FailureKind) -> usize {
        self.failures
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total failures across every kind.
    pub fn total(&self) -> usize {
        self.failures
            .values()
            .map(|c| c.load(Ordering::SeqCst))
            .sum()
    }

    /// Logs a breakdown of non-zero failure counters.
    pub fn log_summary(&self) {
        let total = self.total();
        if total == 0 {
            return;
        }
        info!("Resolution failures: {}", total);
        for kind in FailureKind::iter() {
            let count = self.get_count(kind);
            if count > 0 {
                info!("   {}: {}", kind, count);
            }
        }
    }
}

impl Default for FailureStats {
    fn default() -> Self {
        Self::new()
    }
}
