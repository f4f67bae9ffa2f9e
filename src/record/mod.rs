//! Candidate records and the result recorder.
//!
//! A candidate record is one hostname under investigation. The recorder folds a
//! single resolution outcome into it in place.

use serde::{Deserialize, Serialize};

use crate::resolve::Resolution;

/// One hostname pending or already carrying a resolution result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Fully-qualified hostname to resolve
    pub subdomain: String,

    /// Comma-joined IPv4 set, an error description, or nothing yet
    #[serde(default)]
    pub ips: Option<String>,

    /// 1 until resolution proves otherwise, then 0
    #[serde(default = "default_valid")]
    pub valid: u8,
}

fn default_valid() -> u8 {
    1
}

impl CandidateRecord {
    /// Creates an unresolved record for `subdomain`.
    pub fn new(subdomain: impl Into<String>) -> Self {
        Self {
            subdomain: subdomain.into(),
            ips: None,
            valid: default_valid(),
        }
    }

    /// Creates a record that already carries a result and will be skipped.
    pub fn with_ips(subdomain: impl Into<String>, ips: impl Into<String>) -> Self {
        Self {
            subdomain: subdomain.into(),
            ips: Some(ips.into()),
            valid: default_valid(),
        }
    }

    /// Whether this record still needs a lookup (`ips` absent or empty).
    pub fn needs_resolution(&self) -> bool {
        self.ips.as_deref().map_or(true, str::is_empty)
    }

    /// Whether the record is still considered live (`valid != 0`).
    pub fn is_valid(&self) -> bool {
        self.valid != 0
    }
}

/// Folds `outcome` into `record`.
///
/// A resolved set becomes a comma-joined string and leaves `valid` untouched. A
/// failure writes its description and clears `valid`. An empty resolved set is
/// recorded as a malformed response, so the record never reads as pending again.
pub fn record_outcome(record: &mut CandidateRecord, outcome: Resolution) {
    match outcome.into_checked() {
        Resolution::Resolved(ips) => {
            let joined = ips
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            record.ips = Some(joined);
        }
        Resolution::Failed(failure) => {
            log::debug!("Failed to resolve {}: {}", record.subdomain, failure);
            record.ips = Some(failure.to_string());
            record.valid = 0;
        }
    }
}
