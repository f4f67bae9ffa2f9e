//! Helpers for the command-line binary.
//!
//! This module provides input parsing used by `main`.

pub mod input;

// Re-export public API
pub use input::{parse_candidate_line, read_candidates};
