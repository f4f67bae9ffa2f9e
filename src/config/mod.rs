//! Resolver configuration and constants.
//!
//! This module provides:
//! - Default timeouts, lifetime and concurrency bound
//! - `ResolverSettings`, validated at construction
//! - The library `Config` and the enums shared with CLI parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Backend, Config, LogFormat, LogLevel, ResolverSettings};
