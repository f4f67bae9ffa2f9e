//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger
//! - DNS resolver and lookup backend
//! - Concurrency semaphore
//! - Tokio runtime for the blocking entry point

mod logger;
mod resolver;

use std::sync::Arc;

use tokio::runtime::Runtime;
use tokio::sync::Semaphore;

use crate::error_handling::InitializationError;

// Re-export public API
pub use logger::init_logger_with;
pub use resolver::{init_backend, init_resolver};

/// Initializes a semaphore for controlling concurrency.
///
/// Each in-flight lookup holds one permit, so `count` is the maximum number of
/// concurrent resolutions.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count))
}

/// Builds the multi-threaded runtime that drives a batch for synchronous callers.
///
/// # Errors
///
/// Returns `InitializationError::RuntimeError` if the runtime cannot be created.
pub fn init_runtime() -> Result<Runtime, InitializationError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("bulk-resolve")
        .build()?;
    Ok(runtime)
}
