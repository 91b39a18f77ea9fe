//! Synchronous helpers for callers without an async runtime
//!
//! Each call creates a current-thread runtime, so these helpers refuse to run
//! on a thread that is already driving a tokio runtime. Use the async API
//! there instead.

use std::future::Future;

use crate::{Error, Result};

/// Run a future to completion on a fresh runtime
///
/// Fails with [`Error::Configuration`] when called from within a tokio
/// runtime, where starting a nested one would panic.
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(Error::configuration(
            "Blocking call made inside an async runtime; use the async API instead",
        ));
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Configuration {
            message: format!("Failed to create runtime: {}", e),
            source: Some(anyhow::Error::new(e)),
        })?;

    Ok(runtime.block_on(future))
}
