//! Bridge synchronous provider traits onto async HTTP clients.
//!
//! Each client owns a current-thread runtime that is reused across calls.
//! When a call arrives from inside an existing multi-threaded Tokio runtime
//! the caller's handle is used via `block_in_place` to avoid nested-runtime
//! panics; a `current_thread` caller falls back to the stored runtime.

use std::future::Future;

use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

/// Build the runtime a client stores for bridging.
pub(crate) fn build_runtime() -> std::io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Drive `future` to completion from synchronous code.
pub(crate) fn block_on<F: Future>(runtime: &Runtime, future: F) -> F::Output {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(|| handle.block_on(future))
        }
        // No runtime detected, or a current_thread runtime: use our own.
        _ => runtime.block_on(future),
    }
}
