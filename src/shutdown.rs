//! Process-wide cancellation flag.
//! Set by the ctrlc handler in the binary (or by an embedding application);
//! the relocation walk polls it before each directory so in-flight file moves
//! finish but no new subtree is started.
//!
//! Relaxed atomics are sufficient for a one-way "stop" flag, and `request()` is
//! safe to call from signal handlers.

use std::sync::atomic::{AtomicBool, Ordering};

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Request a cooperative shutdown (idempotent).
#[inline]
pub fn request() {
    SHUTDOWN.store(true, Ordering::Relaxed);
}

/// Check whether a shutdown has been requested.
#[inline]
pub fn is_requested() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

/// Clear the flag so later operations in the same process can run again.
#[inline]
pub fn reset() {
    SHUTDOWN.store(false, Ordering::Relaxed);
}
