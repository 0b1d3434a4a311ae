//! In-flight guard for sends.

use std::sync::atomic::{AtomicBool, Ordering};

/// Clears the in-flight flag on drop, so it is released even if the send
/// future is dropped mid-stream or returns early.
pub(crate) struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    /// Take the flag. Returns `None` if another send holds it.
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
