//! # Contract guard for sinks.
//!
//! [`GuardedSink`] sits between a producer and a user sink during a guarded
//! [`attach`](crate::attach) and enforces the stream contract:
//!
//! ```text
//! producer ──► GuardedSink ──► sink
//!                 │
//!                 ├─ first on_error / on_complete → forwarded, marks terminated
//!                 └─ anything after termination  → dropped (counted)
//! ```
//!
//! The guard never reorders or buffers; it only filters.

use crate::events::ErrorValue;
use crate::sinks::Sink;

/// Sink wrapper that forwards at most one terminal callback and nothing after it.
pub struct GuardedSink<'a, T> {
    inner: &'a mut dyn Sink<T>,
    terminated: bool,
    dropped: usize,
}

impl<'a, T> GuardedSink<'a, T> {
    pub fn new(inner: &'a mut dyn Sink<T>) -> Self {
        Self {
            inner,
            terminated: false,
            dropped: 0,
        }
    }

    /// True once a terminal callback has been forwarded.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Number of callbacks swallowed after termination.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    fn drop_late(&mut self, what: &'static str) {
        self.dropped += 1;
        tracing::trace!(
            callback = what,
            dropped = self.dropped,
            "callback after terminal event dropped"
        );
    }
}

impl<T> Sink<T> for GuardedSink<'_, T> {
    fn on_start(&mut self) {
        if self.terminated {
            self.drop_late("on_start");
            return;
        }
        self.inner.on_start();
    }

    fn on_next(&mut self, item: T) {
        if self.terminated {
            self.drop_late("on_next");
            return;
        }
        self.inner.on_next(item);
    }

    fn on_error(&mut self, err: ErrorValue) {
        if self.terminated {
            self.drop_late("on_error");
            return;
        }
        self.terminated = true;
        self.inner.on_error(err);
    }

    fn on_complete(&mut self) {
        if self.terminated {
            self.drop_late("on_complete");
            return;
        }
        self.terminated = true;
        self.inner.on_complete();
    }
}
