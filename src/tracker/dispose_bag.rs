//! # Weakly-held subscription tracker.
//!
//! [`Tracker`] remembers handles so they can all be cancelled in one call,
//! without keeping any of them alive. A handle whose last strong reference is
//! dropped is pruned silently and is never cancelled.
//!
//! ## Architecture
//! ```text
//! add(&handle) ──► Mutex<Vec<Weak<dyn Handle>>> ──► prune (strong_count == 0)
//!                                │
//!                     dispose_all() (same lock)
//!                                │
//!         for each live, not-yet-cancelled handle: cancel()
//!                                │
//!               storage cleared ─┴─► Ok(()) | Err(DisposeError)
//! ```
//!
//! ## Rules
//! - Every operation runs inside one critical section, so a disposal pass
//!   never interleaves with an `add`.
//! - Every live handle is attempted, even after earlier cancels fail or panic;
//!   failures are returned together in insertion order. A panic inside
//!   `is_cancelled()` or `cancel()` is reported as a [`CancelError`](crate::CancelError).
//! - A poisoned lock is recovered; the tracker keeps working.
//! - Storage is cleared after every pass, whatever its outcome. The tracker
//!   stays usable.
//! - `cancel()` implementations must not call back into the tracker that is
//!   disposing them; the lock is not re-entrant.
//! - Handles upgraded during a pass are released after the lock, so a handle
//!   whose last owner goes away mid-pass runs its `Drop` outside the critical
//!   section.
//! - Dropping the tracker cancels nothing.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::{debug, trace, warn};

use crate::config::Config;
use crate::error::{CancelError, DisposeError};
use crate::tracker::{Handle, HandleRef};

type Entries = Vec<Weak<dyn Handle>>;

/// Thread-safe bag of weakly-held handles.
///
/// ### Example
/// ```rust
/// use rxscript::{CancelFn, Handle, Tracker};
///
/// let tracker = Tracker::new();
/// let kept = CancelFn::empty();
/// tracker.add(&kept);
/// tracker.add(&CancelFn::empty()); // dropped right away, pruned
///
/// assert_eq!(tracker.len(), 1);
/// tracker.dispose_all().unwrap();
/// assert!(kept.is_cancelled());
/// assert!(tracker.is_empty());
/// ```
pub struct Tracker {
    entries: Mutex<Entries>,
}

impl Tracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Creates an empty tracker, pre-sized from `cfg.tracker_capacity`.
    pub fn with_config(cfg: &Config) -> Self {
        let entries = match cfg.tracker_capacity_hint() {
            Some(cap) => Vec::with_capacity(cap),
            None => Vec::new(),
        };
        Self {
            entries: Mutex::new(entries),
        }
    }

    fn entries(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts tracking `handle` without taking ownership of it.
    pub fn add(&self, handle: &HandleRef) {
        let mut entries = self.entries();
        entries.push(Arc::downgrade(handle));
        prune(&mut entries);
    }

    /// Starts tracking every handle in `handles`, under a single lock.
    pub fn add_all<'a, I>(&self, handles: I)
    where
        I: IntoIterator<Item = &'a HandleRef>,
    {
        let mut entries = self.entries();
        entries.extend(handles.into_iter().map(Arc::downgrade));
        prune(&mut entries);
    }

    /// Cancels every live handle that is not cancelled yet, then forgets them all.
    ///
    /// Returns [`DisposeError`] carrying every failed cancellation when at
    /// least one `cancel()` failed. The other handles are still cancelled.
    pub fn dispose_all(&self) -> Result<(), DisposeError> {
        let mut entries = self.entries();
        let drained = std::mem::take(&mut *entries);

        let mut failures = Vec::new();
        let mut live: Vec<HandleRef> = Vec::with_capacity(drained.len());
        let mut cancelled = 0usize;
        let mut skipped = 0usize;
        let mut reclaimed = 0usize;

        for (index, weak) in drained.iter().enumerate() {
            let Some(handle) = weak.upgrade() else {
                reclaimed += 1;
                continue;
            };
            match cancel_isolated(handle.as_ref()) {
                Ok(true) => cancelled += 1,
                Ok(false) => skipped += 1,
                Err(err) => {
                    warn!(index, error = %err, "handle cancellation failed");
                    failures.push(err);
                }
            }
            live.push(handle);
        }
        drop(entries);
        drop(live);

        debug!(
            cancelled,
            skipped,
            reclaimed,
            failed = failures.len(),
            "tracker disposed"
        );
        match DisposeError::from_failures(failures) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Number of tracked handles that are still alive.
    pub fn len(&self) -> usize {
        let mut entries = self.entries();
        prune(&mut entries);
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cancels `handle` unless already cancelled; `Ok(false)` means skipped.
///
/// A panic is caught and turned into a [`CancelError`].
fn cancel_isolated(handle: &dyn Handle) -> Result<bool, CancelError> {
    panic::catch_unwind(AssertUnwindSafe(|| {
        if handle.is_cancelled() {
            return Ok(false);
        }
        handle.cancel().map(|()| true)
    }))
    .unwrap_or_else(|payload| {
        Err(CancelError::msg(format!(
            "cancel panicked: {}",
            panic_message(payload.as_ref())
        )))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "non-string panic payload"
    }
}

/// Drops entries whose handle has no strong reference left.
fn prune(entries: &mut Entries) {
    let before = entries.len();
    entries.retain(|weak| weak.strong_count() > 0);
    let reclaimed = before - entries.len();
    if reclaimed > 0 {
        trace!(reclaimed, "pruned dropped handles");
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Tracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracker")
            .field("entries", &self.entries().len())
            .finish()
    }
}
